//! Project name sanitization.
//!
//! Project names are chosen by humans and may carry dots or dashes
//! (`dummy.js`, `link.2`). Container names, compose service keys and DNS
//! aliases only accept a conservative identifier set, so every place that
//! turns a project name into one of those goes through [`simplify`].

use std::sync::LazyLock;

use regex::Regex;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_]").expect("static pattern compiles"));

/// Strips every character that is not an ASCII letter, digit or underscore.
///
/// ```
/// use bag8::name::simplify;
///
/// assert_eq!(simplify("link.2"), "link2");
/// assert_eq!(simplify("dummy.js"), "dummyjs");
/// ```
pub fn simplify(raw_name: &str) -> String {
    NON_WORD.replace_all(raw_name, "").into_owned()
}

/// Splits a link into its target and optional alias (`target:alias`).
pub fn split_link(link: &str) -> (&str, Option<&str>) {
    match link.split_once(':') {
        Some((target, alias)) => (target, Some(alias)),
        None => (link, None),
    }
}

/// Rewrites a link target to its simple name, keeping the alias untouched.
pub fn simplify_link(link: &str) -> String {
    match split_link(link) {
        (target, Some(alias)) => format!("{}:{}", simplify(target), alias),
        (target, None) => simplify(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplify_strips_non_word_characters() {
        assert_eq!(simplify("link.2"), "link2");
        assert_eq!(simplify("my-project"), "myproject");
        assert_eq!(simplify("under_score"), "under_score");
        assert_eq!(simplify("été"), "t");
        assert_eq!(simplify(""), "");
    }

    #[test]
    fn test_split_link() {
        assert_eq!(split_link("link"), ("link", None));
        assert_eq!(split_link("link:alias"), ("link", Some("alias")));
        assert_eq!(split_link("a:b:c"), ("a", Some("b:c")));
    }

    #[test]
    fn test_simplify_link_preserves_alias() {
        assert_eq!(simplify_link("dummy.js:dummyjs.docker"), "dummyjs:dummyjs.docker");
        assert_eq!(simplify_link("dummy.js"), "dummyjs");
    }
}
