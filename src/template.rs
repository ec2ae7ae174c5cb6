//! `%(VAR)s` interpolation for `dev_volumes` entries.
//!
//! Develop-mode volumes are written against the developer's environment,
//! e.g. `%(PWD)s:/app`. `%%` produces a literal percent sign; any other `%`
//! is kept as is.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Error, Result};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(?:%|\(([^)]+)\)s)").expect("static pattern compiles"));

/// Substitutes every `%(VAR)s` in `template` with `vars[VAR]`.
pub fn interpolate(template: &str, vars: &HashMap<String, String>) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        output.push_str(&template[last..whole.start()]);
        output.push_str(&substitution(&caps, template, vars)?);
        last = whole.end();
    }
    output.push_str(&template[last..]);

    Ok(output)
}

fn substitution(caps: &Captures<'_>, template: &str, vars: &HashMap<String, String>) -> Result<String> {
    let Some(name) = caps.get(1) else {
        return Ok("%".to_string());
    };
    vars.get(name.as_str())
        .cloned()
        .ok_or_else(|| Error::Template {
            message: format!("Undefined variable in '{}'", template),
            variable: Some(name.as_str().to_string()),
        })
}
