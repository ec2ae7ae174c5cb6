//! Property-based tests for name sanitization.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::name::{simplify, simplify_link, split_link};
    use proptest::prelude::*;

    // ============================================================================
    // simplify property tests
    // ============================================================================

    proptest! {
        /// Property: simplify is idempotent
        #[test]
        fn simplify_is_idempotent(input in ".*") {
            let once = simplify(&input);
            prop_assert_eq!(simplify(&once), once);
        }

        /// Property: simplify only ever emits ASCII word characters
        #[test]
        fn simplify_only_emits_word_chars(input in ".*") {
            let result = simplify(&input);
            prop_assert!(
                result.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "simplify produced '{}' from '{}'",
                result,
                input
            );
        }

        /// Property: simplify leaves word-only input untouched
        #[test]
        fn simplify_preserves_word_input(input in "[a-zA-Z0-9_]+") {
            let result = simplify(&input);
            prop_assert_eq!(result, input);
        }

        /// Property: simplify keeps the relative order of word characters
        #[test]
        fn simplify_keeps_word_char_order(input in "[a-z.\\-]{0,30}") {
            let expected: String = input.chars().filter(|c| c.is_ascii_lowercase()).collect();
            prop_assert_eq!(simplify(&input), expected);
        }
    }

    // ============================================================================
    // link rewriting property tests
    // ============================================================================

    proptest! {
        /// Property: rewriting a link never touches its alias
        #[test]
        fn simplify_link_keeps_alias(
            target in "[a-z.\\-]{1,20}",
            alias in "[a-z.]{1,20}",
        ) {
            let link = format!("{}:{}", target, alias);
            let rewritten = simplify_link(&link);
            let (new_target, new_alias) = split_link(&rewritten);
            prop_assert_eq!(new_target, simplify(&target));
            prop_assert_eq!(new_alias, Some(alias.as_str()));
        }

        /// Property: a bare link stays bare
        #[test]
        fn simplify_link_bare_has_no_alias(target in "[a-z.\\-]{1,20}") {
            let rewritten = simplify_link(&target);
            prop_assert!(!rewritten.contains(':'));
        }
    }
}
