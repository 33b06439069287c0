//! Name seed extraction
//!
//! Harvests the short fragments following each `@` that could be usernames.
//! The result is only a lookup key set for the user directory: no real users
//! are consulted here.

use crate::config::MentionConfig;
use crate::cursor::TextCursor;
use std::collections::HashSet;

/// Extract the distinct name seeds of `text`.
///
/// A seed starts right after an `@` and stops at a termination character,
/// at the next `@`, at the end of the text, or once it has grown past the
/// seed length cap (so the longest seed is `cap + 1` characters). The
/// following `@` is never consumed, so every `@` starts its own seed.
pub fn extract_name_seeds(text: &str, config: &MentionConfig) -> HashSet<String> {
    let mut seeds = HashSet::new();
    let max_len = config.seed_length_cap().saturating_add(1);

    let mut cursor = TextCursor::new(text);
    while cursor.skip_past('@') {
        let seed: String = cursor
            .rest()
            .chars()
            .take_while(|&c| c != '@' && !config.is_terminator(c))
            .take(max_len)
            .collect();

        if !seed.is_empty() {
            seeds.insert(seed);
        }
    }

    seeds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds(text: &str) -> Vec<String> {
        let config = MentionConfig::new(" .,".chars(), 10).unwrap();
        let mut out: Vec<String> = extract_name_seeds(text, &config).into_iter().collect();
        out.sort();
        out
    }

    #[test]
    fn test_no_at_sign() {
        assert!(seeds("").is_empty());
        assert!(seeds("hello world").is_empty());
    }

    #[test]
    fn test_terminated_seeds() {
        assert_eq!(seeds("hi @bob. and @alice, bye"), vec!["alice", "bob"]);
    }

    #[test]
    fn test_seed_runs_to_end_of_text() {
        assert_eq!(seeds("ping @carol"), vec!["carol"]);
    }

    #[test]
    fn test_trailing_at_yields_nothing() {
        assert!(seeds("mail me @").is_empty());
    }

    #[test]
    fn test_terminator_right_after_at() {
        assert!(seeds("@ hello").is_empty());
        assert!(seeds("@.").is_empty());
    }

    #[test]
    fn test_adjacent_at_signs() {
        assert_eq!(seeds("@@bob"), vec!["bob"]);
        assert_eq!(seeds("@a@b"), vec!["a", "b"]);
    }

    #[test]
    fn test_glued_at_still_harvested() {
        assert_eq!(seeds("foo@bar"), vec!["bar"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(seeds("@bob @bob @bob."), vec!["bob"]);
    }

    #[test]
    fn test_seed_cap() {
        let run = "abcdefghijklmno";
        assert_eq!(run.len(), 15);
        assert_eq!(seeds(&format!("@{run}")), vec!["abcdefghijk"]);
        assert_eq!(seeds(&format!("@{run} tail")), vec!["abcdefghijk"]);
    }

    #[test]
    fn test_exactly_eleven_chars() {
        assert_eq!(seeds("@abcdefghijk"), vec!["abcdefghijk"]);
        assert_eq!(seeds("@abcdefghijk."), vec!["abcdefghijk"]);
        assert_eq!(seeds("@abcdefghij"), vec!["abcdefghij"]);
    }

    #[test]
    fn test_capped_seed_does_not_swallow_next_at() {
        assert_eq!(
            seeds("@abcdefghijklmn@zed"),
            vec!["abcdefghijk", "zed"]
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(seeds("@ééééééééééééé"), vec!["ééééééééééé"]);
    }

    #[test]
    fn test_unbounded_cap() {
        let config = MentionConfig::from_json(
            r#"{"termination_chars":" ","seed_length_cap":18446744073709551615}"#,
        )
        .unwrap();
        let found = extract_name_seeds("hi @bob @abcdefghijklmnopqrstuvwxyz", &config);
        assert_eq!(found.len(), 2);
        assert!(found.contains("bob"));
        assert!(found.contains("abcdefghijklmnopqrstuvwxyz"));
    }

    #[test]
    fn test_spaces_split_multiword_names() {
        assert_eq!(seeds("thanks @John Doe"), vec!["John"]);
    }
}
