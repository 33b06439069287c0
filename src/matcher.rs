//! Candidate matching
//!
//! Decides whether the text right after an `@` begins with one of the
//! candidate usernames. Candidates are tried in the order given and the
//! first structural match wins.

use crate::candidate::MentionCandidate;
use crate::config::MentionConfig;

/// A confirmed mention: the candidate plus how many bytes of text it consumed.
#[derive(Debug)]
pub struct MentionMatch<'c, U> {
    pub candidate: &'c U,
    pub consumed: usize,
}

/// Find the first candidate whose username starts `text` and is followed
/// either by the end of the text or by a termination character.
///
/// A username followed by any other character (`bob` in `bobby`) is a near
/// miss and the next candidate is tried.
pub fn find_match<'c, U: MentionCandidate>(
    text: &str,
    candidates: &'c [U],
    config: &MentionConfig,
) -> Option<MentionMatch<'c, U>> {
    if text.is_empty() {
        return None;
    }

    for candidate in candidates {
        let username = candidate.username();
        if username.is_empty() {
            continue;
        }
        let Some(after) = text.strip_prefix(username) else {
            continue;
        };

        match after.chars().next() {
            None => {}
            Some(c) if config.is_terminator(c) => {}
            Some(c) => {
                tracing::trace!(username, next = %c, "near miss on mention candidate");
                continue;
            }
        }

        return Some(MentionMatch {
            candidate,
            consumed: username.len(),
        });
    }

    None
}

/// Match `text` against `candidates`, returning the matched candidate (if
/// any) and the unconsumed remainder. Without a match `text` comes back
/// unchanged.
pub fn match_first<'t, 'c, U: MentionCandidate>(
    text: &'t str,
    candidates: &'c [U],
    config: &MentionConfig,
) -> (Option<&'c U>, &'t str) {
    match find_match(text, candidates, config) {
        Some(found) => (Some(found.candidate), &text[found.consumed..]),
        None => (None, text),
    }
}
