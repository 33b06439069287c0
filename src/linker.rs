//! Mention linking
//!
//! Rewrites text by replacing confirmed `@username` mentions with links to
//! the user's profile. Everything that is not a confirmed mention is copied
//! through unchanged.
//!
//! An `@` may start a mention when it is the first character of the
//! unscanned text or when it follows a termination character. A glued `@`
//! (as in `foo@bar`) is copied through without lookup.

use crate::candidate::MentionCandidate;
use crate::config::MentionConfig;
use crate::cursor::TextCursor;
use crate::matcher::find_match;

/// Linking result: who was mentioned (in order, repeats kept) and the
/// rewritten text.
#[derive(Debug)]
pub struct LinkedText<'c, U> {
    pub mentioned: Vec<&'c U>,
    pub html: String,
}

/// Render a single mention as an HTML link.
///
/// The profile URL and username are inserted verbatim, so both must come
/// from a trusted user directory.
pub fn format_mention_html<U: MentionCandidate + ?Sized>(user: &U) -> String {
    format!("<a href=\"{}\">@{}</a>", user.profile_url(), user.username())
}

pub fn linkify<'c, U: MentionCandidate>(
    text: &str,
    candidates: &'c [U],
    config: &MentionConfig,
) -> LinkedText<'c, U> {
    let mut html = String::with_capacity(text.len());
    let mut mentioned = Vec::new();
    let mut cursor = TextCursor::new(text);

    loop {
        let rest = cursor.rest();
        let Some(pos) = rest.find('@') else {
            html.push_str(rest);
            break;
        };

        html.push_str(&rest[..pos]);

        // A trailing `@` has nothing to match against.
        if pos + 1 == rest.len() {
            html.push('@');
            break;
        }

        let eligible = pos == 0
            || cursor
                .char_before(pos)
                .is_some_and(|c| config.is_terminator(c));
        cursor.advance(pos + 1);

        if !eligible {
            html.push('@');
            continue;
        }

        match find_match(cursor.rest(), candidates, config) {
            Some(found) => {
                html.push_str(&format_mention_html(found.candidate));
                mentioned.push(found.candidate);
                cursor.advance(found.consumed);
            }
            None => html.push('@'),
        }
    }

    if !mentioned.is_empty() {
        tracing::debug!(mentions = mentioned.len(), "linked mentions");
    }

    LinkedText { mentioned, html }
}
