//! Mention engine
//!
//! Binds a [`MentionConfig`] to the seed extractor and linker, and runs the
//! full pipeline: harvest seeds, resolve them through a user directory, then
//! link the text against the resulting candidates.

use crate::candidate::{MentionCandidate, UserRef};
use crate::config::MentionConfig;
use crate::directory::UserDirectory;
use crate::error::Result;
use crate::linker::{self, LinkedText};
use crate::seeds;
use serde::Serialize;
use std::collections::HashSet;

/// Stateless once built; share it freely between threads.
#[derive(Clone, Debug, Default)]
pub struct MentionEngine {
    config: MentionConfig,
}

/// Output of [`MentionEngine::render`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedText {
    pub mentioned: Vec<UserRef>,
    pub html: String,
}

impl MentionEngine {
    pub fn new(config: MentionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MentionConfig {
        &self.config
    }

    pub fn extract_name_seeds(&self, text: &str) -> HashSet<String> {
        seeds::extract_name_seeds(text, &self.config)
    }

    pub fn linkify<'c, U: MentionCandidate>(
        &self,
        text: &str,
        candidates: &'c [U],
    ) -> LinkedText<'c, U> {
        linker::linkify(text, candidates, &self.config)
    }

    /// Link `text` against `anticipated` users (e.g. thread participants,
    /// tried first in the given order) plus whatever the directory returns
    /// for the name seeds found in the text.
    pub fn render<D: UserDirectory + ?Sized>(
        &self,
        text: &str,
        anticipated: &[UserRef],
        directory: &D,
    ) -> Result<RenderedText> {
        let seeds = self.extract_name_seeds(text);

        let mut candidates: Vec<UserRef> = Vec::with_capacity(anticipated.len());
        let mut usernames = HashSet::new();
        for user in anticipated {
            if user.username.is_empty() {
                tracing::warn!(user_id = %user.user_id, "skipping candidate with empty username");
                continue;
            }
            if usernames.insert(user.username.as_str()) {
                candidates.push(user.clone());
            }
        }

        if !seeds.is_empty() {
            let found = directory.find_by_name_seeds(&seeds)?;
            tracing::debug!(
                seeds = seeds.len(),
                found = found.len(),
                "looked up mention candidates"
            );
            let extra: Vec<UserRef> = found
                .into_iter()
                .filter(|u| !u.username.is_empty() && !usernames.contains(u.username.as_str()))
                .collect();
            candidates.extend(extra);
        }

        let linked = self.linkify(text, &candidates);
        Ok(RenderedText {
            mentioned: linked.mentioned.into_iter().cloned().collect(),
            html: linked.html,
        })
    }
}
