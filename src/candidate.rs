//! Mention candidates
//!
//! The engine only needs two read accessors from a user, so any user type
//! can take part in matching by implementing [`MentionCandidate`].

use crate::error::{MentionError, Result};
use serde::{Deserialize, Serialize};

pub trait MentionCandidate {
    /// Exact, case-sensitive username. Never empty.
    fn username(&self) -> &str;
    fn profile_url(&self) -> &str;
}

impl<T: MentionCandidate + ?Sized> MentionCandidate for &T {
    fn username(&self) -> &str {
        (**self).username()
    }

    fn profile_url(&self) -> &str {
        (**self).profile_url()
    }
}

/// User record as returned by a user directory
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub user_id: String,
    pub username: String,
    pub profile_url: String,
}

impl UserRef {
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        profile_url: impl Into<String>,
    ) -> Result<Self> {
        let username = username.into();
        if username.is_empty() {
            return Err(MentionError::InvalidUser("username must not be empty".to_string()));
        }

        Ok(Self {
            user_id: user_id.into(),
            username,
            profile_url: profile_url.into(),
        })
    }
}

impl MentionCandidate for UserRef {
    fn username(&self) -> &str {
        &self.username
    }

    fn profile_url(&self) -> &str {
        &self.profile_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_username() {
        assert!(UserRef::new("1", "", "/users/1/").is_err());

        let user = UserRef::new("1", "bob", "/users/1/bob/").unwrap();
        assert_eq!(user.username(), "bob");
        assert_eq!((&user).profile_url(), "/users/1/bob/");
    }

    #[test]
    fn test_json_shape() {
        let user: UserRef = serde_json::from_str(
            r#"{"user_id":"7","username":"alice","profile_url":"/users/7/alice/"}"#,
        )
        .unwrap();
        assert_eq!(user.user_id, "7");
        assert_eq!(user.username, "alice");
    }
}
