//! Storage module
//!
//! SQLite-backed user directory used to resolve name seeds.
//! Tables:
//! - users(user_id TEXT PRIMARY KEY, username TEXT UNIQUE, profile_url TEXT, last_active INTEGER)

use crate::candidate::UserRef;
use crate::directory::UserDirectory;
use crate::error::{MentionError, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Upper bound on users returned per seed lookup.
pub const DEFAULT_LOOKUP_LIMIT: u32 = 50;

pub struct UserStore {
    conn: Connection,
    lookup_limit: u32,
}

impl UserStore {
    /// Initialize storage and create tables if they don't exist.
    pub fn init(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;

        // WAL lets readers run alongside the writer
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::with_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS users (
                user_id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                profile_url TEXT NOT NULL,
                last_active INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS users_last_active ON users (last_active);
            ",
        )?;

        Ok(Self {
            conn,
            lookup_limit: DEFAULT_LOOKUP_LIMIT,
        })
    }

    pub fn with_lookup_limit(mut self, limit: u32) -> Self {
        self.lookup_limit = limit;
        self
    }

    /// Insert or update a user (keyed on user_id).
    pub fn upsert_user(&self, user: &UserRef, last_active: i64) -> Result<()> {
        if user.username.is_empty() {
            return Err(MentionError::InvalidUser("username must not be empty".to_string()));
        }

        self.conn.execute(
            "INSERT INTO users (user_id, username, profile_url, last_active)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id) DO UPDATE SET
                username = excluded.username,
                profile_url = excluded.profile_url,
                last_active = excluded.last_active",
            params![&user.user_id, &user.username, &user.profile_url, last_active],
        )?;
        Ok(())
    }

    /// Record activity for a user. Returns false if the user is unknown.
    pub fn touch(&self, user_id: &str, last_active: i64) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE users SET last_active = ?2 WHERE user_id = ?1",
            params![user_id, last_active],
        )?;
        Ok(changed > 0)
    }

    pub fn get_user(&self, user_id: &str) -> Result<Option<UserRef>> {
        let user = self
            .conn
            .query_row(
                "SELECT user_id, username, profile_url FROM users WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok(UserRef {
                        user_id: row.get(0)?,
                        username: row.get(1)?,
                        profile_url: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Users whose username starts with any seed (case-sensitive), most
    /// recently active first.
    pub fn find_by_name_seeds(&self, seeds: &HashSet<String>, limit: u32) -> Result<Vec<UserRef>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT user_id, username, profile_url, last_active
             FROM users
             WHERE substr(username, 1, length(?1)) = ?1
             ORDER BY last_active DESC, username ASC
             LIMIT ?2",
        )?;

        let mut hits: Vec<(i64, UserRef)> = Vec::new();
        let mut seen = HashSet::new();
        for seed in seeds {
            let rows = stmt.query_map(params![seed, limit as i64], |row| {
                Ok((
                    row.get::<_, i64>(3)?,
                    UserRef {
                        user_id: row.get(0)?,
                        username: row.get(1)?,
                        profile_url: row.get(2)?,
                    },
                ))
            })?;

            for r in rows {
                let (last_active, user) = r?;
                if seen.insert(user.user_id.clone()) {
                    hits.push((last_active, user));
                }
            }
        }

        // Seeds come from a set, so restore a stable order across them
        hits.sort_by(|(a_active, a), (b_active, b)| {
            b_active.cmp(a_active).then_with(|| a.username.cmp(&b.username))
        });
        hits.truncate(limit as usize);

        tracing::debug!(seeds = seeds.len(), users = hits.len(), "resolved name seeds");
        Ok(hits.into_iter().map(|(_, user)| user).collect())
    }
}

impl UserDirectory for UserStore {
    fn find_by_name_seeds(&self, seeds: &HashSet<String>) -> Result<Vec<UserRef>> {
        UserStore::find_by_name_seeds(self, seeds, self.lookup_limit)
    }
}

/// Get the storage path for the SQLite database.
pub fn db_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir().ok_or(MentionError::DataDir)?;
    Ok(data_dir.join("mention-core").join("users.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> UserRef {
        UserRef::new(id, name, format!("/users/{id}/{name}/")).unwrap()
    }

    fn seeds(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn names(users: &[UserRef]) -> Vec<&str> {
        users.iter().map(|u| u.username.as_str()).collect()
    }

    #[test]
    fn test_upsert_and_get() {
        let store = UserStore::open_in_memory().unwrap();
        store.upsert_user(&user("1", "bob"), 10).unwrap();
        store.upsert_user(&user("1", "bobby"), 20).unwrap();

        let got = store.get_user("1").unwrap().unwrap();
        assert_eq!(got.username, "bobby");
        assert!(store.get_user("2").unwrap().is_none());
    }

    #[test]
    fn test_username_is_unique() {
        let store = UserStore::open_in_memory().unwrap();
        store.upsert_user(&user("1", "bob"), 10).unwrap();
        let err = store.upsert_user(&user("2", "bob"), 10).unwrap_err();
        assert!(matches!(err, MentionError::Storage(_)));
    }

    #[test]
    fn test_rejects_empty_username() {
        let store = UserStore::open_in_memory().unwrap();
        let bad = UserRef {
            user_id: "1".to_string(),
            username: String::new(),
            profile_url: "/".to_string(),
        };
        assert!(matches!(
            store.upsert_user(&bad, 0),
            Err(MentionError::InvalidUser(_))
        ));
    }

    #[test]
    fn test_seed_lookup_orders_by_activity() {
        let store = UserStore::open_in_memory().unwrap();
        store.upsert_user(&user("1", "bob"), 10).unwrap();
        store.upsert_user(&user("2", "bobby"), 30).unwrap();
        store.upsert_user(&user("3", "alice"), 20).unwrap();
        store.upsert_user(&user("4", "Bob"), 40).unwrap();

        let found = UserDirectory::find_by_name_seeds(&store, &seeds(&["bob", "ali"])).unwrap();
        assert_eq!(names(&found), vec!["bobby", "alice", "bob"]);

        assert!(store.touch("1", 50).unwrap());
        assert!(!store.touch("9", 50).unwrap());
        let found = store.find_by_name_seeds(&seeds(&["bob"]), 10).unwrap();
        assert_eq!(names(&found), vec!["bob", "bobby"]);
    }

    #[test]
    fn test_seed_lookup_treats_wildcards_literally() {
        let store = UserStore::open_in_memory().unwrap();
        store.upsert_user(&user("1", "a_b"), 10).unwrap();
        store.upsert_user(&user("2", "axb"), 10).unwrap();

        let found = store.find_by_name_seeds(&seeds(&["a_"]), 10).unwrap();
        assert_eq!(names(&found), vec!["a_b"]);
        assert!(store.find_by_name_seeds(&seeds(&["%"]), 10).unwrap().is_empty());
    }

    #[test]
    fn test_lookup_limit_and_dedup() {
        let store = UserStore::open_in_memory().unwrap().with_lookup_limit(2);
        for (i, name) in ["ann", "anna", "annie"].iter().enumerate() {
            store.upsert_user(&user(&i.to_string(), name), i as i64).unwrap();
        }

        let found = UserDirectory::find_by_name_seeds(&store, &seeds(&["ann", "anni"])).unwrap();
        assert_eq!(names(&found), vec!["annie", "anna"]);
    }

    #[test]
    fn test_init_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db").join("users.db");
        {
            let store = UserStore::init(&path).unwrap();
            store.upsert_user(&user("1", "bob"), 1).unwrap();
        }
        let store = UserStore::init(&path).unwrap();
        assert!(store.get_user("1").unwrap().is_some());
    }
}
