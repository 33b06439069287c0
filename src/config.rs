//! Mention configuration
//!
//! Holds the termination-character set (characters that may legally follow a
//! username) and the seed length cap. Loaded once at startup and immutable
//! thereafter.
//! - Stored as JSON under the local data directory
//! - Validated on construction and on load

use crate::error::{MentionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Characters that end a mention unless configured otherwise.
pub const DEFAULT_TERMINATION_CHARS: &str = "\n\r\t ;:,.!?<>\"'";

/// Seeds grow until they exceed this many characters.
pub const DEFAULT_SEED_LENGTH_CAP: usize = 10;

/// Validated mention configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentionConfig {
    termination_chars: BTreeSet<char>,
    seed_length_cap: usize,
}

/// On-disk representation
#[derive(Serialize, Deserialize)]
struct MentionConfigFile {
    termination_chars: String,
    #[serde(default)]
    seed_length_cap: Option<usize>,
}

impl MentionConfig {
    /// Build a config, rejecting sets that would make mentions unmatchable.
    pub fn new<I>(termination_chars: I, seed_length_cap: usize) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let termination_chars: BTreeSet<char> = termination_chars.into_iter().collect();
        if termination_chars.is_empty() {
            return Err(MentionError::EmptyTerminationSet);
        }
        if let Some(&c) = termination_chars
            .iter()
            .find(|c| c.is_alphanumeric() || **c == '_' || **c == '@')
        {
            return Err(MentionError::InvalidTerminationChar(c));
        }
        if seed_length_cap == 0 {
            return Err(MentionError::InvalidSeedCap);
        }

        Ok(Self {
            termination_chars,
            seed_length_cap,
        })
    }

    pub fn is_terminator(&self, c: char) -> bool {
        self.termination_chars.contains(&c)
    }

    pub fn termination_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.termination_chars.iter().copied()
    }

    pub fn seed_length_cap(&self) -> usize {
        self.seed_length_cap
    }

    /// Parse a config from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: MentionConfigFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    fn from_file(file: MentionConfigFile) -> Result<Self> {
        Self::new(
            file.termination_chars.chars(),
            file.seed_length_cap.unwrap_or(DEFAULT_SEED_LENGTH_CAP),
        )
    }

    /// Load config from `path`, falling back to the default if it doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no mention config file, using defaults");
            return Ok(Self::default());
        }

        let data = fs::read(path)?;
        let file: MentionConfigFile = serde_json::from_slice(&data)?;
        let config = Self::from_file(file)?;
        tracing::debug!(
            path = %path.display(),
            termination_chars = config.termination_chars.len(),
            seed_length_cap = config.seed_length_cap,
            "loaded mention config"
        );
        Ok(config)
    }

    /// Load config from the default location
    pub fn load_or_default() -> Result<Self> {
        Self::load(&config_path()?)
    }

    /// Save config to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = MentionConfigFile {
            termination_chars: self.termination_chars.iter().collect(),
            seed_length_cap: Some(self.seed_length_cap),
        };
        let data = serde_json::to_vec_pretty(&file)?;

        // Write to a temp file, then rename over the target
        let temp_path = path.with_extension("tmp");
        let mut out = fs::File::create(&temp_path)?;
        out.write_all(&data)?;
        out.sync_all()?;
        drop(out);

        fs::rename(&temp_path, path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            termination_chars: DEFAULT_TERMINATION_CHARS.chars().collect(),
            seed_length_cap: DEFAULT_SEED_LENGTH_CAP,
        }
    }
}

/// Get the default path of the config file
pub fn config_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir().ok_or(MentionError::DataDir)?;

    Ok(data_dir.join("mention-core").join("config.json"))
}
