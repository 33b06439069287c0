//! Mention Core Library
//!
//! Detects `@username` mentions in free-form user text:
//! - Name seed extraction (directory lookup keys)
//! - Candidate matching with termination-character boundaries
//! - Linking confirmed mentions into HTML
//! - SQLite-backed user directory
//!
//! The engine itself is pure and synchronous. A C ABI is exposed for host
//! applications that embed the library.

pub mod candidate;
pub mod config;
pub mod cursor;
pub mod directory;
pub mod engine;
pub mod error;
pub mod linker;
pub mod matcher;
pub mod seeds;
pub mod storage;

pub use candidate::{MentionCandidate, UserRef};
pub use config::MentionConfig;
pub use directory::{MemoryDirectory, UserDirectory};
pub use engine::{MentionEngine, RenderedText};
pub use error::{MentionError, Result};
pub use linker::{format_mention_html, linkify, LinkedText};
pub use matcher::{find_match, match_first, MentionMatch};
pub use seeds::extract_name_seeds;
pub use storage::UserStore;

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

static ENGINE: OnceCell<MentionEngine> = OnceCell::new();

/// Process-wide engine used by the C ABI. Falls back to the default
/// configuration when `mention_init` was never called.
fn engine() -> &'static MentionEngine {
    ENGINE.get_or_init(MentionEngine::default)
}

/// Read a borrowed C string. Null or non-UTF-8 input yields `None`.
unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

fn to_c_json<T: Serialize>(value: &T) -> *mut c_char {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize ffi result");
            return std::ptr::null_mut();
        }
    };
    match CString::new(json) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Install the process-wide engine from a JSON config
/// (`{"termination_chars": " .,", "seed_length_cap": 10}`).
///
/// Returns 0 on success, -1 for invalid input, -2 if already initialised.
///
/// # Safety
/// `config_json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn mention_init(config_json: *const c_char) -> i32 {
    let Some(json) = read_str(config_json) else {
        return -1;
    };

    let config = match MentionConfig::from_json(json) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "rejected mention config");
            return -1;
        }
    };

    match ENGINE.set(MentionEngine::new(config)) {
        Ok(()) => 0,
        Err(_) => -2,
    }
}

/// Extract name seeds as a sorted JSON array of strings.
///
/// Returns null for invalid input. Free the result with `free_string`.
///
/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn mention_extract_seeds(text: *const c_char) -> *mut c_char {
    let Some(text) = read_str(text) else {
        return std::ptr::null_mut();
    };

    let mut seeds: Vec<String> = engine().extract_name_seeds(text).into_iter().collect();
    seeds.sort();
    to_c_json(&seeds)
}

/// Link mentions in `text` against a JSON array of candidate users
/// (`[{"user_id": "..", "username": "..", "profile_url": ".."}]`).
///
/// Returns `{"mentioned": [...], "html": "..."}` as JSON, or null for
/// invalid input. Free the result with `free_string`.
///
/// # Safety
/// Both pointers must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn mention_linkify(
    text: *const c_char,
    candidates_json: *const c_char,
) -> *mut c_char {
    let (Some(text), Some(json)) = (read_str(text), read_str(candidates_json)) else {
        return std::ptr::null_mut();
    };

    let candidates: Vec<UserRef> = match serde_json::from_str(json) {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!(error = %e, "invalid candidate list");
            return std::ptr::null_mut();
        }
    };
    if candidates.iter().any(|u| u.username.is_empty()) {
        tracing::warn!("candidate list contains an empty username");
        return std::ptr::null_mut();
    }

    let linked = engine().linkify(text, &candidates);
    to_c_json(&RenderedText {
        mentioned: linked.mentioned.into_iter().cloned().collect(),
        html: linked.html,
    })
}

/// Free a CString allocated by Rust
///
/// Call this from the host after reading a returned string
#[no_mangle]
pub extern "C" fn free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
