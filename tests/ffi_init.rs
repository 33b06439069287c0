use mention_core::{free_string, mention_extract_seeds, mention_init};
use std::ffi::{CStr, CString};

// Owns the process-wide engine: this binary must stay the only caller of
// `mention_init`.
#[test]
fn test_mention_init_installs_engine_once() {
    let config = CString::new(r#"{"termination_chars": "-", "seed_length_cap": 2}"#).unwrap();
    let other = CString::new(r#"{"termination_chars": " "}"#).unwrap();

    unsafe {
        assert_eq!(mention_init(config.as_ptr()), 0);
        assert_eq!(mention_init(other.as_ptr()), -2);
        assert_eq!(mention_init(config.as_ptr()), -2);
    }

    // Seeds follow the installed config: `-` ends a seed, a space does not,
    // and seeds stop at three characters.
    let text = CString::new("@ab-cd @a b").unwrap();
    let ptr = unsafe { mention_extract_seeds(text.as_ptr()) };
    assert!(!ptr.is_null());
    let json = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
    free_string(ptr);

    assert_eq!(json, r#"["a b","ab"]"#);
}
