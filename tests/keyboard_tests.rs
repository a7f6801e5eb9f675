// Host-side tests for pure keyboard functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod keyboard {
    include!("../src/events/keyboard.rs");
}

use keyboard::*;

#[test]
fn f_toggles_fullscreen_in_either_case() {
    assert_eq!(shortcut_for_key("f"), Some(Shortcut::ToggleFullscreen));
    assert_eq!(shortcut_for_key("F"), Some(Shortcut::ToggleFullscreen));
}

#[test]
fn m_and_space_toggle_music() {
    assert_eq!(shortcut_for_key("m"), Some(Shortcut::ToggleMusic));
    assert_eq!(shortcut_for_key("M"), Some(Shortcut::ToggleMusic));
    assert_eq!(shortcut_for_key(" "), Some(Shortcut::ToggleMusic));
}

#[test]
fn other_keys_are_ignored() {
    for key in ["a", "h", "Enter", "Escape", "Spacebar", "", "ff", "ArrowUp", "1"] {
        assert_eq!(shortcut_for_key(key), None, "key {:?} should be ignored", key);
    }
}

#[test]
fn text_entry_elements_keep_their_keys() {
    assert!(is_text_entry("INPUT"));
    assert!(is_text_entry("textarea"));
    assert!(is_text_entry("Select"));
    assert!(!is_text_entry("BUTTON"));
    assert!(!is_text_entry("DIV"));
    assert!(!is_text_entry("A"));
}
