/// Page-level keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    ToggleFullscreen,
    ToggleMusic,
}

#[inline]
pub fn shortcut_for_key(key: &str) -> Option<Shortcut> {
    match key {
        "f" | "F" => Some(Shortcut::ToggleFullscreen),
        "m" | "M" | " " => Some(Shortcut::ToggleMusic),
        _ => None,
    }
}

/// Keys typed into these elements belong to the element, not the page.
#[inline]
pub fn is_text_entry(tag_name: &str) -> bool {
    matches!(
        tag_name.to_ascii_uppercase().as_str(),
        "INPUT" | "TEXTAREA" | "SELECT"
    )
}
