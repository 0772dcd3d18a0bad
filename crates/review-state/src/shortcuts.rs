//! Keyboard shortcuts of the review grid

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyModifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    PrevPage,
    NextPage,
    SelectAll,
    ClearSelection,
    Save,
}

/// Map a `KeyboardEvent.key` to a grid shortcut.
///
/// While typing in a form field only the save combination is honored.
pub fn shortcut_for(key: &str, modifiers: KeyModifiers, in_form_field: bool) -> Option<Shortcut> {
    if modifiers.command() && key.eq_ignore_ascii_case("s") {
        return Some(Shortcut::Save);
    }
    if in_form_field {
        return None;
    }
    if modifiers.command() {
        return match key {
            "a" | "A" => Some(Shortcut::SelectAll),
            _ => None,
        };
    }
    match key {
        "ArrowLeft" => Some(Shortcut::PrevPage),
        "ArrowRight" | "Enter" => Some(Shortcut::NextPage),
        "Escape" => Some(Shortcut::ClearSelection),
        _ => None,
    }
}
