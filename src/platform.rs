//! Platform-specific shortcut handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Platform-appropriate modifier accepted alongside Ctrl
/// - macOS: SUPER (Cmd key, when the terminal forwards it)
/// - Linux/Windows: CONTROL
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Next step shortcut display
pub const NEXT_SHORTCUT: &str = "Ctrl+N";

/// Previous step shortcut display
pub const PREVIOUS_SHORTCUT: &str = "Ctrl+P";

/// Submit shortcut display
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// True for `Ctrl+<c>` (or the platform modifier) regardless of case
pub fn is_shortcut(key: &KeyEvent, c: char) -> bool {
    let modified = key.modifiers.contains(KeyModifiers::CONTROL)
        || key.modifiers.contains(SHORTCUT_MODIFIER);
    modified && matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
}
