//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Configuration for all keybindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub back: Vec<String>,
    pub submit: Vec<String>,
    pub toggle_explore: Vec<String>,
    pub next_category: Vec<String>,
    pub prev_category: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub page_up: Vec<String>,
    pub page_down: Vec<String>,
    pub retry: Vec<String>,
    pub open_image: Vec<String>,
    pub delete_char: Vec<String>,
    pub clear_input: Vec<String>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        let keys = |keys: &[&str]| keys.iter().map(|k| k.to_string()).collect::<Vec<_>>();
        Self {
            quit: keys(&["Ctrl+c"]),
            back: keys(&["Esc"]),
            submit: keys(&["Enter"]),
            toggle_explore: keys(&["Tab"]),
            next_category: keys(&["Right"]),
            prev_category: keys(&["Left"]),
            move_up: keys(&["Up"]),
            move_down: keys(&["Down"]),
            page_up: keys(&["PageUp"]),
            page_down: keys(&["PageDown"]),
            retry: keys(&["Ctrl+r"]),
            open_image: keys(&["Ctrl+o"]),
            delete_char: keys(&["Backspace"]),
            clear_input: keys(&["Ctrl+u"]),
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event.
    ///
    /// Configured bindings win; any other printable character without
    /// Ctrl/Alt is text input for the search box.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let bindings: [(&[String], Action); 14] = [
            (self.quit.as_slice(), Action::Quit),
            (self.back.as_slice(), Action::Back),
            (self.submit.as_slice(), Action::Submit),
            (self.toggle_explore.as_slice(), Action::ToggleExplore),
            (self.next_category.as_slice(), Action::NextCategory),
            (self.prev_category.as_slice(), Action::PrevCategory),
            (self.move_up.as_slice(), Action::MoveUp),
            (self.move_down.as_slice(), Action::MoveDown),
            (self.page_up.as_slice(), Action::PageUp),
            (self.page_down.as_slice(), Action::PageDown),
            (self.retry.as_slice(), Action::Retry),
            (self.open_image.as_slice(), Action::OpenImage),
            (self.delete_char.as_slice(), Action::DeleteChar),
            (self.clear_input.as_slice(), Action::ClearInput),
        ];

        if let Some((_, action)) = bindings
            .iter()
            .find(|(keys, _)| self.matches_key(key, keys))
        {
            return *action;
        }

        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Action::Input(c)
            }
            _ => Action::None,
        }
    }

    fn matches_key(&self, key: &KeyEvent, bindings: &[String]) -> bool {
        bindings
            .iter()
            .filter_map(|binding| parse_key_string(binding).ok())
            .any(|parsed| parsed.matches(key))
    }
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Check if this binding matches a key event.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string into a KeyBinding.
///
/// Supported formats:
/// - Single characters: "a", "A", "1", "/"
/// - Special keys: "Enter", "Tab", "BackTab", "Backspace", "Delete", "Home", "End",
///   "PageUp", "PageDown", "Up", "Down", "Left", "Right", "Esc", "Space", "F1"-"F12"
/// - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter", "Ctrl+Shift+a"
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('+').collect();

    let mut modifiers = KeyModifiers::NONE;
    let key_part = if parts.len() > 1 {
        // Parse modifiers
        for part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" => modifiers |= KeyModifiers::ALT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }
        parts[parts.len() - 1]
    } else {
        s
    };

    let code = parse_key_code(key_part)?;

    Ok(KeyBinding { code, modifiers })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    // Check for special keys (case-insensitive)
    match s.to_lowercase().as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        other => other
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F)
            .ok_or_else(|| format!("Unknown key: {}", s)),
    }
}
