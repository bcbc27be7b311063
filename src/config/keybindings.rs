//! Keyboard bindings for the demo.

use crate::model::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to demo actions.
///
/// Arrow keys and vim-style letters both work.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers take part in the lookup; key kind and state
    /// are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let none = KeyModifiers::NONE;
        let entries = [
            // Line scrolling
            (KeyCode::Char('j'), none, KeyAction::ScrollDown),
            (KeyCode::Char('k'), none, KeyAction::ScrollUp),
            (KeyCode::Down, none, KeyAction::ScrollDown),
            (KeyCode::Up, none, KeyAction::ScrollUp),
            // Page navigation
            (KeyCode::PageDown, none, KeyAction::PageDown),
            (KeyCode::PageUp, none, KeyAction::PageUp),
            (KeyCode::Char(' '), none, KeyAction::PageDown),
            (KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown),
            (KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp),
            // Jumps
            (KeyCode::Char('g'), none, KeyAction::ScrollToTop),
            (KeyCode::Home, none, KeyAction::ScrollToTop),
            (KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom),
            (KeyCode::Char('G'), none, KeyAction::ScrollToBottom),
            (KeyCode::End, none, KeyAction::ScrollToBottom),
            // Application controls
            (KeyCode::Char('q'), none, KeyAction::Quit),
            (KeyCode::Esc, none, KeyAction::Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit),
        ];

        let bindings = entries
            .into_iter()
            .map(|(code, modifiers, action)| (KeyEvent::new(code, modifiers), action))
            .collect();

        Self { bindings }
    }
}
