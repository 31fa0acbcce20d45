//! Key-event routing for the dashboard.
//!
//! The core does not parse raw keystrokes beyond this table; the runtime
//! hands over `crossterm` key events and receives named actions.

#![allow(missing_docs)]

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Named input events consumed by the update function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    NextPool,
    PrevPool,
    VDevDown,
    VDevUp,
    ToggleExpanded,
    ForceRefresh,
}

/// Resolve a terminal key event to an action. Returns `None` for keys
/// the dashboard does not bind and for key-release events.
#[must_use]
pub fn resolve_key(key: &KeyEvent) -> Option<InputAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputAction::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(InputAction::Quit),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Some(InputAction::NextPool),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Some(InputAction::PrevPool),
        KeyCode::Down | KeyCode::Char('j') => Some(InputAction::VDevDown),
        KeyCode::Up | KeyCode::Char('k') => Some(InputAction::VDevUp),
        KeyCode::Enter | KeyCode::Char('e') => Some(InputAction::ToggleExpanded),
        KeyCode::Char('r') => Some(InputAction::ForceRefresh),
        _ => None,
    }
}

/// One-line key reference for the render footer.
#[must_use]
pub const fn help_line() -> &'static str {
    "Tab/←→ switch pool • ↑/↓ select vdev • e expand • r refresh • q quit"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_bindings() {
        assert_eq!(resolve_key(&press(KeyCode::Char('q'))), Some(InputAction::Quit));
        assert_eq!(resolve_key(&press(KeyCode::Esc)), Some(InputAction::Quit));
        assert_eq!(
            resolve_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputAction::Quit)
        );
    }

    #[test]
    fn pool_navigation_bindings() {
        for code in [KeyCode::Tab, KeyCode::Right, KeyCode::Char('l')] {
            assert_eq!(resolve_key(&press(code)), Some(InputAction::NextPool));
        }
        for code in [KeyCode::BackTab, KeyCode::Left, KeyCode::Char('h')] {
            assert_eq!(resolve_key(&press(code)), Some(InputAction::PrevPool));
        }
    }

    #[test]
    fn vdev_navigation_bindings() {
        for code in [KeyCode::Down, KeyCode::Char('j')] {
            assert_eq!(resolve_key(&press(code)), Some(InputAction::VDevDown));
        }
        for code in [KeyCode::Up, KeyCode::Char('k')] {
            assert_eq!(resolve_key(&press(code)), Some(InputAction::VDevUp));
        }
    }

    #[test]
    fn expand_and_refresh_bindings() {
        assert_eq!(
            resolve_key(&press(KeyCode::Enter)),
            Some(InputAction::ToggleExpanded)
        );
        assert_eq!(
            resolve_key(&press(KeyCode::Char('e'))),
            Some(InputAction::ToggleExpanded)
        );
        assert_eq!(
            resolve_key(&press(KeyCode::Char('r'))),
            Some(InputAction::ForceRefresh)
        );
    }

    #[test]
    fn unbound_keys_pass_through() {
        assert_eq!(resolve_key(&press(KeyCode::Char('x'))), None);
        assert_eq!(resolve_key(&press(KeyCode::F(5))), None);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(resolve_key(&key), None);
    }

    #[test]
    fn plain_c_is_not_quit() {
        assert_eq!(resolve_key(&press(KeyCode::Char('c'))), None);
    }
}
