use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveDown,
    MoveUp,
    PageDown,
    PageUp,
    GoTop,
    GoBottom,
    Select,
    OpenUrl,
    OpenPermalink,
    OpenAuthor,
    CopyLink,
    Back,
    Refresh,
    ToggleHelp,
    Quit,
}

#[derive(Debug, Default)]
pub struct KeyState {
    pending_g: bool,
}

impl KeyState {
    pub fn on_key(&mut self, key: KeyEvent) -> Option<Action> {
        if let (KeyCode::Char('g'), KeyModifiers::NONE) = (key.code, key.modifiers) {
            if self.pending_g {
                self.pending_g = false;
                return Some(Action::GoTop);
            }
            self.pending_g = true;
            return None;
        }

        self.pending_g = false;
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
                Some(Action::PageDown)
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => {
                Some(Action::PageUp)
            }
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                Some(Action::MoveDown)
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Some(Action::MoveUp),
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => Some(Action::GoBottom),
            (KeyCode::Home, _) => Some(Action::GoTop),
            (KeyCode::Enter, _) => Some(Action::Select),
            (KeyCode::Char('o'), KeyModifiers::NONE) => Some(Action::OpenUrl),
            (KeyCode::Char('c'), KeyModifiers::NONE) => Some(Action::OpenPermalink),
            (KeyCode::Char('u'), KeyModifiers::NONE) => Some(Action::OpenAuthor),
            (KeyCode::Char('y'), KeyModifiers::NONE) => Some(Action::CopyLink),
            (KeyCode::Char('r'), KeyModifiers::NONE) => Some(Action::Refresh),
            (KeyCode::Char('?'), _) => Some(Action::ToggleHelp),
            (KeyCode::Char('q'), KeyModifiers::NONE) => Some(Action::Quit),
            (KeyCode::Esc, _)
            | (KeyCode::Backspace, _)
            | (KeyCode::Left, _)
            | (KeyCode::Char('h'), KeyModifiers::NONE) => Some(Action::Back),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn double_g_goes_top() {
        let mut state = KeyState::default();
        assert_eq!(state.on_key(key(KeyCode::Char('g'))), None);
        assert_eq!(state.on_key(key(KeyCode::Char('g'))), Some(Action::GoTop));
    }

    #[test]
    fn interrupted_g_chord_resets() {
        let mut state = KeyState::default();
        assert_eq!(state.on_key(key(KeyCode::Char('g'))), None);
        assert_eq!(
            state.on_key(key(KeyCode::Char('j'))),
            Some(Action::MoveDown)
        );
        assert_eq!(state.on_key(key(KeyCode::Char('g'))), None);
    }

    #[test]
    fn ctrl_c_quits_and_plain_c_opens_permalink() {
        let mut state = KeyState::default();
        assert_eq!(
            state.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            state.on_key(key(KeyCode::Char('c'))),
            Some(Action::OpenPermalink)
        );
    }

    #[test]
    fn shifted_g_goes_bottom() {
        let mut state = KeyState::default();
        assert_eq!(
            state.on_key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Action::GoBottom)
        );
    }

    #[test]
    fn back_keys() {
        let mut state = KeyState::default();
        for code in [KeyCode::Esc, KeyCode::Backspace, KeyCode::Left, KeyCode::Char('h')] {
            assert_eq!(state.on_key(key(code)), Some(Action::Back));
        }
    }
}
