use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use kvui_ui::InputEvent;

/// Maps a terminal key press to a browser event. Releases, repeats and
/// unbound keys map to `None`.
pub fn input_event(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(InputEvent::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => Some(InputEvent::CursorUp),
        KeyCode::Down => Some(InputEvent::CursorDown),
        KeyCode::Left => Some(InputEvent::FocusLeft),
        KeyCode::Right => Some(InputEvent::FocusRight),
        KeyCode::Char(' ') => Some(InputEvent::Select),
        KeyCode::Char('q') => Some(InputEvent::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn arrows_space_and_quit_keys() {
        let none = KeyModifiers::NONE;
        assert_eq!(input_event(&press(KeyCode::Up, none)), Some(InputEvent::CursorUp));
        assert_eq!(
            input_event(&press(KeyCode::Down, none)),
            Some(InputEvent::CursorDown)
        );
        assert_eq!(
            input_event(&press(KeyCode::Left, none)),
            Some(InputEvent::FocusLeft)
        );
        assert_eq!(
            input_event(&press(KeyCode::Right, none)),
            Some(InputEvent::FocusRight)
        );
        assert_eq!(
            input_event(&press(KeyCode::Char(' '), none)),
            Some(InputEvent::Select)
        );
        assert_eq!(
            input_event(&press(KeyCode::Char('q'), none)),
            Some(InputEvent::Quit)
        );
        assert_eq!(
            input_event(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
    }

    #[test]
    fn unbound_and_released_keys_are_ignored() {
        assert_eq!(input_event(&press(KeyCode::Char('c'), KeyModifiers::NONE)), None);
        assert_eq!(input_event(&press(KeyCode::Up, KeyModifiers::CONTROL)), None);

        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(input_event(&release), None);
    }
}
