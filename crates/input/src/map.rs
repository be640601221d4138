//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Key releases are ignored so terminals that report them do not flip twice.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameAction::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GameAction::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::Move(Direction::Down))
        }

        // Actions
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::Flip),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameAction::NewGame),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::TogglePause),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(GameAction::ResetStats),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Left)),
            Some(GameAction::Move(Direction::Left))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Right)),
            Some(GameAction::Move(Direction::Right))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Up)),
            Some(GameAction::Move(Direction::Up))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Down)),
            Some(GameAction::Move(Direction::Down))
        );

        assert_eq!(
            handle_key_event(key(KeyCode::Char('H'))),
            Some(GameAction::Move(Direction::Left))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('k'))),
            Some(GameAction::Move(Direction::Up))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('s'))),
            Some(GameAction::Move(Direction::Down))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('D'))),
            Some(GameAction::Move(Direction::Right))
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Enter)), Some(GameAction::Flip));
        assert_eq!(handle_key_event(key(KeyCode::Char(' '))), Some(GameAction::Flip));
        assert_eq!(handle_key_event(key(KeyCode::Char('n'))), Some(GameAction::NewGame));
        assert_eq!(handle_key_event(key(KeyCode::Char('P'))), Some(GameAction::TogglePause));
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), Some(GameAction::ResetStats));
        assert_eq!(handle_key_event(key(KeyCode::Char('?'))), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(key(KeyCode::Char('q'))));
        assert!(should_quit(key(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(key(KeyCode::Char('c'))));
        assert!(!should_quit(key(KeyCode::Char('x'))));
    }
}
