use crate::game::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Turn(Direction),
    Quit,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (m, _) if !normal_modifiers.contains(m) => None,
            (_, KeyCode::Char('w' | 'W')) => Some(Command::Turn(Direction::Up)),
            (_, KeyCode::Char('s' | 'S')) => Some(Command::Turn(Direction::Down)),
            (_, KeyCode::Char('a' | 'A')) => Some(Command::Turn(Direction::Left)),
            (_, KeyCode::Char('d' | 'D')) => Some(Command::Turn(Direction::Right)),
            (_, KeyCode::Char('x' | 'X')) => Some(Command::Quit),
            _ => None,
        }
    }
}
