use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::Key;

/// Where key presses come from
pub trait InputSource {
    /// Next pending key, without blocking. At most one key per call.
    fn poll_key(&mut self) -> io::Result<Option<Key>>;
    /// Block until a key is pressed.
    fn wait_key(&mut self) -> io::Result<Key>;
}

/// Keyboard input read straight from the terminal
pub struct TerminalInput;

impl TerminalInput {
    fn read_key() -> io::Result<Option<Key>> {
        Ok(match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(decode(key)),
            // repaint at the new size
            Event::Resize(..) => Some(Key::Redraw),
            _ => None,
        })
    }
}

impl InputSource for TerminalInput {
    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        while event::poll(Duration::ZERO)? {
            if let Some(key) = Self::read_key()? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }

    fn wait_key(&mut self) -> io::Result<Key> {
        loop {
            if let Some(key) = Self::read_key()? {
                return Ok(key);
            }
        }
    }
}

pub fn decode(key: KeyEvent) -> Key {
    // Raw mode swallows SIGINT, so Ctrl+C arrives as a key
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Key::Quit;
    }
    match key.code {
        KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Left => Key::Left,
        KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Right => Key::Right,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Key::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Key::Redraw,
        KeyCode::Char('p') | KeyCode::Char('P') => Key::Pause,
        _ => Key::Other,
    }
}
