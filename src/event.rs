use crossterm::event::KeyEvent;

/// Terminal input delivered to the app, one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
}
