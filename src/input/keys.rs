//! Key names used by the binding tables.
//!
//! Bindings are written as short strings (`"j"`, `"c-w"`, `"pgup"`,
//! `"escape"`) so multi-key sequences read the same way they are typed.

use termion::event::{Event, Key};

/// Returns the binding name of a termion key, or None for keys with no name.
///
/// # Example
///
/// ```
/// use termion::event::Key;
/// use hexquill::input::keys::key_name;
///
/// assert_eq!(key_name(Key::Char('j')).as_deref(), Some("j"));
/// assert_eq!(key_name(Key::Ctrl('w')).as_deref(), Some("c-w"));
/// assert_eq!(key_name(Key::Esc).as_deref(), Some("escape"));
/// ```
pub fn key_name(key: Key) -> Option<String> {
    let name = match key {
        Key::Char('\n') | Key::Char('\r') => "enter".to_string(),
        Key::Char('\t') => "tab".to_string(),
        Key::Char(c) => c.to_string(),
        // termion reports 0x1d as Ctrl-5
        Key::Ctrl(']') | Key::Ctrl('5') => "c-]".to_string(),
        Key::Ctrl(c) => format!("c-{}", c.to_ascii_lowercase()),
        Key::Alt(c) => format!("m-{}", c),
        Key::Esc => "escape".to_string(),
        Key::Backspace => "backspace".to_string(),
        Key::Delete => "delete".to_string(),
        Key::Insert => "insert".to_string(),
        Key::Up => "up".to_string(),
        Key::Down => "down".to_string(),
        Key::Left => "left".to_string(),
        Key::Right => "right".to_string(),
        Key::Home => "home".to_string(),
        Key::End => "end".to_string(),
        Key::PageUp => "pgup".to_string(),
        Key::PageDown => "pgdn".to_string(),
        Key::BackTab => "backtab".to_string(),
        Key::F(n) => format!("f{}", n),
        Key::Null => "c-@".to_string(),
        _ => return None,
    };
    Some(name)
}

/// Extracts the key from a terminal event, ignoring mouse and unsupported events.
pub fn event_key(event: Event) -> Option<Key> {
    match event {
        Event::Key(key) => Some(key),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_characters() {
        assert_eq!(key_name(Key::Char('x')).as_deref(), Some("x"));
        assert_eq!(key_name(Key::Char('G')).as_deref(), Some("G"));
        assert_eq!(key_name(Key::Char('$')).as_deref(), Some("$"));
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(key_name(Key::Char('\n')).as_deref(), Some("enter"));
        assert_eq!(key_name(Key::Char('\t')).as_deref(), Some("tab"));
        assert_eq!(key_name(Key::Ctrl('a')).as_deref(), Some("c-a"));
        assert_eq!(key_name(Key::Ctrl('5')).as_deref(), Some("c-]"));
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(key_name(Key::PageUp).as_deref(), Some("pgup"));
        assert_eq!(key_name(Key::PageDown).as_deref(), Some("pgdn"));
        assert_eq!(key_name(Key::Backspace).as_deref(), Some("backspace"));
        assert_eq!(key_name(Key::F(1)).as_deref(), Some("f1"));
    }

    #[test]
    fn test_event_key_ignores_other_events() {
        assert_eq!(event_key(Event::Key(Key::Up)), Some(Key::Up));
        assert_eq!(event_key(Event::Unsupported(vec![0x1b])), None);
    }
}
