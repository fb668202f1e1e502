use ratatui::style::Color;
use hexquill::theme::{colors::ThemeColors, get_builtin_theme, list_builtin_themes};

// Tests for get_builtin_theme function

#[test]
fn test_default_dark_theme_exists() {
    let theme = get_builtin_theme("default-dark");
    assert!(theme.is_some());
}

#[test]
fn test_invalid_theme_returns_none() {
    let theme = get_builtin_theme("nonexistent");
    assert!(theme.is_none());
}

#[test]
fn test_theme_name_is_preserved() {
    for name in list_builtin_themes() {
        let theme = get_builtin_theme(&name).unwrap();
        assert_eq!(theme.name, name);
    }
}

#[test]
fn test_builtin_theme_list() {
    let names = list_builtin_themes();
    assert!(names.contains(&"default-dark".to_string()));
    assert!(names.contains(&"default-light".to_string()));
    assert!(names.contains(&"gruvbox-dark".to_string()));

    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

// Tests for byte classes

#[test]
fn test_dark_theme_byte_colors() {
    let colors = ThemeColors::default_dark();

    assert_eq!(colors.byte_color(0x00), Color::DarkGray);
    assert_eq!(colors.byte_color(b'A'), Color::Green);
    assert_eq!(colors.byte_color(b'~'), Color::Green);
    assert_eq!(colors.byte_color(0x7f), Color::Gray);
    assert_eq!(colors.byte_color(0xff), Color::Gray);
}

#[test]
fn test_byte_classes_are_distinct() {
    for name in list_builtin_themes() {
        let colors = get_builtin_theme(&name).unwrap().colors;
        assert_ne!(colors.byte_color(b'a'), colors.byte_color(0x80), "{}", name);
        assert_ne!(colors.cursor, colors.background, "{}", name);
    }
}
