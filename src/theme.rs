use ratatui::{prelude::*, style::Color};

pub const TITLE_STYLE: Style = Style::new()
    .add_modifier(Modifier::BOLD)
    .add_modifier(Modifier::UNDERLINED);

pub const HINT_STYLE: Style = Style::new().add_modifier(Modifier::DIM);

pub const SELECTED_STYLE: Style = Style::new().bg(Color::DarkGray);

pub const PLAIN_STYLE: Style = Style::new().fg(Color::White);

pub const ERROR_STYLE: Style = Style::new().fg(Color::Red);

pub const WARN_STYLE: Style = Style::new().fg(Color::Yellow);

pub const INFO_STYLE: Style = Style::new().fg(Color::Blue);

pub const DEBUG_STYLE: Style = Style::new().fg(Color::DarkGray);

// detail block value styles
pub const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
pub const STRING_STYLE: Style = Style::new().fg(Color::Green);
pub const NUMBER_STYLE: Style = Style::new().fg(Color::Yellow);
pub const BOOL_STYLE: Style = Style::new().fg(Color::Magenta);
pub const NULL_STYLE: Style = Style::new().fg(Color::DarkGray);

/// style for a level token; unknown levels stay unstyled
pub fn level_style(level: &str) -> Style {
    match level.to_ascii_uppercase().as_str() {
        "ERROR" => ERROR_STYLE,
        "WARN" | "WARNING" => WARN_STYLE,
        "INFO" => INFO_STYLE,
        "DEBUG" => DEBUG_STYLE,
        _ => Style::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_style_is_case_insensitive() {
        assert_eq!(level_style("error"), ERROR_STYLE);
        assert_eq!(level_style("Warning"), WARN_STYLE);
    }

    #[test]
    fn test_unknown_level_is_unstyled() {
        assert_eq!(level_style("TRACE"), Style::new());
    }
}
