//! Colors for markdown source and preview HTML.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

/// Block-level kind of a markdown source line, by its leading marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLine {
    Heading(u8),
    Quote,
    ListItem,
    Rule,
    Fence,
    Text,
}

impl SourceLine {
    pub fn classify(line: &str) -> Self {
        let hashes = line.chars().take_while(|&c| c == '#').count();
        if (1..=3).contains(&hashes) && line[hashes..].starts_with(' ') {
            // At most 3 ASCII '#' bytes.
            #[allow(clippy::cast_possible_truncation)]
            return Self::Heading(hashes as u8);
        }
        if line == "---" {
            return Self::Rule;
        }
        if line.starts_with("```") {
            return Self::Fence;
        }
        if line.starts_with("> ") {
            return Self::Quote;
        }
        if line.starts_with("- ") || line.starts_with("* ") || is_numbered_item(line) {
            return Self::ListItem;
        }
        Self::Text
    }
}

fn is_numbered_item(line: &str) -> bool {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && line[digits..].starts_with(". ")
}

/// Style for a whole markdown source line on the editing surface.
pub fn style_for_source_line(kind: SourceLine) -> Style {
    match kind {
        SourceLine::Heading(1) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        SourceLine::Heading(2) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        SourceLine::Heading(_) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        SourceLine::Quote => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::ITALIC),
        SourceLine::ListItem => Style::default().fg(Color::Magenta),
        SourceLine::Rule | SourceLine::Fence => Style::default()
            .fg(Color::Indexed(245))
            .add_modifier(Modifier::DIM),
        SourceLine::Text => Style::default(),
    }
}

pub fn gutter_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn caret_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

pub fn selection_style() -> Style {
    Style::default().bg(Color::Blue).fg(Color::White)
}

pub fn placeholder_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

/// HTML tags in the preview.
pub fn tag_style() -> Style {
    Style::default().fg(Color::Cyan)
}
