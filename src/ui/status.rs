use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Mode, Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let dirty_indicator = if model.file_path.is_some() && model.is_dirty() {
        " [modified]"
    } else {
        ""
    };
    let (label, bg, hints) = match model.mode {
        Mode::Edit => {
            let c = model.editor.buffer().cursor();
            (
                format!(" EDIT  Ln {}, Col {}", c.line + 1, c.col + 1),
                Color::Magenta,
                "Ctrl+P:preview  Ctrl+S:save  Ctrl+Q:quit",
            )
        }
        Mode::Preview => (
            " PREVIEW".to_string(),
            Color::Blue,
            "Esc:edit  Ctrl+S:save  Ctrl+Q:quit",
        ),
    };

    let status = format!(
        "{label}  {}{dirty_indicator}  {} words · {} characters  {hints}",
        model.file_name(),
        model.editor.word_count(),
        model.editor.char_count(),
    );
    let status_bar = Paragraph::new(status).style(Style::default().bg(bg).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
