use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

/// Popup size for the link/image dialog.
const PROMPT_WIDTH: u16 = 60;
const PROMPT_HEIGHT: u16 = 8;

pub fn render_prompt_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(dialog) = &model.prompt else {
        return;
    };
    let popup = centered_popup_rect(PROMPT_WIDTH, PROMPT_HEIGHT, area);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let lines = vec![
        Line::styled(
            dialog.question(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(vec![
            Span::raw("> "),
            Span::raw(dialog.input.clone()),
            Span::styled(" ", Style::default().bg(Color::White)),
        ]),
        Line::raw(""),
        Line::styled("Enter confirms · Esc cancels", dim_style),
    ];

    let block = Block::default()
        .title(dialog.title())
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
