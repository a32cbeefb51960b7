use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph, Wrap};

use super::style::{self, SourceLine};
use super::{overlays, status};
use crate::app::{Mode, Model};
use crate::editor::Selection;

/// Line separator the preview is split on for display.
const PREVIEW_BREAK: &str = "<br />";

pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let regions = super::regions(area, model.min_rows, model.active_toast().is_some());

    render_toolbar(model, frame, regions.toolbar);
    match model.mode {
        Mode::Edit => render_editor(model, frame, regions.surface),
        Mode::Preview => render_preview(model, frame, regions.surface),
    }
    status::render_toast_bar(model, frame, regions.toast);
    status::render_status_bar(model, frame, regions.status);

    if model.prompt.is_some() {
        overlays::render_prompt_overlay(model, frame, area);
    }
}

/// Number of display lines the preview of `html` occupies before wrapping.
pub fn preview_line_count(html: &str) -> usize {
    html.split_inclusive(PREVIEW_BREAK).count().max(1)
}

fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect) {
    let active = Style::default().bg(Color::White).fg(Color::Black);
    let idle = Style::default();
    let disabled = Style::default().fg(Color::DarkGray);
    let sep = Span::styled(" │ ", Style::default().fg(Color::DarkGray));
    let (edit_style, preview_style) = match model.mode {
        Mode::Edit => (active, idle),
        Mode::Preview => (idle, active),
    };
    let undo_style = if model.editor.can_undo() { idle } else { disabled };
    let redo_style = if model.editor.can_redo() { idle } else { disabled };

    let spans = vec![
        Span::styled(" Edit ", edit_style),
        Span::styled(" Preview ", preview_style),
        sep.clone(),
        Span::styled("undo", undo_style),
        Span::raw(" "),
        Span::styled("redo", redo_style),
        sep.clone(),
        Span::raw("H1 H2 H3"),
        sep.clone(),
        Span::styled("B", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled("I", Style::default().add_modifier(Modifier::ITALIC)),
        Span::raw(" "),
        Span::styled("S", Style::default().add_modifier(Modifier::CROSSED_OUT)),
        Span::raw(" `code`"),
        sep.clone(),
        Span::raw("- 1. >"),
        sep.clone(),
        Span::raw("link img emoji"),
        sep,
        Span::raw("---"),
    ];
    let toolbar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(toolbar, area);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let buf = model.editor.buffer();
    let gutter = super::gutter_width(buf.line_count());
    let number_width = gutter.saturating_sub(1) as usize;
    let line_number =
        |idx: usize| Span::styled(format!("{:>number_width$} ", idx + 1), style::gutter_style());

    let mut content: Vec<Line> = Vec::new();
    if buf.is_empty() {
        // Caret drawn over the first placeholder character.
        let placeholder = &model.editor.config().placeholder;
        let mut chars = placeholder.chars();
        let first = chars.next().map_or_else(|| " ".to_string(), String::from);
        content.push(Line::from(vec![
            line_number(0),
            Span::styled(first, style::caret_style()),
            Span::styled(chars.as_str().to_string(), style::placeholder_style()),
        ]));
    } else {
        let selection = buf.selection();
        let caret = buf.caret();
        for line_idx in model.viewport.visible_range() {
            let text = buf.line_at(line_idx).unwrap_or_default();
            let base = style::style_for_source_line(SourceLine::classify(&text));
            let mut spans = vec![line_number(line_idx)];
            spans.extend(line_spans(
                &text,
                buf.line_start(line_idx),
                selection,
                caret,
                base,
            ));
            content.push(Line::from(spans));
        }
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// Spans for one source line with the selection and caret painted in.
fn line_spans(
    text: &str,
    line_start: usize,
    selection: Selection,
    caret: usize,
    base: Style,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = base;
    let mut len = 0;
    for (i, ch) in text.chars().enumerate() {
        let pos = line_start + i;
        let cell_style = if pos == caret {
            style::caret_style()
        } else if pos >= selection.start && pos < selection.end {
            style::selection_style()
        } else {
            base
        };
        if cell_style != run_style {
            if !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            run_style = cell_style;
        }
        run.push(if ch == '\t' { ' ' } else { ch });
        len = i + 1;
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    if caret == line_start + len {
        spans.push(Span::styled(" ", style::caret_style()));
    }
    spans
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let html = model.editor.preview();
    let lines: Vec<Line> = html
        .split_inclusive(PREVIEW_BREAK)
        .map(highlight_tags)
        .collect();
    let scroll = u16::try_from(model.preview_scroll).unwrap_or(u16::MAX);
    let preview = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(Clear, area);
    frame.render_widget(preview, area);
}

/// Color `<...>` tags in a line of preview HTML.
fn highlight_tags(segment: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut rest = segment;
    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        if open > 0 {
            spans.push(Span::raw(rest[..open].to_string()));
        }
        let end = open + close + 1;
        spans.push(Span::styled(rest[open..end].to_string(), style::tag_style()));
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_line_spans_paint_caret_at_line_end() {
        let spans = line_spans("abc", 0, Selection::caret(3), 3, Style::default());
        assert_eq!(text_of(&spans), "abc ");
        assert_eq!(spans.last().map(|s| s.style), Some(style::caret_style()));
    }

    #[test]
    fn test_line_spans_split_selection_runs() {
        let spans = line_spans("hello", 10, Selection::new(11, 13), 13, Style::default());
        let texts: Vec<_> = spans.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(texts, ["h", "el", "l", "o"]);
        assert_eq!(spans[1].style, style::selection_style());
        assert_eq!(spans[2].style, style::caret_style());
    }

    #[test]
    fn test_highlight_tags_separates_markup() {
        let line = highlight_tags("<strong>hi</strong> there<br />");
        let texts: Vec<_> = line.spans.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(texts, ["<strong>", "hi", "</strong>", " there", "<br />"]);
    }

    #[test]
    fn test_preview_line_count() {
        assert_eq!(preview_line_count(""), 1);
        assert_eq!(preview_line_count("a"), 1);
        assert_eq!(preview_line_count("a<br />b<br />c"), 3);
    }
}
