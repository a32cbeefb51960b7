use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use crate::app::model::Mode;
use crate::app::{App, Message, Model};
use crate::editor::{Direction, FormatOp, HeadingLevel, Motion, Shortcut};

use super::event_loop::ResizeDebouncer;

/// Rows moved per mouse wheel notch.
const WHEEL_STEP: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => {
                if model.prompt.is_some() {
                    // Dialog answers are single-line.
                    Some(Message::PromptInput(text.replace(['\r', '\n'], "")))
                } else if model.mode == Mode::Edit {
                    Some(Message::InsertText(text.replace("\r\n", "\n")))
                } else {
                    None
                }
            }
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        // The dialog is modal.
        if model.prompt.is_some() {
            return match key.code {
                KeyCode::Enter => Some(Message::PromptSubmit),
                KeyCode::Esc => Some(Message::PromptCancel),
                KeyCode::Backspace => Some(Message::PromptBackspace),
                KeyCode::Char('c') if ctrl => Some(Message::PromptCancel),
                KeyCode::Char(c) if !ctrl && !alt => Some(Message::PromptInput(c.to_string())),
                _ => None,
            };
        }

        // Application keys work in both modes.
        if ctrl {
            match key.code {
                KeyCode::Char('q' | 'c') => return Some(Message::Quit),
                KeyCode::Char('s') => return Some(Message::Save),
                KeyCode::Char('p') => return Some(Message::TogglePreview),
                _ => {}
            }
        }

        let page = (model.viewport.height() as usize).max(1);
        if model.mode == Mode::Preview {
            return match key.code {
                KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollUp(1)),
                KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollDown(1)),
                KeyCode::PageUp => Some(Message::ScrollUp(page)),
                KeyCode::PageDown | KeyCode::Char(' ') => Some(Message::ScrollDown(page)),
                KeyCode::Esc | KeyCode::Char('e') => Some(Message::TogglePreview),
                KeyCode::Char('q') => Some(Message::Quit),
                _ => None,
            };
        }

        if let Some(shortcut) = crate::editor::dispatch(&key) {
            return Some(Message::Shortcut(shortcut));
        }
        if ctrl {
            return match key.code {
                // Terminals without keyboard enhancement cannot report Ctrl+Shift+Z.
                KeyCode::Char('y') => Some(Message::Shortcut(Shortcut::Redo)),
                KeyCode::Char('a') => Some(Message::SelectAll),
                KeyCode::Left => Some(Message::Move(Motion::WordLeft, shift)),
                KeyCode::Right => Some(Message::Move(Motion::WordRight, shift)),
                KeyCode::Home => Some(Message::Move(Motion::Start, shift)),
                KeyCode::End => Some(Message::Move(Motion::Finish, shift)),
                _ => None,
            };
        }
        if key
            .modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META)
        {
            return None;
        }
        if alt {
            return toolbar_key(key.code).map(|op| match op {
                ToolbarKey::Format(op) => Message::Format(op),
                ToolbarKey::Emoji => Message::InsertEmoji,
            });
        }

        match key.code {
            KeyCode::Char(c) => Some(Message::InsertChar(c)),
            KeyCode::Tab => Some(Message::InsertText("    ".to_string())),
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Left => Some(Message::Move(Motion::Step(Direction::Left), shift)),
            KeyCode::Right => Some(Message::Move(Motion::Step(Direction::Right), shift)),
            KeyCode::Up => Some(Message::Move(Motion::Step(Direction::Up), shift)),
            KeyCode::Down => Some(Message::Move(Motion::Step(Direction::Down), shift)),
            KeyCode::Home => Some(Message::Move(Motion::Home, shift)),
            KeyCode::End => Some(Message::Move(Motion::End, shift)),
            KeyCode::PageUp => Some(Message::ScrollUp(page)),
            KeyCode::PageDown => Some(Message::ScrollDown(page)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.prompt.is_some() {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_STEP)),
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_STEP)),
            MouseEventKind::Down(MouseButton::Left) if model.mode == Mode::Edit => {
                let (line, col) = editor_position(model, mouse.column, mouse.row)?;
                Some(Message::MoveTo(line, col))
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

enum ToolbarKey {
    Format(FormatOp),
    Emoji,
}

/// Alt+key bindings for toolbar operations without a Ctrl shortcut.
fn toolbar_key(code: KeyCode) -> Option<ToolbarKey> {
    let KeyCode::Char(c) = code else {
        return None;
    };
    let op = match c.to_ascii_lowercase() {
        '1' => FormatOp::Heading(HeadingLevel::H1),
        '2' => FormatOp::Heading(HeadingLevel::H2),
        '3' => FormatOp::Heading(HeadingLevel::H3),
        's' => FormatOp::Strikethrough,
        'c' => FormatOp::Code,
        'q' => FormatOp::Quote,
        'l' => FormatOp::BulletList,
        'n' => FormatOp::NumberedList,
        'k' => FormatOp::Link,
        'm' => FormatOp::Image,
        'h' => FormatOp::HorizontalRule,
        'e' => return Some(ToolbarKey::Emoji),
        _ => return None,
    };
    Some(ToolbarKey::Format(op))
}

/// Map a screen cell on the editing surface to a document (line, col).
fn editor_position(model: &Model, column: u16, row: u16) -> Option<(usize, usize)> {
    let (width, height) = model.terminal_size;
    let area = Rect::new(0, 0, width, height);
    let surface = crate::ui::regions(area, model.min_rows, model.active_toast().is_some()).surface;
    if row < surface.y || row >= surface.y + surface.height {
        return None;
    }
    let gutter = crate::ui::gutter_width(model.editor.buffer().line_count());
    let text_x = surface.x + gutter;
    let line = model.viewport.offset() + (row - surface.y) as usize;
    let display_col = column.saturating_sub(text_x) as usize;
    let col = model
        .editor
        .buffer()
        .line_at(line)
        .map_or(display_col, |text| char_at_display_col(&text, display_col));
    Some((line, col))
}

/// Char index under terminal column `target` of `text`; wide chars take two.
pub(super) fn char_at_display_col(text: &str, target: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in text.chars().enumerate() {
        let w = ch.width().unwrap_or(0);
        if width + w > target {
            return idx;
        }
        width += w;
    }
    text.chars().count()
}
