use crate::app::model::{Mode, PromptDialog};
use crate::app::{Model, ToastLevel};
use crate::editor::{DeclinePrompt, Direction, EMOJI_PALETTE, FormatOp, Motion, Shortcut};

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Type a character over the selection
    InsertChar(char),
    /// Type a string over the selection (paste, tab)
    InsertText(String),
    /// Plain Enter
    SplitLine,
    /// Backspace
    DeleteBack,
    /// Delete
    DeleteForward,
    /// Move the caret, extending the selection when the flag is set
    Move(Motion, bool),
    /// Place the caret at (line, col), e.g. from a mouse click
    MoveTo(usize, usize),
    SelectAll,
    /// An editor keyboard shortcut
    Shortcut(Shortcut),
    /// A toolbar formatting operation
    Format(FormatOp),
    /// Insert the next emoji from the palette
    InsertEmoji,

    // Link/image dialog
    PromptInput(String),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,

    // View
    TogglePreview,
    ScrollUp(usize),
    ScrollDown(usize),

    // Window and time
    /// Milliseconds since the loop started
    Tick(u64),
    Resize(u16, u16),

    // Application
    /// Write the document to its file
    Save,
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// Saving is the only side effect and is performed by the event loop
/// after `update` returns.
pub fn update(mut model: Model, msg: Message) -> Model {
    if !matches!(msg, Message::Quit | Message::Save | Message::Tick(_)) {
        model.quit_confirmed = false;
    }

    match msg {
        Message::InsertChar(ch) if model.mode == Mode::Edit => {
            model.editor.type_char(ch, model.clock_ms);
        }
        Message::InsertText(text) if model.mode == Mode::Edit => {
            model.editor.type_text(&text, model.clock_ms);
        }
        Message::SplitLine if model.mode == Mode::Edit => {
            model.editor.type_char('\n', model.clock_ms);
        }
        Message::DeleteBack if model.mode == Mode::Edit => {
            model.editor.delete_back(model.clock_ms);
        }
        Message::DeleteForward if model.mode == Mode::Edit => {
            model.editor.delete_forward(model.clock_ms);
        }
        Message::Move(motion, extend) => model.editor.navigate(motion, extend),
        Message::MoveTo(line, col) => model.editor.move_to(line, col),
        Message::SelectAll => model.editor.select_all(),
        Message::Shortcut(Shortcut::Link) if model.mode == Mode::Edit => {
            model.prompt = PromptDialog::open(FormatOp::Link);
        }
        Message::Shortcut(shortcut) if model.mode == Mode::Edit => {
            model.editor.execute(shortcut, &mut DeclinePrompt);
        }
        Message::Format(op) if model.mode == Mode::Edit => {
            if let Some(dialog) = PromptDialog::open(op) {
                model.prompt = Some(dialog);
            } else {
                model.editor.apply(op, &mut DeclinePrompt);
            }
        }
        Message::InsertEmoji if model.mode == Mode::Edit => {
            let index = model.emoji_cursor;
            model.editor.apply(FormatOp::Emoji(index), &mut DeclinePrompt);
            model.emoji_cursor = (index + 1) % EMOJI_PALETTE.len();
        }

        Message::PromptInput(text) => {
            if let Some(dialog) = &mut model.prompt {
                dialog.input.push_str(&text);
            }
        }
        Message::PromptBackspace => {
            if let Some(dialog) = &mut model.prompt {
                dialog.input.pop();
            }
        }
        Message::PromptSubmit => {
            if let Some(dialog) = &mut model.prompt {
                let input = dialog.input.clone();
                if dialog.answer(Some(input)) {
                    finish_prompt(&mut model);
                }
            }
        }
        Message::PromptCancel => {
            if let Some(dialog) = &mut model.prompt {
                dialog.answer(None);
                finish_prompt(&mut model);
            }
        }

        Message::TogglePreview => {
            model.mode = match model.mode {
                Mode::Edit => Mode::Preview,
                Mode::Preview => Mode::Edit,
            };
            model.preview_scroll = 0;
        }
        Message::ScrollUp(n) => match model.mode {
            Mode::Edit => step_lines(&mut model, Direction::Up, n),
            Mode::Preview => model.preview_scroll = model.preview_scroll.saturating_sub(n),
        },
        Message::ScrollDown(n) => match model.mode {
            Mode::Edit => step_lines(&mut model, Direction::Down, n),
            Mode::Preview => {
                let max = crate::ui::preview_line_count(&model.editor.preview()).saturating_sub(1);
                model.preview_scroll = (model.preview_scroll + n).min(max);
            }
        },

        Message::Tick(now_ms) => {
            model.clock_ms = model.clock_ms.max(now_ms);
            model.editor.tick(model.clock_ms);
        }
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
        }

        Message::Save => {}
        Message::Quit => {
            if model.file_path.is_some() && model.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }

        // Editing messages while the preview is shown.
        _ => {}
    }

    model.sync_viewport();
    model
}

fn finish_prompt(model: &mut Model) {
    let Some(dialog) = model.prompt.take() else {
        return;
    };
    // An abandoned link or image leaves no trace.
    let (op, mut script) = dialog.into_script();
    model.editor.apply(op, &mut script);
}

fn step_lines(model: &mut Model, direction: Direction, n: usize) {
    for _ in 0..n {
        model.editor.navigate(Motion::Step(direction), false);
    }
}
