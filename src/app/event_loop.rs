use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::editor::Editor;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the editor until the user quits and return the final document.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<String> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; stackit-editor requires an interactive terminal")?;
        let size = terminal.size()?;

        // Ctrl+Shift+Z and Ctrl+Shift+Enter are only distinguishable with
        // the kitty keyboard protocol.
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
        }
        execute!(stdout(), EnableBracketedPaste, EnableMouseCapture)?;

        let editor = Editor::new(&self.initial, self.config.clone());
        let mut model = Model::new(editor, self.file_path.clone(), (size.width, size.height));
        if self.preview {
            model = update(model, Message::TogglePreview);
        }

        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
        if enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        ratatui::restore();

        result?;
        Ok(std::mem::take(&mut model).editor.finish())
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let elapsed_ms = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                model.sync_viewport();
                needs_render = true;
            }

            let now_ms = elapsed_ms();
            let was_coalescing = model.editor.is_coalescing();
            *model = update(std::mem::take(model), Message::Tick(now_ms));
            if was_coalescing && !model.editor.is_coalescing() {
                // Undo/redo affordances changed.
                needs_render = true;
            }

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            // Wake up in time for the typing commit deadline.
            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                model
                    .editor
                    .commit_deadline_ms()
                    .map_or(250, |deadline| deadline.saturating_sub(now_ms).clamp(1, 250))
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Coalesce key repeat bursts into a single render.
                loop {
                    let event_ms = elapsed_ms();
                    let event = event::read()?;
                    if let Some(msg) =
                        Self::handle_event(&event, model, event_ms, &mut resize_debouncer)
                    {
                        tracing::trace!(?msg, "event.message");
                        *model = update(std::mem::take(model), Message::Tick(event_ms));
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &side_msg);
                        needs_render = true;
                    }
                    if model.should_quit || !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
