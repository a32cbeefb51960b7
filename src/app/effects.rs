use anyhow::{Context, Result};

use crate::app::{App, Message, Model, ToastLevel};

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if matches!(msg, Message::Save) {
            match save_document(model) {
                Ok(Some(path)) => model.show_toast(ToastLevel::Info, format!("Saved {path}")),
                Ok(None) => model.show_toast(
                    ToastLevel::Warning,
                    "No file to save to; the draft is printed on exit",
                ),
                Err(err) => {
                    tracing::warn!(error = %err, "save failed");
                    model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
                }
            }
            // The toast row takes space from the surface.
            model.sync_viewport();
        }
    }
}

/// Commit pending typing and write the document to the model's file.
///
/// Returns the displayed path, or `None` when the model has no file.
pub(super) fn save_document(model: &mut Model) -> Result<Option<String>> {
    let Some(path) = model.file_path.clone() else {
        return Ok(None);
    };
    model.editor.flush();
    let value = model.editor.value();
    std::fs::write(&path, &value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    model.mark_saved();
    model.quit_confirmed = false;
    tracing::debug!(path = %path.display(), chars = value.chars().count(), "document saved");
    Ok(Some(path.display().to_string()))
}
