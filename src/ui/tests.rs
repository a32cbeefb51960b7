use super::*;
use crate::app::{Message, Model, update};
use crate::config::EditorConfig;
use crate::editor::{Editor, Selection};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::path::PathBuf;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(100, 30);
    Terminal::new(backend).unwrap()
}

fn model_with(text: &str) -> Model {
    Model::new(
        Editor::new(text, EditorConfig::default()),
        Some(PathBuf::from("question.md")),
        (100, 30),
    )
}

fn screen(model: &Model) -> String {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|c| c.symbol()).collect()
}

fn row(model: &Model, y: u16) -> String {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol().to_string())
        .collect()
}

#[test]
fn test_empty_document_shows_placeholder() {
    let model = model_with("");
    let content = screen(&model);
    assert!(content.contains("Start typing..."), "placeholder missing");
}

#[test]
fn test_custom_placeholder_is_used() {
    let config = EditorConfig {
        placeholder: "Describe your problem".to_string(),
        ..EditorConfig::default()
    };
    let model = Model::new(Editor::new("", config), None, (100, 30));
    assert!(screen(&model).contains("Describe your problem"));
}

#[test]
fn test_placeholder_hidden_once_text_exists() {
    let model = model_with("Hello");
    let content = screen(&model);
    assert!(content.contains("Hello"));
    assert!(!content.contains("Start typing..."));
}

#[test]
fn test_editor_shows_line_numbers() {
    let model = model_with("first\nsecond");
    assert!(row(&model, 1).starts_with("1 first"));
    assert!(row(&model, 2).starts_with("2 second"));
}

#[test]
fn test_toolbar_shows_mode_tabs() {
    let model = model_with("x");
    let toolbar = row(&model, 0);
    assert!(toolbar.contains("Edit"));
    assert!(toolbar.contains("Preview"));
    assert!(toolbar.contains("undo"));
}

#[test]
fn test_status_bar_shows_counts_and_file() {
    let model = model_with("two words");
    let status = row(&model, 29);
    assert!(status.contains("question.md"), "{status}");
    assert!(status.contains("2 words"), "{status}");
    assert!(status.contains("9 characters"), "{status}");
    assert!(status.contains("EDIT"));
}

#[test]
fn test_status_bar_marks_unsaved_file() {
    let model = update(model_with("a"), Message::InsertChar('b'));
    assert!(row(&model, 29).contains("[modified]"));
}

#[test]
fn test_preview_mode_renders_html() {
    let model = update(model_with("**hi**\n# Title"), Message::TogglePreview);
    let content = screen(&model);
    assert!(content.contains("<strong>hi</strong><br />"));
    assert!(content.contains("<h1>Title</h1>"));
    assert!(row(&model, 29).contains("PREVIEW"));
}

#[test]
fn test_preview_of_empty_document() {
    let model = update(model_with(""), Message::TogglePreview);
    assert!(screen(&model).contains("Nothing to preview..."));
}

#[test]
fn test_prompt_overlay_shows_question_and_input() {
    let mut model = model_with("docs");
    model.editor.set_selection(Selection::new(0, 4));
    let model = update(model, Message::Shortcut(crate::editor::Shortcut::Link));
    let model = update(model, Message::PromptInput("https://ex".to_string()));
    let content = screen(&model);
    assert!(content.contains("Insert link"));
    assert!(content.contains("Enter URL:"));
    assert!(content.contains("> https://ex"));
}

#[test]
fn test_toast_bar_renders_above_status() {
    let model = update(model_with("a"), Message::InsertChar('b'));
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(row(&model, 28).contains("[warn] Unsaved changes!"));
}

#[test]
fn test_regions_keep_surface_minimum() {
    let area = Rect::new(0, 0, 80, 40);
    let r = regions(area, 15, false);
    assert_eq!(r.toolbar.height, 1);
    assert_eq!(r.status.y, 39);
    assert_eq!(r.toast.height, 0);
    assert!(r.surface.height >= 15);

    let r = regions(area, 15, true);
    assert_eq!(r.toast.height, 1);
    assert_eq!(r.toast.y, 38);
}

#[test]
fn test_gutter_width_grows_with_line_count() {
    assert_eq!(gutter_width(1), 2);
    assert_eq!(gutter_width(99), 3);
    assert_eq!(gutter_width(1_000), 5);
}
