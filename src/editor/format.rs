//! Markdown formatting operations applied around a selection.
//!
//! Every operation is pure: it takes the current document and selection and
//! produces a [`Mutation`] (the new document plus caret), or `None` when a
//! prompt was cancelled.

use super::buffer::Selection;
use super::prompt::{IMAGE_ALT_PROMPT, IMAGE_URL_PROMPT, LINK_URL_PROMPT, LinkPrompt};

/// Emoji offered by [`FormatOp::Emoji`], indexed modulo the palette length.
pub const EMOJI_PALETTE: [&str; 16] = [
    "😀", "😍", "🤔", "👍", "🚀", "💡", "🔥", "✨", "🎉", "💯", "🤝", "❤️", "🎯", "⚡", "🌟", "🏆",
];

/// Link text used when nothing is selected.
pub const LINK_PLACEHOLDER: &str = "Link text";
/// Alt text used when the alt prompt is empty or cancelled.
pub const IMAGE_ALT_FALLBACK: &str = "Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    const fn marker(self) -> &'static str {
        match self {
            Self::H1 => "# ",
            Self::H2 => "## ",
            Self::H3 => "### ",
        }
    }
}

/// A named markdown transformation relative to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOp {
    Bold,
    Italic,
    Strikethrough,
    Code,
    Quote,
    Heading(HeadingLevel),
    BulletList,
    NumberedList,
    /// Prompts for a URL, wraps the selection as link text.
    Link,
    /// Prompts for a URL and alt text.
    Image,
    /// Inserts `EMOJI_PALETTE[n % len]`.
    Emoji(usize),
    HorizontalRule,
}

/// Delimiters for a prompt-free operation.
///
/// When `wraps` is false the selection is replaced by `prefix` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRule {
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub wraps: bool,
}

impl FormatRule {
    const fn wrap(prefix: &'static str, suffix: &'static str) -> Self {
        Self {
            prefix,
            suffix,
            wraps: true,
        }
    }

    const fn line(prefix: &'static str) -> Self {
        Self::wrap(prefix, "")
    }

    const fn insert(text: &'static str) -> Self {
        Self {
            prefix: text,
            suffix: "",
            wraps: false,
        }
    }
}

impl FormatOp {
    /// The delimiters for this operation given the selected text.
    ///
    /// `None` for link and image, whose text depends on prompt answers.
    pub fn rule(self, selected: &str) -> Option<FormatRule> {
        let rule = match self {
            Self::Bold => FormatRule::wrap("**", "**"),
            Self::Italic => FormatRule::wrap("*", "*"),
            Self::Strikethrough => FormatRule::wrap("~~", "~~"),
            Self::Code if selected.contains('\n') => FormatRule::wrap("```\n", "\n```"),
            Self::Code => FormatRule::wrap("`", "`"),
            Self::Quote => FormatRule::line("> "),
            Self::Heading(level) => FormatRule::line(level.marker()),
            Self::BulletList => FormatRule::line("- "),
            Self::NumberedList => FormatRule::line("1. "),
            Self::Emoji(n) => FormatRule::insert(EMOJI_PALETTE[n % EMOJI_PALETTE.len()]),
            Self::HorizontalRule => FormatRule::insert("\n---\n"),
            Self::Link | Self::Image => return None,
        };
        Some(rule)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Strikethrough => "strikethrough",
            Self::Code => "code",
            Self::Quote => "quote",
            Self::Heading(HeadingLevel::H1) => "heading 1",
            Self::Heading(HeadingLevel::H2) => "heading 2",
            Self::Heading(HeadingLevel::H3) => "heading 3",
            Self::BulletList => "bullet list",
            Self::NumberedList => "numbered list",
            Self::Link => "link",
            Self::Image => "image",
            Self::Emoji(_) => "emoji",
            Self::HorizontalRule => "horizontal rule",
        }
    }
}

/// A new document and where the caret goes in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub text: String,
    /// Char offset of the collapsed caret.
    pub caret: usize,
}

/// Apply `op` to `text` around `selection`.
///
/// Returns `None` when a link or image prompt is cancelled or answered
/// with an empty URL; the document must then stay untouched.
pub fn apply_format(
    text: &str,
    selection: Selection,
    op: FormatOp,
    prompt: &mut dyn LinkPrompt,
) -> Option<Mutation> {
    let selection = selection.clamped(text.chars().count());
    let (before, selected, after) = split_at_selection(text, selection);

    match op {
        FormatOp::Link => {
            let url = ask_non_empty(prompt, LINK_URL_PROMPT)?;
            let label = if selected.is_empty() {
                LINK_PLACEHOLDER
            } else {
                selected
            };
            Some(insert_at_selection(text, selection, &format!("[{label}]({url})")))
        }
        FormatOp::Image => {
            let url = ask_non_empty(prompt, IMAGE_URL_PROMPT)?;
            let alt = ask_non_empty(prompt, IMAGE_ALT_PROMPT)
                .unwrap_or_else(|| IMAGE_ALT_FALLBACK.to_string());
            Some(insert_at_selection(text, selection, &format!("![{alt}]({url})")))
        }
        _ => {
            let rule = op.rule(selected)?;
            if !rule.wraps {
                return Some(insert_at_selection(text, selection, rule.prefix));
            }
            let mut out = String::with_capacity(
                text.len() + rule.prefix.len() + rule.suffix.len(),
            );
            out.push_str(before);
            out.push_str(rule.prefix);
            out.push_str(selected);
            out.push_str(rule.suffix);
            out.push_str(after);

            let prefix_len = rule.prefix.chars().count();
            let caret = if selection.is_caret() {
                selection.start + prefix_len
            } else {
                selection.start + prefix_len + selection.len() + rule.suffix.chars().count()
            };
            Some(Mutation { text: out, caret })
        }
    }
}

/// Replace the selection with `insert`, caret right after it.
pub fn insert_at_selection(text: &str, selection: Selection, insert: &str) -> Mutation {
    let selection = selection.clamped(text.chars().count());
    let (before, _, after) = split_at_selection(text, selection);
    Mutation {
        text: format!("{before}{insert}{after}"),
        caret: selection.start + insert.chars().count(),
    }
}

fn ask_non_empty(prompt: &mut dyn LinkPrompt, question: &str) -> Option<String> {
    let answer = prompt.ask(question)?;
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        tracing::debug!(question, "prompt answered empty");
        return None;
    }
    Some(trimmed.to_string())
}

/// Split `text` into before / selected / after at char offsets.
fn split_at_selection(text: &str, selection: Selection) -> (&str, &str, &str) {
    let start = byte_offset(text, selection.start);
    let end = byte_offset(text, selection.end);
    (&text[..start], &text[start..end], &text[end..])
}

fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::prompt::{DeclinePrompt, ScriptedPrompt};

    fn apply(text: &str, sel: (usize, usize), op: FormatOp) -> Mutation {
        apply_format(text, Selection::new(sel.0, sel.1), op, &mut DeclinePrompt)
            .expect("prompt-free op always mutates")
    }

    #[test]
    fn test_bold_wraps_selection_and_caret_follows_closing_marker() {
        let m = apply("say hello now", (4, 9), FormatOp::Bold);
        assert_eq!(m.text, "say **hello** now");
        assert_eq!(m.caret, 13);
    }

    #[test]
    fn test_bold_with_caret_lands_between_markers() {
        let m = apply("abcd", (2, 2), FormatOp::Bold);
        assert_eq!(m.text, "ab****cd");
        assert_eq!(m.caret, 4);
    }

    #[test]
    fn test_italic_and_strikethrough_delimiters() {
        assert_eq!(apply("x", (0, 1), FormatOp::Italic).text, "*x*");
        assert_eq!(apply("x", (0, 1), FormatOp::Strikethrough).text, "~~x~~");
    }

    #[test]
    fn test_code_single_line_uses_backticks() {
        let m = apply("let x", (0, 5), FormatOp::Code);
        assert_eq!(m.text, "`let x`");
    }

    #[test]
    fn test_code_multi_line_uses_fence() {
        let m = apply("a\nb", (0, 3), FormatOp::Code);
        assert_eq!(m.text, "```\na\nb\n```");
        assert_eq!(m.caret, "```\na\nb\n```".chars().count());
    }

    #[test]
    fn test_line_prefix_ops() {
        assert_eq!(apply("t", (0, 1), FormatOp::Quote).text, "> t");
        assert_eq!(
            apply("t", (0, 1), FormatOp::Heading(HeadingLevel::H2)).text,
            "## t"
        );
        assert_eq!(apply("t", (0, 1), FormatOp::BulletList).text, "- t");
        assert_eq!(apply("t", (0, 1), FormatOp::NumberedList).text, "1. t");
    }

    #[test]
    fn test_heading_with_caret_supports_type_ahead() {
        let m = apply("", (0, 0), FormatOp::Heading(HeadingLevel::H3));
        assert_eq!(m.text, "### ");
        assert_eq!(m.caret, 4);
    }

    #[test]
    fn test_horizontal_rule_replaces_selection() {
        let m = apply("abXYcd", (2, 4), FormatOp::HorizontalRule);
        assert_eq!(m.text, "ab\n---\ncd");
        assert_eq!(m.caret, 7);
    }

    #[test]
    fn test_emoji_index_wraps_palette() {
        let m = apply("", (0, 0), FormatOp::Emoji(EMOJI_PALETTE.len() + 3));
        assert_eq!(m.text, EMOJI_PALETTE[3]);
    }

    #[test]
    fn test_offsets_are_chars_not_bytes() {
        let m = apply("héllo wörld", (6, 11), FormatOp::Bold);
        assert_eq!(m.text, "héllo **wörld**");
        assert_eq!(m.caret, 15);
    }

    #[test]
    fn test_link_uses_selection_as_text() {
        let mut prompt = ScriptedPrompt::answering(["https://x.dev"]);
        let m = apply_format("see docs", Selection::new(4, 8), FormatOp::Link, &mut prompt)
            .unwrap();
        assert_eq!(m.text, "see [docs](https://x.dev)");
        assert_eq!(m.caret, m.text.chars().count());
        assert_eq!(prompt.asked(), [LINK_URL_PROMPT]);
    }

    #[test]
    fn test_link_without_selection_uses_placeholder() {
        let mut prompt = ScriptedPrompt::answering(["u"]);
        let m = apply_format("", Selection::caret(0), FormatOp::Link, &mut prompt).unwrap();
        assert_eq!(m.text, "[Link text](u)");
    }

    #[test]
    fn test_link_cancelled_or_empty_is_abandoned() {
        assert_eq!(
            apply_format("a", Selection::caret(0), FormatOp::Link, &mut DeclinePrompt),
            None
        );
        let mut empty = ScriptedPrompt::answering(["  "]);
        assert_eq!(
            apply_format("a", Selection::caret(0), FormatOp::Link, &mut empty),
            None
        );
    }

    #[test]
    fn test_image_asks_url_then_alt() {
        let mut prompt = ScriptedPrompt::answering(["cat.png", "a cat"]);
        let m = apply_format("", Selection::caret(0), FormatOp::Image, &mut prompt).unwrap();
        assert_eq!(m.text, "![a cat](cat.png)");
        assert_eq!(prompt.asked(), [IMAGE_URL_PROMPT, IMAGE_ALT_PROMPT]);
    }

    #[test]
    fn test_prompt_answers_are_trimmed() {
        let mut prompt = ScriptedPrompt::answering(["  cat.png ", " a cat  "]);
        let m = apply_format("", Selection::caret(0), FormatOp::Image, &mut prompt).unwrap();
        assert_eq!(m.text, "![a cat](cat.png)");

        let mut prompt = ScriptedPrompt::answering(["cat.png", "   "]);
        let m = apply_format("", Selection::caret(0), FormatOp::Image, &mut prompt).unwrap();
        assert_eq!(m.text, "![Image](cat.png)");
    }

    #[test]
    fn test_image_alt_falls_back_when_cancelled() {
        let mut prompt = ScriptedPrompt::new([Some("cat.png".to_string()), None]);
        let m = apply_format("", Selection::caret(0), FormatOp::Image, &mut prompt).unwrap();
        assert_eq!(m.text, "![Image](cat.png)");
    }

    #[test]
    fn test_image_without_url_never_asks_for_alt() {
        let mut prompt = ScriptedPrompt::new([None]);
        assert_eq!(
            apply_format("", Selection::caret(0), FormatOp::Image, &mut prompt),
            None
        );
        assert_eq!(prompt.asked(), [IMAGE_URL_PROMPT]);
    }

    #[test]
    fn test_out_of_range_selection_is_clamped() {
        let m = apply("ab", (1, 40), FormatOp::Italic);
        assert_eq!(m.text, "a*b*");
    }
}
