//! Markdown to HTML preview.
//!
//! The preview is a fixed, ordered list of regex [`Stage`]s. Each stage is a
//! pure `&str -> String` pass; later stages see the output of earlier ones,
//! so the order below is load-bearing:
//!
//! 1. headings, `###` before `##` before `#`
//! 2. bold before italic (`**` would otherwise match as two `*`)
//! 3. strikethrough, then inline code
//! 4. line prefixes: block quote, bullet and numbered list items, rules
//! 5. images before links (image syntax contains link syntax)
//! 6. newlines to `<br />` last, after every `^`/`$` anchored stage
//!
//! The output is not sanitized. Only preview text the current user wrote.

mod stages;

pub use stages::{Stage, stage, stages};

/// Rendered in place of an empty document.
pub const EMPTY_PREVIEW: &str = r#"<p class="text-gray-500">Nothing to preview...</p>"#;

/// Render `markdown` with the standard stage order.
pub fn render(markdown: &str) -> String {
    render_with(stages(), markdown)
}

/// Render `markdown` through an explicit stage list.
pub fn render_with(stages: &[Stage], markdown: &str) -> String {
    let html = stages
        .iter()
        .fold(markdown.to_string(), |acc, stage| stage.apply(&acc));
    if html.is_empty() {
        return EMPTY_PREVIEW.to_string();
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_renders_placeholder() {
        assert_eq!(render(""), EMPTY_PREVIEW);
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        assert_eq!(render(" "), " ");
    }

    #[test]
    fn test_bold_and_italic_do_not_cross_contaminate() {
        let html = render("**bold** and *italic*");
        assert_eq!(html, "<strong>bold</strong> and <em>italic</em>");
    }

    #[test]
    fn test_headings_keep_levels_apart() {
        let html = render("# One\n## Two\n### Three");
        assert_eq!(html, "<h1>One</h1><br /><h2>Two</h2><br /><h3>Three</h3>");
    }

    #[test]
    fn test_heading_marker_needs_line_start() {
        assert_eq!(render("a # b"), "a # b");
    }

    #[test]
    fn test_image_is_not_mistaken_for_link() {
        let html = render("![cat](cat.png)");
        assert!(html.starts_with(r#"<img src="cat.png" alt="cat""#), "{html}");
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_link_and_image_on_one_line() {
        let html = render("[docs](https://d.rs) ![logo](l.png)");
        assert!(html.contains(r#"<a href="https://d.rs" target="_blank" rel="noopener noreferrer">docs</a>"#));
        assert!(html.contains(r#"<img src="l.png" alt="logo""#));
    }

    #[test]
    fn test_list_items_and_quote() {
        let html = render("> quoted\n* star\n- dash\n2. second");
        assert_eq!(
            html,
            "<blockquote>quoted</blockquote><br /><li>star</li><br /><li>dash</li><br /><li>second</li>"
        );
    }

    #[test]
    fn test_horizontal_rule_from_editor_insertion() {
        assert_eq!(render("a\n---\nb"), "a<br /><hr /><br />b");
    }

    #[test]
    fn test_inline_code_and_strikethrough() {
        assert_eq!(
            render("`x` ~~gone~~"),
            "<code>x</code> <del>gone</del>"
        );
    }

    #[test]
    fn test_emphasis_inside_heading() {
        assert_eq!(render("## A **b**"), "<h2>A <strong>b</strong></h2>");
    }

    #[test]
    fn test_render_is_deterministic() {
        let md = "# T\n**b** *i* [l](u)";
        assert_eq!(render(md), render(md));
    }
}
