use std::sync::LazyLock;

use regex::Regex;

/// One named `(pattern, replacement)` pass of the preview pipeline.
#[derive(Debug, Clone)]
pub struct Stage {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl Stage {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("preview stage patterns are valid"),
            replacement,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Replace every match in `input`.
    pub fn apply(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement)
            .into_owned()
    }
}

static STAGES: LazyLock<Vec<Stage>> = LazyLock::new(|| {
    vec![
        Stage::new("heading3", r"(?m)^### (.*)$", "<h3>${1}</h3>"),
        Stage::new("heading2", r"(?m)^## (.*)$", "<h2>${1}</h2>"),
        Stage::new("heading1", r"(?m)^# (.*)$", "<h1>${1}</h1>"),
        Stage::new("bold", r"\*\*(.*?)\*\*", "<strong>${1}</strong>"),
        Stage::new("italic", r"\*(.*?)\*", "<em>${1}</em>"),
        Stage::new("strikethrough", r"~~(.*?)~~", "<del>${1}</del>"),
        Stage::new("code", r"`(.*?)`", "<code>${1}</code>"),
        Stage::new("blockquote", r"(?m)^> (.*)$", "<blockquote>${1}</blockquote>"),
        Stage::new("bullet", r"(?m)^[*-] (.*)$", "<li>${1}</li>"),
        Stage::new("numbered", r"(?m)^\d+\. (.*)$", "<li>${1}</li>"),
        Stage::new("rule", r"(?m)^---$", "<hr />"),
        Stage::new(
            "image",
            r"!\[([^\]]*)\]\(([^)]+)\)",
            r#"<img src="${2}" alt="${1}" style="max-width: 100%; height: auto;" />"#,
        ),
        Stage::new(
            "link",
            r"\[([^\]]+)\]\(([^)]+)\)",
            r#"<a href="${2}" target="_blank" rel="noopener noreferrer">${1}</a>"#,
        ),
        Stage::new("line_break", r"\n", "<br />"),
    ]
});

/// The standard stages, in application order.
pub fn stages() -> &'static [Stage] {
    &STAGES
}

/// Look up a standard stage by name.
pub fn stage(name: &str) -> Option<&'static Stage> {
    stages().iter().find(|stage| stage.name == name)
}
