use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::error::ConfigError;
use crate::submit::SubmitField;

/// Shown on an empty document when no placeholder is configured.
pub const DEFAULT_PLACEHOLDER: &str = "Start typing...";
/// Minimum surface height when none is configured.
pub const DEFAULT_HEIGHT: &str = "300px";
/// Quiet period before typed text becomes an undo step.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;
/// Pixel height of one terminal row when converting `px` heights.
const PX_PER_ROW: u16 = 20;

/// Options the editor engine recognises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Shown while the document is empty.
    pub placeholder: String,
    /// Minimum height of the edit/preview surface, `<n>px` or a row count.
    pub height: String,
    /// Quiet period for typing coalescing.
    pub debounce: Duration,
}

impl EditorConfig {
    /// Minimum surface height in terminal rows.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidHeight`] if `height` is not `<n>px`
    /// or a bare row count.
    pub fn min_rows(&self) -> Result<u16, ConfigError> {
        parse_height(&self.height)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            height: DEFAULT_HEIGHT.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

fn parse_height(raw: &str) -> Result<u16, ConfigError> {
    let invalid = || ConfigError::InvalidHeight(raw.to_string());
    let trimmed = raw.trim();
    if let Some(px) = trimmed.strip_suffix("px") {
        let px: u16 = px.trim().parse().map_err(|_| invalid())?;
        return Ok(px.div_ceil(PX_PER_ROW).max(1));
    }
    let rows: u16 = trimmed.parse().map_err(|_| invalid())?;
    Ok(rows.max(1))
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub placeholder: Option<String>,
    pub height: Option<String>,
    pub debounce_ms: Option<String>,
    pub preview: bool,
    pub field: Option<String>,
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            placeholder: other.placeholder.clone().or_else(|| self.placeholder.clone()),
            height: other.height.clone().or_else(|| self.height.clone()),
            debounce_ms: other.debounce_ms.clone().or_else(|| self.debounce_ms.clone()),
            preview: self.preview || other.preview,
            field: other.field.clone().or_else(|| self.field.clone()),
            title: other.title.clone().or_else(|| self.title.clone()),
            tags: if other.tags.is_empty() {
                self.tags.clone()
            } else {
                other.tags.clone()
            },
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// Validate the editor-facing flags.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] for a malformed height or debounce.
    pub fn editor_config(&self) -> Result<EditorConfig, ConfigError> {
        let mut config = EditorConfig::default();
        if let Some(placeholder) = &self.placeholder {
            config.placeholder.clone_from(placeholder);
        }
        if let Some(height) = &self.height {
            parse_height(height)?;
            config.height.clone_from(height);
        }
        if let Some(raw) = &self.debounce_ms {
            let ms: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidDebounce(raw.clone()))?;
            config.debounce = Duration::from_millis(ms);
        }
        Ok(config)
    }

    /// The field the final document is submitted under, if any.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownField`] for anything other than
    /// `description` or `content`.
    pub fn submit_field(&self) -> Result<Option<SubmitField>, ConfigError> {
        self.field.as_deref().map(str::parse::<SubmitField>).transpose()
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("stackit-editor").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("stackit-editor")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("stackit-editor").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("stackit-editor")
                .join("config");
        }
    }

    PathBuf::from(".stackitrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".stackitrc")
}

/// Load flags from a config file.
///
/// Lines hold whitespace-separated flag tokens. `--placeholder` and
/// `--title` take the rest of their line, so their text may contain spaces.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    tracing::debug!(path = %path.display(), tokens = tokens.len(), "config.load");
    Ok(parse_flag_tokens(&tokens))
}

const fn takes_rest_of_line(flag: &str) -> bool {
    matches!(flag.as_bytes(), b"--placeholder" | b"--title")
}

fn line_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = line.trim();
    while !rest.is_empty() {
        let (token, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let name = token.split_once('=').map_or(token, |(name, _)| name);
        if takes_rest_of_line(name) {
            if token.contains('=') {
                tokens.push(rest.to_string());
            } else {
                tokens.push(token.to_string());
                let value = tail.trim();
                if !value.is_empty() {
                    tokens.push(value.to_string());
                }
            }
            break;
        }
        tokens.push(token.to_string());
        rest = tail.trim_start();
    }
    tokens
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# stackit-editor defaults (saved with --save)".to_string());
    if let Some(placeholder) = &flags.placeholder {
        lines.push(format!("--placeholder {placeholder}"));
    }
    if let Some(height) = &flags.height {
        lines.push(format!("--height {height}"));
    }
    if let Some(ms) = &flags.debounce_ms {
        lines.push(format!("--debounce-ms {ms}"));
    }
    if flags.preview {
        lines.push("--preview".to_string());
    }
    if let Some(field) = &flags.field {
        lines.push(format!("--field {field}"));
    }
    if let Some(title) = &flags.title {
        lines.push(format!("--title {title}"));
    }
    for tag in &flags.tags {
        lines.push(format!("--tag {tag}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--preview" {
            flags.preview = true;
        } else if let Some((name, value)) = token.split_once('=') {
            apply_valued(&mut flags, name, value);
        } else if is_valued(token) {
            if let Some(next) = tokens.get(i + 1) {
                apply_valued(&mut flags, token, next);
                i += 1;
            }
        }
        i += 1;
    }
    flags
}

const fn is_valued(flag: &str) -> bool {
    matches!(
        flag.as_bytes(),
        b"--placeholder"
            | b"--height"
            | b"--debounce-ms"
            | b"--field"
            | b"--title"
            | b"--tag"
            | b"--log-file"
    )
}

fn apply_valued(flags: &mut ConfigFlags, name: &str, value: &str) {
    let value = value.to_string();
    match name {
        "--placeholder" => flags.placeholder = Some(value),
        "--height" => flags.height = Some(value),
        "--debounce-ms" => flags.debounce_ms = Some(value),
        "--field" => flags.field = Some(value),
        "--title" => flags.title = Some(value),
        "--tag" => flags.tags.push(value),
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "stackit-editor".to_string(),
            "--placeholder".to_string(),
            "Ask away".to_string(),
            "--height=12".to_string(),
            "--preview".to_string(),
            "--tag".to_string(),
            "rust".to_string(),
            "--tag=async".to_string(),
            "draft.md".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.placeholder.as_deref(), Some("Ask away"));
        assert_eq!(flags.height.as_deref(), Some("12"));
        assert!(flags.preview);
        assert_eq!(flags.tags, ["rust", "async"]);
    }

    #[test]
    fn test_config_union_prefers_cli_values() {
        let file = ConfigFlags {
            height: Some("10".to_string()),
            placeholder: Some("file".to_string()),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            placeholder: Some("cli".to_string()),
            preview: true,
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert_eq!(merged.placeholder.as_deref(), Some("cli"));
        assert_eq!(merged.height.as_deref(), Some("10"));
        assert!(merged.preview);
    }

    #[test]
    fn test_editor_config_defaults() {
        let config = ConfigFlags::default().editor_config().unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.min_rows(), Ok(15));
    }

    #[test]
    fn test_height_accepts_px_and_rows() {
        assert_eq!(parse_height("300px"), Ok(15));
        assert_eq!(parse_height("310px"), Ok(16));
        assert_eq!(parse_height("8"), Ok(8));
        assert_eq!(parse_height("0"), Ok(1));
        assert_eq!(
            parse_height("tall"),
            Err(ConfigError::InvalidHeight("tall".to_string()))
        );
    }

    #[test]
    fn test_invalid_debounce_is_rejected() {
        let flags = ConfigFlags {
            debounce_ms: Some("soon".to_string()),
            ..ConfigFlags::default()
        };
        assert_eq!(
            flags.editor_config(),
            Err(ConfigError::InvalidDebounce("soon".to_string()))
        );
    }

    #[test]
    fn test_submit_field_parsing() {
        let mut flags = ConfigFlags::default();
        assert_eq!(flags.submit_field(), Ok(None));
        flags.field = Some("content".to_string());
        assert_eq!(flags.submit_field(), Ok(Some(SubmitField::Content)));
        flags.field = Some("body".to_string());
        assert!(flags.submit_field().is_err());
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".stackitrc");
        let flags = ConfigFlags {
            placeholder: Some("Describe your problem".to_string()),
            height: Some("400px".to_string()),
            debounce_ms: Some("750".to_string()),
            preview: true,
            field: Some("description".to_string()),
            title: Some("Borrowing inside a loop".to_string()),
            tags: vec!["rust".to_string(), "borrow-checker".to_string()],
            log_file: Some(PathBuf::from("editor.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_config_line_may_hold_several_flags() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".stackitrc");
        fs::write(
            &path,
            "--preview --height 10\n--debounce-ms=250 --tag rust --tag async\n",
        )
        .unwrap();

        let flags = load_config_flags(&path).unwrap();
        assert!(flags.preview);
        assert_eq!(flags.height.as_deref(), Some("10"));
        assert_eq!(flags.debounce_ms.as_deref(), Some("250"));
        assert_eq!(flags.tags, ["rust", "async"]);
    }

    #[test]
    fn test_text_flags_take_rest_of_line() {
        assert_eq!(
            line_tokens("--preview --placeholder Ask  your question"),
            ["--preview", "--placeholder", "Ask  your question"]
        );
        assert_eq!(
            line_tokens("--title=Why is this moved? --tag rust"),
            ["--title=Why is this moved? --tag rust"]
        );
        assert_eq!(line_tokens("--height   12"), ["--height", "12"]);
    }
}
