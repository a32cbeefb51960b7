//! Typed errors for configuration and submit payloads.
//!
//! Editing operations themselves never fail: boundary undo/redo and
//! abandoned prompts are reported as `false`/`None` outcomes instead.

use thiserror::Error;

/// Invalid values found while turning config flags into an editor config.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `--height` was neither `<n>px` nor a bare row count.
    #[error("invalid height {0:?}: expected `<n>px` or a row count")]
    InvalidHeight(String),
    /// `--debounce-ms` was not a non-negative integer.
    #[error("invalid debounce {0:?}: expected milliseconds")]
    InvalidDebounce(String),
    /// `--field` named something other than `description` or `content`.
    #[error("unknown submit field {0:?}: expected `description` or `content`")]
    UnknownField(String),
}

/// Reasons a draft cannot be turned into a request body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title is {0} characters, the limit is {max}", max = crate::submit::MAX_TITLE_CHARS)]
    TitleTooLong(usize),
    #[error("body must not be empty")]
    EmptyBody,
    #[error("at least one tag is required")]
    NoTags,
    #[error("{0} tags given, the limit is {max}", max = crate::submit::MAX_TAGS)]
    TooManyTags(usize),
    #[error("tag {0:?} is listed twice")]
    DuplicateTag(String),
}
