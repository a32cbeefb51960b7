//! Request bodies the host hands to the Q&A API.
//!
//! Nothing here performs HTTP. The editor produces a document; these types
//! validate it together with the surrounding form fields and serialize the
//! JSON body the API expects.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ConfigError, SubmitError};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_TAGS: usize = 5;

/// The request field the document is submitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitField {
    /// Body of a new question.
    Description,
    /// Body of an answer.
    Content,
}

impl SubmitField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for SubmitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmitField {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "description" => Ok(Self::Description),
            "content" => Ok(Self::Content),
            _ => Err(ConfigError::UnknownField(s.to_string())),
        }
    }
}

/// `POST /api/questions/` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionDraft {
    pub title: String,
    pub description: String,
    pub tag_names: Vec<String>,
}

impl QuestionDraft {
    /// Build a validated question body.
    ///
    /// The title and each tag are trimmed; blank tags are dropped. The
    /// description is kept verbatim but must contain something besides
    /// whitespace.
    ///
    /// # Errors
    /// Returns the first [`SubmitError`] the draft violates.
    pub fn new<I, S>(title: &str, description: &str, tags: I) -> Result<Self, SubmitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let title = title.trim();
        if title.is_empty() {
            return Err(SubmitError::EmptyTitle);
        }
        let title_chars = title.chars().count();
        if title_chars > MAX_TITLE_CHARS {
            return Err(SubmitError::TitleTooLong(title_chars));
        }
        if description.trim().is_empty() {
            return Err(SubmitError::EmptyBody);
        }

        let mut tag_names: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() {
                continue;
            }
            if tag_names.iter().any(|t| t == tag) {
                return Err(SubmitError::DuplicateTag(tag.to_string()));
            }
            tag_names.push(tag.to_string());
        }
        if tag_names.is_empty() {
            return Err(SubmitError::NoTags);
        }
        if tag_names.len() > MAX_TAGS {
            return Err(SubmitError::TooManyTags(tag_names.len()));
        }

        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            tag_names,
        })
    }
}

/// `POST /api/questions/{id}/answers/` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerDraft {
    pub content: String,
}

impl AnswerDraft {
    /// # Errors
    /// Returns [`SubmitError::EmptyBody`] for a blank answer.
    pub fn new(content: &str) -> Result<Self, SubmitError> {
        if content.trim().is_empty() {
            return Err(SubmitError::EmptyBody);
        }
        Ok(Self {
            content: content.to_string(),
        })
    }
}

/// A validated request body for either field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Question(QuestionDraft),
    Answer(AnswerDraft),
}

/// Validate `document` as the body for `field`.
///
/// `title` and `tags` are only read for [`SubmitField::Description`].
///
/// # Errors
/// Returns a [`SubmitError`] if the draft does not validate.
pub fn payload(
    field: SubmitField,
    document: &str,
    title: &str,
    tags: &[String],
) -> Result<Payload, SubmitError> {
    match field {
        SubmitField::Description => QuestionDraft::new(title, document, tags).map(Payload::Question),
        SubmitField::Content => AnswerDraft::new(document).map(Payload::Answer),
    }
}
