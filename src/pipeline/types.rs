use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recognized text of one document image. Line order is significant:
/// label/value extraction relies on adjacency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawText(String);

impl RawText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = lines
            .into_iter()
            .map(|l| l.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for RawText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for RawText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl AsRef<str> for RawText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No text recognized in {0}")]
    EmptyText(String),
}

/// Text acquisition collaborator (OCR engine, plain-text import, ...).
pub trait TextSource {
    /// Recognized text for the item identified by `key`.
    fn read_text(&self, key: &str) -> Result<RawText, IngestError>;
}

/// Reads already-recognized text from UTF-8 files.
#[derive(Debug, Clone, Default)]
pub struct PlainTextFileSource {
    /// Relative keys resolve against this directory when set.
    pub root: Option<PathBuf>,
}

impl PlainTextFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, key: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(key),
            None => PathBuf::from(key),
        }
    }
}

impl TextSource for PlainTextFileSource {
    fn read_text(&self, key: &str) -> Result<RawText, IngestError> {
        let path = self.resolve(key);
        let text = std::fs::read_to_string(&path)?;
        let raw = RawText::from(text);
        if raw.is_blank() {
            return Err(IngestError::EmptyText(path.display().to_string()));
        }
        Ok(raw)
    }
}
