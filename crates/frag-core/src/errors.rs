//! Error type returned by every frag crate.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and context of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Short kebab-case identifier, stable across releases.
    pub code: String,
    /// Description for humans.
    pub message: String,
    /// Values involved in the failure, keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
    /// Suggested fix, if one is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload without context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records a named value; a repeated key keeps the last value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a suggested fix.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            f.write_str(")")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Failure families of the fragmentation toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail", rename_all = "kebab-case")]
pub enum FragError {
    /// The event source could not produce an event; only that event is lost.
    #[error("generation failed: {0}")]
    Generation(ErrorInfo),
    /// Rejected run, seed, generator or output configuration.
    #[error("invalid configuration: {0}")]
    Config(ErrorInfo),
    /// The record sink could not be created, written or flushed.
    #[error("export failed: {0}")]
    Export(ErrorInfo),
    /// YAML or JSON encoding and decoding.
    #[error("serialization failed: {0}")]
    Serde(ErrorInfo),
}

impl FragError {
    /// Payload shared by all families.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            FragError::Generation(info)
            | FragError::Config(info)
            | FragError::Export(info)
            | FragError::Serde(info) => info,
        }
    }

    /// Shorthand for `self.info().code`.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Whether the error only forfeits the current event.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, FragError::Generation(_))
    }
}
