//! Conversation session identifiers.
//!
//! The dialogue platform names every session with a resource path such as
//! `projects/uni-bot/agent/sessions/4f1c`. Context names are that path
//! followed by `/contexts/<tag>`, so the session path is the part that has
//! to be carried from inbound contexts onto outbound ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marker separating a session path from a context tag.
pub const CONTEXTS_SEGMENT: &str = "/contexts/";

/// Error returned when parsing a session path from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSessionPathError {
    /// The rejected input.
    pub input: String,
    /// The reason for the parse failure.
    pub reason: &'static str,
}

impl fmt::Display for ParseSessionPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse session path '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for ParseSessionPathError {}

/// The platform's session resource path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionPath(String);

impl SessionPath {
    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the full name of a context living in this session.
    #[must_use]
    pub fn context_name(&self, tag: &str) -> String {
        format!("{}{CONTEXTS_SEGMENT}{tag}", self.0)
    }
}

impl fmt::Display for SessionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionPath {
    type Err = ParseSessionPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ParseSessionPathError {
                input: s.to_string(),
                reason: "empty path",
            });
        }
        if trimmed.contains(CONTEXTS_SEGMENT) {
            return Err(ParseSessionPathError {
                input: s.to_string(),
                reason: "path already names a context",
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for SessionPath {
    type Error = ParseSessionPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionPath> for String {
    fn from(path: SessionPath) -> Self {
        path.0
    }
}
