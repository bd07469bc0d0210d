//! Error types for the conversation crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `SlotError`: a slot value that is present but unusable
//! - `ConversationError`: high-level wrapper naming the failing handler
//!
//! Storage failures are not represented here; the catalog boundary turns
//! them into empty results before they reach a handler.

use std::fmt;

/// Errors reading a slot out of the turn parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// A slot that must be an integer held something else.
    InvalidInteger { slot: &'static str, value: String },
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInteger { slot, value } => {
                write!(f, "slot '{slot}' is not an integer: {value}")
            }
        }
    }
}

impl std::error::Error for SlotError {}

/// High-level conversation errors.
///
/// Use these to add context when wrapping lower-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationError {
    /// A handler could not finish the turn.
    HandlerFailed { handler: &'static str, reason: String },
}

impl fmt::Display for ConversationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HandlerFailed { handler, reason } => {
                write!(f, "{handler} handler failed: {reason}")
            }
        }
    }
}

impl std::error::Error for ConversationError {}

impl ConversationError {
    /// Wraps a slot error raised inside the named handler.
    #[must_use]
    pub fn from_slot(handler: &'static str, err: &SlotError) -> Self {
        Self::HandlerFailed {
            handler,
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_error_display() {
        let err = SlotError::InvalidInteger {
            slot: "year_level",
            value: "\"second\"".to_string(),
        };
        assert!(err.to_string().contains("year_level"));
        assert!(err.to_string().contains("second"));
    }

    #[test]
    fn handler_failure_names_handler() {
        let slot = SlotError::InvalidInteger {
            slot: "year_level",
            value: "x".to_string(),
        };
        let err = ConversationError::from_slot("schedule", &slot);
        assert!(err.to_string().starts_with("schedule handler failed"));
    }
}
