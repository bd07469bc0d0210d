//! Slot access over the platform's loosely typed parameter mapping.
//!
//! The platform sends parameters as JSON values that may be strings,
//! numbers, `null`, or empty strings for unfilled slots. Empty strings,
//! `null` and numeric zero all count as absent.

use crate::error::SlotError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Slot names shared by the router and handlers.
pub mod slot {
    pub const PROGRAM: &str = "program";
    pub const YEAR_LEVEL: &str = "year_level";
    pub const DAY_QUERY: &str = "day_query";
    pub const COURSE_NAME: &str = "course_name";
    pub const WEEK_NUMBER: &str = "week_number";
}

/// The parameter mapping of a turn or context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Map<String, JsonValue>);

impl Parameters {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a parameter.
    pub fn set(&mut self, key: &str, value: impl Into<JsonValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Marks a parameter absent.
    pub fn clear(&mut self, key: &str) {
        self.0.insert(key.to_string(), JsonValue::Null);
    }

    /// Copies every entry of `other` over this mapping.
    pub fn merge(&mut self, other: &Parameters) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Returns the raw value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Returns a parameter as text when present.
    ///
    /// Numbers are rendered as text; booleans, lists and objects are ignored.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            JsonValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
            JsonValue::Number(n) if !is_zero(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns a parameter as an integer when present.
    ///
    /// Accepts integral numbers (`2`, `2.0`) and numeric strings (`"2"`).
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidInteger`] when the slot is present but
    /// holds something that is not a whole number.
    pub fn integer(&self, key: &'static str) -> Result<Option<i64>, SlotError> {
        let Some(value) = self.0.get(key) else {
            return Ok(None);
        };
        let invalid = || SlotError::InvalidInteger {
            slot: key,
            value: value.to_string(),
        };
        let parsed = match value {
            JsonValue::Null => return Ok(None),
            JsonValue::String(s) if s.trim().is_empty() => return Ok(None),
            JsonValue::String(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
            JsonValue::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => i,
                (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
                _ => return Err(invalid()),
            },
            _ => return Err(invalid()),
        };
        Ok((parsed != 0).then_some(parsed))
    }

    /// Returns true when the mapping holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, JsonValue>> for Parameters {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

fn is_zero(n: &serde_json::Number) -> bool {
    n.as_f64().is_some_and(|f| f == 0.0)
}
