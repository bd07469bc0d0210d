//! Read-only timetable records as returned by storage.
//!
//! Records are immutable within a turn; the conversation layer only reads
//! and formats them.

use serde::{Deserialize, Serialize};

/// One scheduled lecture slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    /// Course code (e.g., "CS201").
    pub course_code: String,
    /// Lecture title.
    pub title: String,
    /// Start time as 24-hour `HH:MM:SS` text.
    pub start_time: String,
    /// End time as 24-hour `HH:MM:SS` text.
    pub end_time: String,
    pub venue: Option<String>,
    pub topic: Option<String>,
    /// Lowercase weekday name the lecture runs on.
    pub weekday: String,
}

/// A link to course material for one teaching week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub course_name: String,
    pub course_code: Option<String>,
    /// Teaching week, 1 through 12.
    pub week_number: i32,
    pub resource_title: Option<String>,
    pub resource_url: String,
    /// Position of the resource within its week.
    pub resource_order: i32,
}

impl Resource {
    /// Title to show for this resource, falling back to its ordering index.
    #[must_use]
    pub fn display_title(&self) -> String {
        match &self.resource_title {
            Some(title) => title.clone(),
            None => format!("Resource {}", self.resource_order),
        }
    }
}

/// A course offered in the resource catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub course_name: String,
    pub course_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(title: Option<&str>, order: i32) -> Resource {
        Resource {
            course_name: "Databases".to_string(),
            course_code: Some("DB301".to_string()),
            week_number: 2,
            resource_title: title.map(str::to_string),
            resource_url: "https://example.edu/db/w2.pdf".to_string(),
            resource_order: order,
        }
    }

    #[test]
    fn display_title_prefers_stored_title() {
        assert_eq!(resource(Some("Normal forms"), 1).display_title(), "Normal forms");
    }

    #[test]
    fn display_title_falls_back_to_order() {
        assert_eq!(resource(None, 4).display_title(), "Resource 4");
    }
}
