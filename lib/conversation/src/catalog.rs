//! The storage collaborator consumed by the conversation handlers.
//!
//! Implementations own their failure handling: any storage error must be
//! logged and surfaced as an empty list, never propagated to a handler.

use async_trait::async_trait;
use lecture_bot_core::{CourseSummary, Lecture, Resource};

/// Filter for a lecture lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureQuery {
    /// Exact program name. `None` only when a year arrived without a program,
    /// which matches no stored lecture.
    pub program: Option<String>,
    pub year_level: i64,
    /// Lowercase weekday name, matched exactly.
    pub weekday: String,
}

/// Read access to the timetable and course materials.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Lectures matching the query, ordered by start time.
    async fn lectures(&self, query: &LectureQuery) -> Vec<Lecture>;

    /// Resources whose course name contains `course_name` (case-insensitive),
    /// optionally restricted to one week, ordered by week then resource order.
    async fn resources(&self, course_name: &str, week_number: Option<i32>) -> Vec<Resource>;

    /// Distinct courses offering resources, ordered by course name.
    async fn courses(&self) -> Vec<CourseSummary>;

    /// Distinct weeks with resources for a course substring match, ascending.
    async fn weeks(&self, course_name: &str) -> Vec<i32>;
}
