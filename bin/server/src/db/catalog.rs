//! The MySQL-backed [`CourseCatalog`].
//!
//! This is where storage errors stop: each failure is logged and the
//! conversation sees an empty list instead.

use super::{LectureRepository, ResourceRepository};
use async_trait::async_trait;
use lecture_bot_conversation::{CourseCatalog, LectureQuery};
use lecture_bot_core::{CourseSummary, Lecture, Resource};
use sqlx::MySqlPool;

/// Catalog reading lectures and resources from MySQL.
#[derive(Clone)]
pub struct SqlCourseCatalog {
    lectures: LectureRepository,
    resources: ResourceRepository,
}

impl SqlCourseCatalog {
    /// Creates a catalog sharing one pool between both repositories.
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            lectures: LectureRepository::new(pool.clone()),
            resources: ResourceRepository::new(pool),
        }
    }
}

fn or_empty<T>(result: Result<Vec<T>, sqlx::Error>, what: &'static str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Error fetching {what}");
        Vec::new()
    })
}

#[async_trait]
impl CourseCatalog for SqlCourseCatalog {
    async fn lectures(&self, query: &LectureQuery) -> Vec<Lecture> {
        or_empty(self.lectures.list_for_day(query).await, "lectures")
    }

    async fn resources(&self, course_name: &str, week_number: Option<i32>) -> Vec<Resource> {
        or_empty(
            self.resources.list_for_course(course_name, week_number).await,
            "course resources",
        )
    }

    async fn courses(&self) -> Vec<CourseSummary> {
        or_empty(self.resources.list_courses().await, "courses")
    }

    async fn weeks(&self, course_name: &str) -> Vec<i32> {
        or_empty(self.resources.list_weeks(course_name).await, "weeks")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
    use std::time::Duration;

    /// A catalog over a pool that can never connect.
    fn unreachable_catalog() -> SqlCourseCatalog {
        let options = MySqlConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("nobody")
            .database("nowhere");
        let pool = MySqlPoolOptions::new()
            .acquire_timeout(Duration::from_millis(250))
            .connect_lazy_with(options);
        SqlCourseCatalog::new(pool)
    }

    #[tokio::test]
    async fn storage_failures_become_empty_lists() {
        let catalog = unreachable_catalog();
        let query = LectureQuery {
            program: Some("Computer Science".to_string()),
            year_level: 2,
            weekday: "monday".to_string(),
        };

        assert!(catalog.lectures(&query).await.is_empty());
        assert!(catalog.resources("Databases", Some(3)).await.is_empty());
        assert!(catalog.courses().await.is_empty());
        assert!(catalog.weeks("Databases").await.is_empty());
    }

    #[test]
    fn or_empty_passes_rows_through() {
        assert_eq!(or_empty(Ok(vec![1, 2]), "weeks"), vec![1, 2]);
        assert!(or_empty::<i32>(Err(sqlx::Error::RowNotFound), "weeks").is_empty());
    }
}
