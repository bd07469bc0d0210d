//! Database repository for course materials.
//!
//! Course names are always matched as a case-insensitive substring, so
//! "Databases" finds "Advanced Databases" as well.

use lecture_bot_core::{CourseSummary, Resource};
use sqlx::{FromRow, MySqlPool};

/// Row type for resource queries.
#[derive(FromRow)]
struct ResourceRow {
    course_name: String,
    course_code: Option<String>,
    week_number: i32,
    resource_title: Option<String>,
    resource_url: String,
    resource_order: i32,
}

impl From<ResourceRow> for Resource {
    fn from(row: ResourceRow) -> Self {
        Self {
            course_name: row.course_name,
            course_code: row.course_code,
            week_number: row.week_number,
            resource_title: row.resource_title,
            resource_url: row.resource_url,
            resource_order: row.resource_order,
        }
    }
}

/// Row type for the course listing.
#[derive(FromRow)]
struct CourseRow {
    course_name: String,
    course_code: Option<String>,
}

/// `LIKE` pattern matching `course_name` anywhere in the column.
fn contains_pattern(course_name: &str) -> String {
    format!("%{course_name}%")
}

/// Repository for course resource lookups.
#[derive(Clone)]
pub struct ResourceRepository {
    pool: MySqlPool,
}

impl ResourceRepository {
    /// Creates a new repository.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Lists resources for a course, optionally limited to one week,
    /// ordered by week then position.
    pub async fn list_for_course(
        &self,
        course_name: &str,
        week_number: Option<i32>,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let rows: Vec<ResourceRow> = sqlx::query_as(
            r#"
            SELECT course_name, course_code, week_number,
                   resource_title, resource_url, resource_order
            FROM course_resources
            WHERE LOWER(course_name) LIKE LOWER(?)
              AND (? IS NULL OR week_number = ?)
            ORDER BY week_number, resource_order
            "#,
        )
        .bind(contains_pattern(course_name))
        .bind(week_number)
        .bind(week_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Resource::from).collect())
    }

    /// Lists every course that has resources, by name.
    pub async fn list_courses(&self) -> Result<Vec<CourseSummary>, sqlx::Error> {
        let rows: Vec<CourseRow> = sqlx::query_as(
            r#"
            SELECT DISTINCT course_name, course_code
            FROM course_resources
            ORDER BY course_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CourseSummary {
                course_name: r.course_name,
                course_code: r.course_code,
            })
            .collect())
    }

    /// Lists the weeks that have resources for a course, ascending.
    pub async fn list_weeks(&self, course_name: &str) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT DISTINCT week_number
            FROM course_resources
            WHERE LOWER(course_name) LIKE LOWER(?)
            ORDER BY week_number
            "#,
        )
        .bind(contains_pattern(course_name))
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_name() {
        assert_eq!(contains_pattern("Databases"), "%Databases%");
    }
}
