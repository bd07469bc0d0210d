//! Database repository for the lecture timetable.

use lecture_bot_conversation::LectureQuery;
use lecture_bot_core::Lecture;
use sqlx::{FromRow, MySqlPool};

/// Row type for lecture queries.
#[derive(FromRow)]
struct LectureRow {
    course_code: String,
    title: String,
    start_time: String,
    end_time: String,
    venue: Option<String>,
    topic: Option<String>,
    weekday: String,
}

impl From<LectureRow> for Lecture {
    fn from(row: LectureRow) -> Self {
        Self {
            course_code: row.course_code,
            title: row.title,
            start_time: row.start_time,
            end_time: row.end_time,
            venue: row.venue,
            topic: row.topic,
            weekday: row.weekday,
        }
    }
}

/// Repository for lecture lookups.
#[derive(Clone)]
pub struct LectureRepository {
    pool: MySqlPool,
}

impl LectureRepository {
    /// Creates a new repository.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Lists a program's lectures for one year level and weekday, earliest first.
    ///
    /// Times are returned as `HH:MM:SS` text.
    pub async fn list_for_day(&self, query: &LectureQuery) -> Result<Vec<Lecture>, sqlx::Error> {
        let rows: Vec<LectureRow> = sqlx::query_as(
            r#"
            SELECT course_code, title,
                   CAST(start_time AS CHAR) AS start_time,
                   CAST(end_time AS CHAR) AS end_time,
                   venue, topic, weekday
            FROM lectures
            WHERE program = ?
              AND year_level = ?
              AND weekday = ?
            ORDER BY lectures.start_time
            "#,
        )
        .bind(query.program.as_deref())
        .bind(query.year_level)
        .bind(query.weekday.to_lowercase())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Lecture::from).collect())
    }
}
