//! Database access for lecture-bot.
//!
//! This module provides data access for:
//! - The lecture timetable
//! - Course resources and the course catalog
//!
//! Repositories return `sqlx` errors; [`SqlCourseCatalog`] is the boundary
//! that turns them into empty results for the conversation layer.

pub mod catalog;
pub mod lecture;
pub mod resource;

pub use catalog::SqlCourseCatalog;
pub use lecture::LectureRepository;
pub use resource::ResourceRepository;
