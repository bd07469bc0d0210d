//! Core domain types and utilities for the lecture-bot webhook.
//!
//! This crate provides the foundational types, error handling, and the
//! read-only timetable records shared by the conversation and server crates.

pub mod error;
pub mod id;
pub mod record;

pub use error::Result;
pub use id::{ParseSessionPathError, SessionPath};
pub use record::{CourseSummary, Lecture, Resource};
