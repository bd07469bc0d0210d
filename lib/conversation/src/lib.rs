//! Conversation handling for the lecture-bot webhook.
//!
//! This crate provides:
//!
//! - **Context protocol**: parsing and emitting the platform's lifespan-bounded
//!   contexts that carry partial requests between turns
//! - **Slot filling**: the schedule and resource handlers that either prompt
//!   for the next missing slot or complete the request
//! - **Routing**: selecting a handler from the turn's intent or action
//! - **Formatting**: turning lecture and resource records into reply text
//!
//! No turn retains in-process memory; everything needed for the next turn
//! travels in the returned contexts.

pub mod catalog;
pub mod context;
pub mod day;
pub mod error;
pub mod format;
pub mod parameter;
pub mod resource;
pub mod router;
pub mod schedule;

pub use catalog::{CourseCatalog, LectureQuery};
pub use context::{Context, ContextName, ContextTag, PROMPT_LIFESPAN};
pub use day::{Clock, DayQuery, SystemClock};
pub use error::{ConversationError, SlotError};
pub use parameter::Parameters;
pub use resource::{ResourceSlots, WeekSlot, normalize_course_name};
pub use router::{Dispatcher, HELP_MESSAGE, Intent, Reply, Turn};
pub use schedule::ScheduleSlots;
