//! Course resource lookups.
//!
//! Slots are `course_name` and an optional `week_number`; no week means
//! every week. Course names are normalized through a fixed alias table
//! before any slot logic runs.

use crate::catalog::CourseCatalog;
use crate::context::{Context, ContextTag};
use crate::error::SlotError;
use crate::format;
use crate::parameter::{Parameters, slot};
use crate::router::Reply;
use lecture_bot_core::SessionPath;
use serde_json::Value as JsonValue;

const DCSP: &str = "Distributed and Cloud System Programming";
const DATABASES: &str = "Databases";
const FORENSICS: &str = "Digital Forensics";

/// Alias table, checked in order; the first alias contained in the
/// lowercased input wins.
const COURSE_ALIASES: [(&str, &str); 9] = [
    ("distributed", DCSP),
    ("cloud", DCSP),
    ("database", DATABASES),
    ("databases", DATABASES),
    ("forensics", FORENSICS),
    ("digital forensics", FORENSICS),
    ("dcsp", DCSP),
    ("db", DATABASES),
    ("df", FORENSICS),
];

/// Maps free-form course input to a catalog course name.
///
/// Input that matches no alias is returned unchanged.
#[must_use]
pub fn normalize_course_name(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    COURSE_ALIASES
        .iter()
        .find(|(alias, _)| lowered.contains(alias))
        .map_or_else(|| raw.to_string(), |(_, course)| (*course).to_string())
}

/// The week slot as read from the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekSlot {
    Missing,
    Week(i32),
    /// An answer asking for everything, such as "all weeks".
    AllWeeks,
}

impl WeekSlot {
    /// Reads the `week_number` slot.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidInteger`] for numbers that are not whole
    /// or do not fit a week number, whether sent as JSON numbers or text.
    pub fn from_parameters(params: &Parameters) -> Result<Self, SlotError> {
        match params.integer(slot::WEEK_NUMBER) {
            Ok(None) => Ok(Self::Missing),
            Ok(Some(week)) => i32::try_from(week).map(Self::Week).map_err(|_| {
                SlotError::InvalidInteger {
                    slot: slot::WEEK_NUMBER,
                    value: week.to_string(),
                }
            }),
            Err(err) => match params.get(slot::WEEK_NUMBER) {
                Some(JsonValue::String(text)) => Self::from_text(text, err),
                _ => Err(err),
            },
        }
    }

    /// Reads a free-text week answer. "all weeks" widens to every week;
    /// "Week 3", "3rd" and "3.0" all name week 3. Text with no week in it
    /// reads as missing so the week is asked for again.
    fn from_text(text: &str, err: SlotError) -> Result<Self, SlotError> {
        let lowered = text.to_lowercase();
        if lowered
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word == "all")
        {
            return Ok(Self::AllWeeks);
        }

        let Some(start) = lowered.find(|c: char| c.is_ascii_digit()) else {
            return Ok(Self::Missing);
        };
        let rest = &lowered[start..];
        let (digits, tail) = rest.split_at(leading_digits(rest));
        if let Some(fraction) = tail.strip_prefix('.') {
            // Only a zero fraction keeps the number whole.
            if fraction[..leading_digits(fraction)].bytes().any(|b| b != b'0') {
                return Err(err);
            }
        }

        match digits.parse::<i32>() {
            Ok(0) => Ok(Self::Missing),
            Ok(week) => Ok(Self::Week(week)),
            Err(_) => Err(err),
        }
    }
}

fn leading_digits(text: &str) -> usize {
    text.find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len())
}

/// Where a resource request stands after reading the turn's parameters.
///
/// A week without a course cannot be represented: the course is always
/// asked for first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSlots {
    NeedCourse,
    NeedWeek {
        course_name: String,
    },
    Ready {
        course_name: String,
        week_number: Option<i32>,
    },
}

impl ResourceSlots {
    /// Classifies the turn's parameters, normalizing the course name.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError`] when the week slot is unusable.
    pub fn from_parameters(params: &Parameters) -> Result<Self, SlotError> {
        let Some(course_name) = params
            .text(slot::COURSE_NAME)
            .map(|raw| normalize_course_name(&raw))
        else {
            return Ok(Self::NeedCourse);
        };

        Ok(match WeekSlot::from_parameters(params)? {
            WeekSlot::Missing => Self::NeedWeek { course_name },
            WeekSlot::Week(week) => Self::Ready {
                course_name,
                week_number: Some(week),
            },
            WeekSlot::AllWeeks => Self::Ready {
                course_name,
                week_number: None,
            },
        })
    }
}

/// Runs one resource turn.
pub async fn respond(
    slots: ResourceSlots,
    session: Option<SessionPath>,
    catalog: &dyn CourseCatalog,
) -> Reply {
    match slots {
        ResourceSlots::NeedCourse => {
            let courses = catalog.courses().await;
            tracing::debug!(courses = courses.len(), "asking for course");
            let course_list = courses
                .iter()
                .map(|c| format!("• {}", c.course_name))
                .collect::<Vec<_>>()
                .join("\n");
            Reply::prompt(
                format!(
                    "I can help you find lecture notes! \n\n\
                     Which course are you looking for?\n\n{course_list}"
                ),
                Context::prompt(session, ContextTag::AwaitingCourse, Parameters::new()),
            )
        }
        ResourceSlots::NeedWeek { course_name } => {
            let weeks = catalog.weeks(&course_name).await;
            if weeks.is_empty() {
                // No weeks on record: answer as if all weeks were asked for,
                // which reports that nothing was found.
                tracing::debug!(%course_name, "no weeks on record, skipping week prompt");
                return lookup(&course_name, None, catalog).await;
            }
            tracing::debug!(%course_name, weeks = ?weeks, "asking for week");
            let week_list = weeks
                .iter()
                .map(|w| format!("Week {w}"))
                .collect::<Vec<_>>()
                .join(", ");
            let text = format!(
                "Which week's materials do you need for {course_name}?\n\n\
                 Available: {week_list}\n\nOr say 'all weeks' to see everything."
            );
            Reply::prompt(
                text,
                Context::prompt(
                    session,
                    ContextTag::AwaitingWeek,
                    Parameters::new().with(slot::COURSE_NAME, course_name),
                ),
            )
        }
        ResourceSlots::Ready {
            course_name,
            week_number,
        } => lookup(&course_name, week_number, catalog).await,
    }
}

async fn lookup(course_name: &str, week_number: Option<i32>, catalog: &dyn CourseCatalog) -> Reply {
    let resources = catalog.resources(course_name, week_number).await;
    tracing::debug!(
        course_name,
        week_number,
        found = resources.len(),
        "resource lookup complete"
    );
    Reply::text(format::resources(&resources, course_name, week_number))
}
