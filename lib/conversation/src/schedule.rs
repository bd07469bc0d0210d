//! Lecture schedule lookups.
//!
//! Three slots are needed: `program`, `year_level` and `day_query` (which
//! defaults to "today"). Each turn either prompts for the next missing slot,
//! carrying the known ones forward in a context, or answers and ends the
//! conversation.

use crate::catalog::{CourseCatalog, LectureQuery};
use crate::context::{Context, ContextTag};
use crate::day::{Clock, DayQuery};
use crate::error::SlotError;
use crate::format;
use crate::parameter::{Parameters, slot};
use crate::router::Reply;
use lecture_bot_core::SessionPath;

const PROGRAM_PROMPT: &str = "I'd be happy to show you your lecture schedule! 📅\n\n\
    First, what program are you studying? (e.g., Computer Science, Software Engineering, Information Technology)";

/// Where a schedule request stands after reading the turn's parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleSlots {
    /// Neither program nor year is known.
    NeedProgram { day: DayQuery },
    /// Program is known, year is not.
    NeedYear { program: String, day: DayQuery },
    /// Everything needed to look up lectures.
    Ready {
        program: String,
        year_level: i64,
        day: DayQuery,
    },
    /// A year arrived without a program.
    ///
    /// This does not prompt for the program: it runs the lookup with no
    /// program, which finds nothing. Kept as-is pending product confirmation.
    YearWithoutProgram { year_level: i64, day: DayQuery },
}

impl ScheduleSlots {
    /// Classifies the turn's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidInteger`] when `year_level` is present but
    /// not a whole number.
    pub fn from_parameters(params: &Parameters) -> Result<Self, SlotError> {
        let program = params.text(slot::PROGRAM);
        let year_level = params.integer(slot::YEAR_LEVEL)?;
        let day = params
            .text(slot::DAY_QUERY)
            .map(|raw| DayQuery::parse(&raw))
            .unwrap_or_default();

        Ok(match (program, year_level) {
            (None, None) => Self::NeedProgram { day },
            (Some(program), None) => Self::NeedYear { program, day },
            (Some(program), Some(year_level)) => Self::Ready {
                program,
                year_level,
                day,
            },
            (None, Some(year_level)) => Self::YearWithoutProgram { year_level, day },
        })
    }
}

/// Runs one schedule turn.
pub async fn respond(
    slots: ScheduleSlots,
    session: Option<SessionPath>,
    catalog: &dyn CourseCatalog,
    clock: &dyn Clock,
) -> Reply {
    match slots {
        ScheduleSlots::NeedProgram { day } => {
            tracing::debug!(day_query = day.as_str(), "asking for program");
            let carried = Parameters::new().with(slot::DAY_QUERY, day.as_str());
            Reply::prompt(
                PROGRAM_PROMPT,
                Context::prompt(session, ContextTag::AwaitingProgram, carried),
            )
        }
        ScheduleSlots::NeedYear { program, day } => {
            tracing::debug!(%program, day_query = day.as_str(), "asking for year level");
            let text = format!(
                "Great! You're studying {program}. 🎓\n\n\
                 What year level are you in? (1st, 2nd, 3rd, or 4th year)"
            );
            let carried = Parameters::new()
                .with(slot::PROGRAM, program)
                .with(slot::DAY_QUERY, day.as_str());
            Reply::prompt(
                text,
                Context::prompt(session, ContextTag::AwaitingYear, carried),
            )
        }
        ScheduleSlots::Ready {
            program,
            year_level,
            day,
        } => lookup(Some(program), year_level, &day, catalog, clock).await,
        ScheduleSlots::YearWithoutProgram { year_level, day } => {
            tracing::warn!(year_level, "year level given without program, querying anyway");
            lookup(None, year_level, &day, catalog, clock).await
        }
    }
}

async fn lookup(
    program: Option<String>,
    year_level: i64,
    day: &DayQuery,
    catalog: &dyn CourseCatalog,
    clock: &dyn Clock,
) -> Reply {
    let weekday = day.resolve(clock.today());
    let query = LectureQuery {
        program,
        year_level,
        weekday,
    };
    let lectures = catalog.lectures(&query).await;
    tracing::debug!(
        program = ?query.program,
        year_level,
        weekday = %query.weekday,
        found = lectures.len(),
        "lecture lookup complete"
    );
    Reply::text(format::lectures(&lectures, &query.weekday))
}
