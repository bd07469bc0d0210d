//! Turn routing: from intent label to conversation handler.
//!
//! The router pulls whatever a previous prompt carried forward out of the
//! active contexts, merges it into the turn's parameters and hands the
//! result to the schedule or resource handler. It holds no state of its own.

use crate::catalog::CourseCatalog;
use crate::context::{Context, ContextTag, find_last};
use crate::day::Clock;
use crate::error::ConversationError;
use crate::parameter::{Parameters, slot};
use crate::resource::{self, ResourceSlots};
use crate::schedule::{self, ScheduleSlots};
use lecture_bot_core::{Result, SessionPath};
use std::sync::Arc;

/// Reply for turns no handler recognizes.
pub const HELP_MESSAGE: &str = "I'm here to help with your lecture schedule and course materials! \
    Just ask me 'What are my lectures today?' or 'Show me lecture notes for Databases week 3'";

/// The request a turn is making.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ScheduleQuery,
    ProvideProgram,
    ProvideYear,
    ScheduleComplete,
    ResourcesQuery,
    ProvideCourse,
    ProvideWeek,
    Unrecognized,
}

/// Intent display names and action labels, in matching order.
const INTENT_TABLE: [(Intent, &str, &str); 7] = [
    (Intent::ScheduleQuery, "Schedule.Query", "query.schedule"),
    (Intent::ProvideProgram, "Schedule.Query.ProvideProgram", "provide.program"),
    (Intent::ProvideYear, "Schedule.Query.ProvideYear", "provide.year"),
    (Intent::ScheduleComplete, "Schedule.Query.Complete", "query.complete"),
    (Intent::ResourcesQuery, "Resources.Query", "query.resources"),
    (Intent::ProvideCourse, "Resources.ProvideCourse", "provide.course"),
    (Intent::ProvideWeek, "Resources.ProvideWeek", "provide.week"),
];

impl Intent {
    /// Selects the intent matching either the display name or the action.
    ///
    /// Upstream agents label turns one way or the other, so both are checked
    /// for every entry before moving to the next.
    #[must_use]
    pub fn classify(display_name: Option<&str>, action: Option<&str>) -> Self {
        INTENT_TABLE
            .iter()
            .find(|(_, name, act)| display_name == Some(*name) || action == Some(*act))
            .map_or(Self::Unrecognized, |(intent, _, _)| *intent)
    }
}

/// One inbound turn, already parsed from the wire.
#[derive(Debug, Clone, Default)]
pub struct Turn {
    pub intent: Option<String>,
    pub action: Option<String>,
    pub parameters: Parameters,
    /// Active contexts in the order the platform listed them.
    pub contexts: Vec<Context>,
    /// The request's own session path, if it sent one.
    pub session: Option<SessionPath>,
}

impl Turn {
    /// The session to name outbound contexts in: the first inbound
    /// context's session, else the request's.
    #[must_use]
    pub fn reply_session(&self) -> Option<SessionPath> {
        self.contexts
            .first()
            .and_then(|c| c.name.session.clone())
            .or_else(|| self.session.clone())
    }
}

/// What to send back for a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub fulfillment_text: String,
    /// Contexts to activate for the next turn; empty ends the conversation.
    pub output_contexts: Vec<Context>,
}

impl Reply {
    /// A final answer with no follow-up context.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: text.into(),
            output_contexts: Vec::new(),
        }
    }

    /// A prompt for a missing slot.
    #[must_use]
    pub fn prompt(text: impl Into<String>, context: Context) -> Self {
        Self {
            fulfillment_text: text.into(),
            output_contexts: vec![context],
        }
    }
}

/// Routes turns to handlers.
///
/// Storage and clock are injected so that nothing here touches
/// process-wide state.
#[derive(Clone)]
pub struct Dispatcher {
    catalog: Arc<dyn CourseCatalog>,
    clock: Arc<dyn Clock>,
}

impl Dispatcher {
    /// Creates a dispatcher over the given collaborators.
    pub fn new(catalog: Arc<dyn CourseCatalog>, clock: Arc<dyn Clock>) -> Self {
        Self { catalog, clock }
    }

    /// Handles one turn.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationError::HandlerFailed`] when a slot value is
    /// present but unusable.
    pub async fn handle(&self, turn: Turn) -> Result<Reply, ConversationError> {
        let intent = Intent::classify(turn.intent.as_deref(), turn.action.as_deref());
        tracing::debug!(?intent, contexts = turn.contexts.len(), "dispatching turn");

        let session = turn.reply_session();
        let Turn {
            mut parameters,
            contexts,
            ..
        } = turn;

        match intent {
            Intent::ScheduleQuery | Intent::ScheduleComplete => {
                self.schedule(&parameters, session).await
            }
            Intent::ProvideProgram => {
                let day = carried_text(&contexts, &ContextTag::AwaitingProgram, slot::DAY_QUERY);
                parameters.set(slot::DAY_QUERY, day.unwrap_or_else(|| "today".to_string()));
                self.schedule(&parameters, session).await
            }
            Intent::ProvideYear => {
                let carried = find_last(&contexts, &ContextTag::AwaitingYear);
                let program = carried.and_then(|c| c.parameters.text(slot::PROGRAM));
                let day = carried.and_then(|c| c.parameters.text(slot::DAY_QUERY));
                match program {
                    Some(program) => parameters.set(slot::PROGRAM, program),
                    None => parameters.clear(slot::PROGRAM),
                }
                parameters.set(slot::DAY_QUERY, day.unwrap_or_else(|| "today".to_string()));
                self.schedule(&parameters, session).await
            }
            Intent::ResourcesQuery => self.resources(&parameters, session).await,
            Intent::ProvideCourse => {
                for carried in contexts.iter().filter(|c| c.is(&ContextTag::AwaitingCourse)) {
                    parameters.merge(&carried.parameters);
                }
                self.resources(&parameters, session).await
            }
            Intent::ProvideWeek => {
                match carried_text(&contexts, &ContextTag::AwaitingWeek, slot::COURSE_NAME) {
                    Some(course) => parameters.set(slot::COURSE_NAME, course),
                    None => parameters.clear(slot::COURSE_NAME),
                }
                self.resources(&parameters, session).await
            }
            Intent::Unrecognized => Ok(Reply::text(HELP_MESSAGE)),
        }
    }

    async fn schedule(
        &self,
        parameters: &Parameters,
        session: Option<SessionPath>,
    ) -> Result<Reply, ConversationError> {
        let slots = ScheduleSlots::from_parameters(parameters)
            .map_err(|e| ConversationError::from_slot("schedule", &e))?;
        Ok(schedule::respond(slots, session, self.catalog.as_ref(), self.clock.as_ref()).await)
    }

    async fn resources(
        &self,
        parameters: &Parameters,
        session: Option<SessionPath>,
    ) -> Result<Reply, ConversationError> {
        let slots = ResourceSlots::from_parameters(parameters)
            .map_err(|e| ConversationError::from_slot("resources", &e))?;
        Ok(resource::respond(slots, session, self.catalog.as_ref()).await)
    }
}

fn carried_text(contexts: &[Context], tag: &ContextTag, key: &str) -> Option<String> {
    find_last(contexts, tag).and_then(|c| c.parameters.text(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LectureQuery;
    use crate::catalog::fake::{Call, FakeCatalog, lecture, resource};
    use crate::context::ContextName;
    use crate::day::tests::FixedClock;
    use chrono::NaiveDate;
    use serde_json::json;

    const SESSION: &str = "projects/uni-bot/agent/sessions/4f1c";

    fn dispatcher(catalog: Arc<FakeCatalog>) -> Dispatcher {
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).expect("date");
        Dispatcher::new(catalog, Arc::new(FixedClock(monday)))
    }

    fn context(tag: &str, parameters: serde_json::Value) -> Context {
        Context {
            name: ContextName::parse(&format!("{SESSION}/contexts/{tag}")),
            lifespan: 4,
            parameters: serde_json::from_value(parameters).expect("parameters"),
        }
    }

    fn turn(intent: &str, parameters: serde_json::Value, contexts: Vec<Context>) -> Turn {
        Turn {
            intent: Some(intent.to_string()),
            action: None,
            parameters: serde_json::from_value(parameters).expect("parameters"),
            contexts,
            session: None,
        }
    }

    #[test]
    fn classify_by_name_or_action() {
        assert_eq!(
            Intent::classify(Some("Schedule.Query"), None),
            Intent::ScheduleQuery
        );
        assert_eq!(
            Intent::classify(Some("Default Fallback Intent"), Some("provide.week")),
            Intent::ProvideWeek
        );
        assert_eq!(
            Intent::classify(None, Some("query.complete")),
            Intent::ScheduleComplete
        );
        assert_eq!(Intent::classify(Some("Greeting"), None), Intent::Unrecognized);
        assert_eq!(Intent::classify(None, None), Intent::Unrecognized);
    }

    #[test]
    fn classify_checks_table_order() {
        // Name matches a later row, action an earlier one: the earlier row wins.
        assert_eq!(
            Intent::classify(Some("Resources.Query"), Some("query.schedule")),
            Intent::ScheduleQuery
        );
    }

    #[test]
    fn reply_session_prefers_first_context() {
        let mut t = turn("Schedule.Query", json!({}), vec![context("other", json!({}))]);
        t.session = Some("projects/x/agent/sessions/y".parse().expect("session"));
        assert_eq!(t.reply_session().map(|s| s.to_string()).as_deref(), Some(SESSION));

        t.contexts.clear();
        assert_eq!(
            t.reply_session().map(|s| s.to_string()).as_deref(),
            Some("projects/x/agent/sessions/y")
        );
    }

    #[tokio::test]
    async fn unrecognized_turn_gets_help() {
        let catalog = Arc::new(FakeCatalog::default());
        let reply = dispatcher(catalog.clone())
            .handle(turn("Small.Talk", json!({}), vec![]))
            .await
            .expect("reply");

        assert_eq!(reply, Reply::text(HELP_MESSAGE));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn schedule_conversation_across_three_turns() {
        let catalog = Arc::new(FakeCatalog {
            lectures: vec![lecture("Compilers", "CS310", "11:00:00", "13:00:00", "tuesday")],
            ..Default::default()
        });
        let dispatcher = dispatcher(catalog.clone());

        // Turn 1: nothing known yet.
        let first = dispatcher
            .handle(turn(
                "Schedule.Query",
                json!({"day_query": "tomorrow"}),
                vec![context("__system_counters__", json!({}))],
            ))
            .await
            .expect("reply");
        let awaiting_program = first.output_contexts[0].clone();
        assert_eq!(awaiting_program.name.tag, ContextTag::AwaitingProgram);

        // Turn 2: program supplied, day recovered from context.
        let second = dispatcher
            .handle(turn(
                "Schedule.Query.ProvideProgram",
                json!({"program": "Computer Science"}),
                vec![awaiting_program],
            ))
            .await
            .expect("reply");
        let awaiting_year = second.output_contexts[0].clone();
        assert_eq!(awaiting_year.name.tag, ContextTag::AwaitingYear);
        assert_eq!(
            awaiting_year.parameters.text("day_query").as_deref(),
            Some("tomorrow")
        );

        // Turn 3: year supplied, program and day recovered from context.
        let third = dispatcher
            .handle(turn(
                "Schedule.Query.ProvideYear",
                json!({"year_level": 3}),
                vec![awaiting_year],
            ))
            .await
            .expect("reply");
        assert!(third.output_contexts.is_empty());
        assert!(third.fulfillment_text.contains("LECTURE 1: Compilers (CS310)"));
        assert_eq!(
            catalog.calls(),
            vec![Call::Lectures(LectureQuery {
                program: Some("Computer Science".to_string()),
                year_level: 3,
                weekday: "tuesday".to_string(),
            })]
        );
    }

    #[tokio::test]
    async fn provide_program_overrides_turn_day_with_context_or_today() {
        let catalog = Arc::new(FakeCatalog::default());
        let reply = dispatcher(catalog)
            .handle(turn(
                "Schedule.Query.ProvideProgram",
                json!({"program": "Information Technology", "day_query": "friday"}),
                vec![],
            ))
            .await
            .expect("reply");

        assert_eq!(
            reply.output_contexts[0].parameters.text("day_query").as_deref(),
            Some("today")
        );
    }

    #[tokio::test]
    async fn provide_year_without_context_drops_program() {
        let catalog = Arc::new(FakeCatalog::default());
        let reply = dispatcher(catalog.clone())
            .handle(turn(
                "Schedule.Query.ProvideYear",
                json!({"program": "Computer Science", "year_level": 2}),
                vec![],
            ))
            .await
            .expect("reply");

        assert!(reply.output_contexts.is_empty());
        assert_eq!(
            catalog.calls(),
            vec![Call::Lectures(LectureQuery {
                program: None,
                year_level: 2,
                weekday: "monday".to_string(),
            })]
        );
    }

    #[tokio::test]
    async fn both_slots_present_never_prompts() {
        let catalog = Arc::new(FakeCatalog::default());
        let dispatcher = dispatcher(catalog);
        for year in [1, 2, 3, 4] {
            let reply = dispatcher
                .handle(turn(
                    "Schedule.Query.Complete",
                    json!({"program": "Software Engineering", "year_level": year}),
                    vec![],
                ))
                .await
                .expect("reply");
            assert!(reply.output_contexts.is_empty());
        }
    }

    #[tokio::test]
    async fn invalid_year_is_reported() {
        let catalog = Arc::new(FakeCatalog::default());
        let result = dispatcher(catalog)
            .handle(turn(
                "Schedule.Query",
                json!({"program": "Computer Science", "year_level": "second"}),
                vec![],
            ))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn resource_conversation_recovers_course_from_context() {
        let catalog = Arc::new(FakeCatalog {
            resources: vec![
                resource("Databases", 1, 1, Some("ER modelling")),
                resource("Databases", 3, 1, Some("Transactions")),
            ],
            ..Default::default()
        });
        let dispatcher = dispatcher(catalog.clone());

        let first = dispatcher
            .handle(turn("Resources.Query", json!({"course_name": "db"}), vec![]))
            .await
            .expect("reply");
        assert!(first.fulfillment_text.contains("Available: Week 1, Week 3"));
        let awaiting_week = first.output_contexts[0].clone();

        let mut second_turn = turn("Default", json!({"week_number": "3"}), vec![awaiting_week]);
        second_turn.action = Some("provide.week".to_string());
        let second = dispatcher.handle(second_turn).await.expect("reply");

        assert!(second
            .fulfillment_text
            .starts_with("Here are the resources for Databases - Week 3:"));
        assert!(second.fulfillment_text.contains("Transactions"));
    }

    #[tokio::test]
    async fn provide_course_merges_context_parameters() {
        let catalog = Arc::new(FakeCatalog {
            resources: vec![resource("Digital Forensics", 2, 1, Some("Memory analysis"))],
            ..Default::default()
        });
        let reply = dispatcher(catalog)
            .handle(turn(
                "Resources.ProvideCourse",
                json!({"course_name": "forensics"}),
                vec![context("awaiting-course", json!({"week_number": 2}))],
            ))
            .await
            .expect("reply");

        assert!(reply.output_contexts.is_empty());
        assert!(reply.fulfillment_text.contains("Memory analysis"));
    }

    #[tokio::test]
    async fn provide_week_without_context_asks_for_course() {
        let catalog = Arc::new(FakeCatalog::default());
        let reply = dispatcher(catalog)
            .handle(turn(
                "Resources.ProvideWeek",
                json!({"course_name": "Databases", "week_number": 1}),
                vec![],
            ))
            .await
            .expect("reply");

        assert_eq!(reply.output_contexts[0].name.tag, ContextTag::AwaitingCourse);
    }
}
