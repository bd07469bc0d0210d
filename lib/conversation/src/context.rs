//! Conversation contexts: the platform-threaded carrier of partial requests.
//!
//! A context name encodes a session path and a tag, for example
//! `projects/p/agent/sessions/s/contexts/awaiting-year`. Names are parsed
//! once at the boundary into a [`ContextName`]; handlers and the router only
//! ever look at the [`ContextTag`].

use crate::parameter::Parameters;
use lecture_bot_core::SessionPath;
use lecture_bot_core::id::CONTEXTS_SEGMENT;
use std::fmt;

/// Number of turns a prompt context stays alive on the platform.
pub const PROMPT_LIFESPAN: u32 = 5;

/// What an active context says the conversation is waiting on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextTag {
    /// Waiting for the student's program.
    AwaitingProgram,
    /// Waiting for the student's year level.
    AwaitingYear,
    /// Waiting for a course choice.
    AwaitingCourse,
    /// Waiting for a week choice.
    AwaitingWeek,
    /// Any context this service does not own.
    Other(String),
}

impl ContextTag {
    /// Parses the trailing tag segment of a context name.
    #[must_use]
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "awaiting-program" => Self::AwaitingProgram,
            "awaiting-year" => Self::AwaitingYear,
            "awaiting-course" => Self::AwaitingCourse,
            "awaiting-week" => Self::AwaitingWeek,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the wire form of the tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AwaitingProgram => "awaiting-program",
            Self::AwaitingYear => "awaiting-year",
            Self::AwaitingCourse => "awaiting-course",
            Self::AwaitingWeek => "awaiting-week",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ContextTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed context name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextName {
    /// Session the context belongs to; `None` for a bare tag.
    pub session: Option<SessionPath>,
    pub tag: ContextTag,
}

impl ContextName {
    /// Creates a context name inside a session.
    #[must_use]
    pub fn new(session: Option<SessionPath>, tag: ContextTag) -> Self {
        Self { session, tag }
    }

    /// Parses a full context name.
    ///
    /// Names without a `/contexts/` segment are treated as a bare tag.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.rsplit_once(CONTEXTS_SEGMENT) {
            Some((session, tag)) => Self {
                session: session.parse().ok(),
                tag: ContextTag::from_segment(tag),
            },
            None => Self {
                session: None,
                tag: ContextTag::from_segment(name),
            },
        }
    }
}

impl fmt::Display for ContextName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.session {
            Some(session) => f.write_str(&session.context_name(self.tag.as_str())),
            None => f.write_str(self.tag.as_str()),
        }
    }
}

/// A named, lifespan-bounded bag of parameters.
///
/// The platform decrements `lifespan` each turn; this service only sets it.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub name: ContextName,
    pub lifespan: u32,
    pub parameters: Parameters,
}

impl Context {
    /// Creates a prompt context that waits on `tag` for [`PROMPT_LIFESPAN`] turns.
    #[must_use]
    pub fn prompt(session: Option<SessionPath>, tag: ContextTag, parameters: Parameters) -> Self {
        Self {
            name: ContextName::new(session, tag),
            lifespan: PROMPT_LIFESPAN,
            parameters,
        }
    }

    /// Returns true if this context waits on `tag`.
    #[must_use]
    pub fn is(&self, tag: &ContextTag) -> bool {
        &self.name.tag == tag
    }
}

/// Returns the last context in `contexts` waiting on `tag`.
///
/// The platform lists contexts oldest first; when a tag appears more than
/// once the last entry wins.
#[must_use]
pub fn find_last<'a>(contexts: &'a [Context], tag: &ContextTag) -> Option<&'a Context> {
    contexts.iter().rev().find(|c| c.is(tag))
}
