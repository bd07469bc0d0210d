//! Wire types for the dialogue platform's webhook protocol.
//!
//! Only the fields this service reads are modelled; everything else in the
//! payload is ignored.

use lecture_bot_conversation::{Context, ContextName, Parameters, Reply, Turn};
use serde::{Deserialize, Serialize};

/// An inbound webhook call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    /// Session path of the conversation, e.g. `projects/p/agent/sessions/s`.
    #[serde(default)]
    pub session: Option<String>,
    pub query_result: QueryResult,
}

/// The platform's interpretation of the user's utterance.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub intent: MatchedIntent,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default)]
    pub output_contexts: Vec<WireContext>,
}

/// The intent the platform matched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedIntent {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A context as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireContext {
    pub name: String,
    #[serde(default)]
    pub lifespan_count: u32,
    #[serde(default)]
    pub parameters: Parameters,
}

impl From<WireContext> for Context {
    fn from(ctx: WireContext) -> Self {
        Self {
            name: ContextName::parse(&ctx.name),
            lifespan: ctx.lifespan_count,
            parameters: ctx.parameters,
        }
    }
}

impl From<Context> for WireContext {
    fn from(ctx: Context) -> Self {
        Self {
            name: ctx.name.to_string(),
            lifespan_count: ctx.lifespan,
            parameters: ctx.parameters,
        }
    }
}

impl From<WebhookRequest> for Turn {
    fn from(request: WebhookRequest) -> Self {
        let query = request.query_result;
        Self {
            intent: query.intent.display_name,
            action: query.action,
            parameters: query.parameters,
            contexts: query.output_contexts.into_iter().map(Context::from).collect(),
            session: request.session.and_then(|s| s.parse().ok()),
        }
    }
}

/// The webhook reply.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_contexts: Vec<WireContext>,
}

impl WebhookResponse {
    /// A reply carrying only text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: text.into(),
            output_contexts: Vec::new(),
        }
    }
}

impl From<Reply> for WebhookResponse {
    fn from(reply: Reply) -> Self {
        Self {
            fulfillment_text: reply.fulfillment_text,
            output_contexts: reply
                .output_contexts
                .into_iter()
                .map(WireContext::from)
                .collect(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Body of `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub status: String,
    pub endpoints: Endpoints,
}

/// Endpoint listing inside [`ServiceInfo`].
#[derive(Debug, Serialize, Deserialize)]
pub struct Endpoints {
    pub webhook: String,
    pub health: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lecture_bot_conversation::{ContextTag, PROMPT_LIFESPAN};
    use serde_json::json;

    const SESSION: &str = "projects/uni-bot/agent/sessions/4f1c";

    #[test]
    fn request_parses_into_turn() {
        let body = json!({
            "responseId": "r-1",
            "session": SESSION,
            "queryResult": {
                "queryText": "2nd year",
                "action": "provide.year",
                "parameters": {"year_level": 2},
                "intent": {"name": "projects/uni-bot/agent/intents/abc", "displayName": "Schedule.Query.ProvideYear"},
                "outputContexts": [{
                    "name": format!("{SESSION}/contexts/awaiting-year"),
                    "lifespanCount": 4,
                    "parameters": {"program": "Computer Science", "day_query": "today"}
                }]
            }
        });
        let request: WebhookRequest = serde_json::from_value(body).expect("request");
        let turn = Turn::from(request);

        assert_eq!(turn.intent.as_deref(), Some("Schedule.Query.ProvideYear"));
        assert_eq!(turn.action.as_deref(), Some("provide.year"));
        assert_eq!(turn.parameters.integer("year_level"), Ok(Some(2)));
        assert_eq!(turn.contexts.len(), 1);
        assert_eq!(turn.contexts[0].name.tag, ContextTag::AwaitingYear);
        assert_eq!(turn.contexts[0].lifespan, 4);
        assert_eq!(turn.session.map(|s| s.to_string()).as_deref(), Some(SESSION));
    }

    #[test]
    fn optional_fields_default() {
        let request: WebhookRequest =
            serde_json::from_value(json!({"queryResult": {"intent": {}}})).expect("request");
        let turn = Turn::from(request);

        assert!(turn.intent.is_none());
        assert!(turn.parameters.is_empty());
        assert!(turn.contexts.is_empty());
        assert!(turn.session.is_none());
    }

    #[test]
    fn missing_query_result_is_rejected() {
        assert!(serde_json::from_value::<WebhookRequest>(json!({"session": SESSION})).is_err());
    }

    #[test]
    fn final_reply_omits_contexts() {
        let value = serde_json::to_value(WebhookResponse::from(Reply::text("done"))).expect("json");
        assert_eq!(value, json!({"fulfillmentText": "done"}));
    }

    #[test]
    fn prompt_reply_serializes_context() {
        let reply = Reply::prompt(
            "Which week?",
            Context::prompt(
                Some(SESSION.parse().expect("session")),
                ContextTag::AwaitingWeek,
                Parameters::new().with("course_name", "Databases"),
            ),
        );
        let value = serde_json::to_value(WebhookResponse::from(reply)).expect("json");

        assert_eq!(
            value,
            json!({
                "fulfillmentText": "Which week?",
                "outputContexts": [{
                    "name": format!("{SESSION}/contexts/awaiting-week"),
                    "lifespanCount": PROMPT_LIFESPAN,
                    "parameters": {"course_name": "Databases"}
                }]
            })
        );
    }
}
