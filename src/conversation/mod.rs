//! The boundary with the conversational agent.
//!
//! The agent is an untrusted producer: every turn it returns a complete
//! candidate [`OrderState`] plus a claim about whether the order is finished.
//! [`review_reply`] repairs restated drinks and overrides a completion claim the
//! rules do not back up. [`ConversationSession`] drives this turn by turn.

mod agent;
mod session;

pub use agent::*;
pub use session::*;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::OrderState;
use crate::reconcile::reconcile;
use crate::rules::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One agent turn as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentReply {
    pub assistant_message: String,
    pub updated_order_state: OrderState,
    pub is_complete: bool,
}

/// Parses a raw agent reply, tolerating a surrounding markdown code fence.
pub fn parse_reply(text: &str) -> Result<AgentReply, AgentError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```JSON"))
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let body = body.strip_suffix("```").unwrap_or(body).trim();
    serde_json::from_str(body).map_err(|e| AgentError::MalformedReply(e.to_string()))
}

/// Reconciles the candidate items, then refuses a completion claim that the
/// rules reject. A refused claim comes back incomplete, with the first error
/// message in place of the agent's own message.
pub fn review_reply(reply: AgentReply) -> AgentReply {
    let items = reconcile(&reply.updated_order_state.items);
    let updated_order_state = OrderState::new(items);

    if reply.is_complete {
        if let Some(first) = validate(&updated_order_state).into_iter().next() {
            warn!(reason = %first.message, "Agent claimed completion on an invalid order");
            return AgentReply {
                assistant_message: first.message,
                updated_order_state,
                is_complete: false,
            };
        }
    }

    AgentReply {
        updated_order_state,
        ..reply
    }
}
