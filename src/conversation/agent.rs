use async_trait::async_trait;
use std::collections::VecDeque;
use thiserror::Error;
use tokio::sync::Mutex;

use super::{parse_reply, AgentReply, ChatMessage};
use crate::model::OrderState;

/// Failures of the agent call itself. A reply that parses but breaks the
/// menu rules is not an error; [`review_reply`](super::review_reply) handles it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AgentError {
    #[error("Agent credentials are invalid or not set: {0}")]
    Authentication(String),

    #[error("Agent rate limit or quota exceeded: {0}")]
    RateLimited(String),

    #[error("Failed to get a valid reply from the agent: {0}")]
    MalformedReply(String),

    #[error("Agent call failed: {0}")]
    Other(String),
}

impl AgentError {
    /// Sorts a provider's error text into a variant.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains("API key") {
            AgentError::Authentication(message)
        } else if message.contains("quota") || message.contains("rate") {
            AgentError::RateLimited(message)
        } else {
            AgentError::Other(message)
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, AgentError::RateLimited(_) | AgentError::MalformedReply(_))
    }
}

impl From<String> for AgentError {
    fn from(msg: String) -> Self {
        AgentError::classify(msg)
    }
}

/// The external producer of candidate order states.
///
/// `history` ends with the customer's latest message. The reply must carry a
/// complete replacement for `current`, not a diff.
#[async_trait]
pub trait OrderAgent: Send + Sync {
    async fn propose(
        &self,
        history: &[ChatMessage],
        current: &OrderState,
    ) -> Result<AgentReply, AgentError>;
}

/// Replays a queue of canned replies, one per turn.
#[derive(Default)]
pub struct ScriptedAgent {
    replies: Mutex<VecDeque<Result<AgentReply, AgentError>>>,
}

impl ScriptedAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: impl IntoIterator<Item = AgentReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Ok).collect()),
        }
    }

    pub async fn push_reply(&self, reply: AgentReply) {
        self.replies.lock().await.push_back(Ok(reply));
    }

    /// Queues raw agent output, parsed the way a live reply would be.
    pub async fn push_raw(&self, text: &str) {
        self.replies.lock().await.push_back(parse_reply(text));
    }

    pub async fn push_error(&self, error: AgentError) {
        self.replies.lock().await.push_back(Err(error));
    }

    pub async fn remaining(&self) -> usize {
        self.replies.lock().await.len()
    }
}

#[async_trait]
impl OrderAgent for ScriptedAgent {
    async fn propose(
        &self,
        _history: &[ChatMessage],
        _current: &OrderState,
    ) -> Result<AgentReply, AgentError> {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::Other("script exhausted".to_string())))
    }
}
