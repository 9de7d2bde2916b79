use tracing::{info, instrument, warn};

use super::{review_reply, AgentError, AgentReply, ChatMessage, OrderAgent};
use crate::model::{Money, OrderState};
use crate::pricing::{order_total, Receipt};
use crate::rules::{missing_fields_for_drink, validate, ValidationError};

/// One customer's ordering conversation.
///
/// The session owns the chat history and the current order. Each turn hands
/// both to the agent and adopts the reviewed candidate as the new state.
pub struct ConversationSession<A: OrderAgent> {
    agent: A,
    history: Vec<ChatMessage>,
    state: OrderState,
    complete: bool,
}

impl<A: OrderAgent> ConversationSession<A> {
    pub fn new(agent: A) -> Self {
        Self {
            agent,
            history: Vec::new(),
            state: OrderState::default(),
            complete: false,
        }
    }

    /// Processes one customer message.
    ///
    /// On an agent failure the customer message is taken back out of the
    /// history, so the turn can be retried as if it never happened.
    #[instrument(skip(self), fields(turn = self.history.len() / 2 + 1))]
    pub async fn handle_turn(&mut self, text: &str) -> Result<AgentReply, AgentError> {
        self.history.push(ChatMessage::user(text));

        let reply = match self.agent.propose(&self.history, &self.state).await {
            Ok(reply) => reply,
            Err(e) => {
                self.history.pop();
                warn!(error = %e, retryable = e.is_retryable(), "Agent call failed");
                return Err(e);
            }
        };

        let reviewed = review_reply(reply);
        self.history
            .push(ChatMessage::assistant(reviewed.assistant_message.clone()));
        let changed = !reviewed.updated_order_state.same_items_as(&self.state);
        self.state = reviewed.updated_order_state.clone();
        self.complete = reviewed.is_complete;
        info!(items = self.state.len(), changed, complete = self.complete, "Turn handled");

        Ok(reviewed)
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn state(&self) -> &OrderState {
        &self.state
    }

    /// True once a reviewed reply said the order is done.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn validation_errors(&self) -> Vec<ValidationError> {
        validate(&self.state)
    }

    /// Fields each drink still needs, keyed by item index. Drinks with
    /// nothing missing are left out.
    pub fn missing_fields(&self) -> Vec<(usize, Vec<&'static str>)> {
        self.state
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let missing = missing_fields_for_drink(item.as_drink()?);
                (!missing.is_empty()).then_some((index, missing))
            })
            .collect()
    }

    pub fn total(&self) -> Money {
        order_total(&self.state)
    }

    pub fn receipt(&self) -> Receipt {
        Receipt::for_order(&self.state)
    }

    /// Clears the conversation for the next customer.
    pub fn reset(&mut self) {
        self.history.clear();
        self.state = OrderState::default();
        self.complete = false;
    }

    pub fn into_state(self) -> OrderState {
        self.state
    }
}
