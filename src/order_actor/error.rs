//! Error types for the order store.

use thiserror::Error;

use crate::model::OrderStatus;
use crate::rules::ValidationError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The payload had no items.
    #[error("Order has no items")]
    EmptyOrder,

    /// The payload failed validation. `reason` is the first error's message.
    #[error("Order rejected: {reason}")]
    Rejected {
        reason: String,
        errors: Vec<ValidationError>,
    },

    /// Advance was called on an order with nowhere left to go.
    #[error("Order {id} is already {status}")]
    InvalidTransition { id: String, status: OrderStatus },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    /// All validation errors behind a rejection; empty for other variants.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            OrderError::Rejected { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
