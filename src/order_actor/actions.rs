//! Custom actions for the order store.
//!
//! Handled by [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action)
//! on [`OrderRecord`](crate::model::OrderRecord).

use crate::model::OrderStatus;
use crate::pricing::Receipt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Moves the order one step along pending, in progress, completed.
    ///
    /// # Errors
    /// Fails on a completed order.
    Advance,
    /// Prices the stored payload.
    Receipt,
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// The status the order moved to.
    Advance(OrderStatus),
    Receipt(Receipt),
}
