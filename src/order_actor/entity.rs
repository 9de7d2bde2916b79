//! [`ActorEntity`] implementation that lets the generic actor store
//! [`OrderRecord`]s.
//!
//! The store is the last gate before an order reaches the fulfillment board,
//! so creation re-runs validation on the payload no matter what the caller
//! already checked.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::actions::{OrderAction, OrderActionResult};
use super::context::OrderContext;
use super::error::OrderError;
use crate::framework::ActorEntity;
use crate::model::{OrderCreate, OrderId, OrderRecord, OrderUpdate};
use crate::pricing::Receipt;
use crate::rules::validate;

#[async_trait]
impl ActorEntity for OrderRecord {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    /// Refuses an empty payload or one with any validation error.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.payload.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        let errors = validate(&params.payload);
        if let Some(first) = errors.first() {
            return Err(OrderError::Rejected {
                reason: first.message.clone(),
                errors,
            });
        }
        // Stamped for real in on_create, where the clock is available.
        Ok(OrderRecord::new(id, params.payload, DateTime::<Utc>::default()))
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        let now = ctx.clock.now();
        self.created_at = now;
        self.updated_at = now;
        Ok(())
    }

    /// Store-level status write. Any status may be written, including a
    /// step backwards.
    async fn on_update(&mut self, update: OrderUpdate, ctx: &OrderContext) -> Result<(), OrderError> {
        self.status = update.status;
        self.updated_at = ctx.clock.now();
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::Advance => {
                let next = self.status.next().ok_or_else(|| OrderError::InvalidTransition {
                    id: self.id.to_string(),
                    status: self.status,
                })?;
                self.status = next;
                self.updated_at = ctx.clock.now();
                Ok(OrderActionResult::Advance(next))
            }
            OrderAction::Receipt => Ok(OrderActionResult::Receipt(Receipt::for_order(&self.payload))),
        }
    }
}
