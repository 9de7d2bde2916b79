/// A persisted order: an immutable snapshot of the order state plus the
/// status the fulfillment board moves forward.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for OrderRecord`](#impl-ActorEntity-for-OrderRecord) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Update parameters ([`OrderUpdate`])
/// - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::item::OrderState;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Fulfillment status. Moves one way: pending, then in progress, then completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
}

impl OrderStatus {
    /// The status an explicit advance moves to, if any.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::InProgress),
            OrderStatus::InProgress => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub payload: OrderState,
}

impl OrderRecord {
    /// Creates a new pending record stamped at `now`.
    pub fn new(id: OrderId, payload: OrderState, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            status: OrderStatus::Pending,
            payload,
        }
    }
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub payload: OrderState,
}

/// Store-level status write. Not checked against the advance order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: OrderStatus,
}
