//! The order store: [`OrderRecord`] managed by a [`ResourceActor`].

mod actions;
mod context;
pub mod entity;
pub mod error;

pub use actions::*;
pub use context::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::OrderRecord;

/// Creates a new Order actor and its client. The actor still has to be
/// spawned with `run(OrderContext)`.
pub fn new(buffer_size: usize) -> (ResourceActor<OrderRecord>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
