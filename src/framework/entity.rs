//! The contract a type implements to be stored and served by a
//! [`ResourceActor`](super::ResourceActor).
//!
//! Associated types pin down the payload of every request, so an order actor
//! only ever accepts order payloads. Lifecycle hooks are async and receive the
//! actor's `Context`, which is handed over when the actor starts running
//! rather than when it is built.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier; the actor mints these from a `u32` counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for a create request.
    type Create: Send + Sync + Debug;

    /// Payload for an update request.
    type Update: Send + Sync + Debug;

    /// Entity-specific operations beyond CRUD.
    type Action: Send + Sync + Debug;

    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected through `run()`. Use `()` for none.
    type Context: Send + Sync;

    /// One error enum for the whole entity, not one per action.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the entity from a fresh id and the create payload. Runs before
    /// [`on_create`](Self::on_create); an `Err` here stores nothing.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Runs after construction and before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before removal; an `Err` keeps the entity.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
