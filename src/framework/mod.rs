//! Generic resource actor: the in-process order store.
//!
//! One [`ResourceActor`] owns a map of entities and serves create, get,
//! update, delete, list and custom actions over an mpsc channel, one message
//! at a time. Business rules live on the entity through [`ActorEntity`]; the
//! actor only routes, stores and logs.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - contract a managed type implements
//! - [`ResourceActor`] - the server loop
//! - [`ResourceClient`] - cloneable handle that sends requests
//! - [`FrameworkError`] - failures of the plumbing itself
//!
//! # Testing
//!
//! See [`mock`] for driving a client without spawning a real actor.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
