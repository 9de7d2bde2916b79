//! # System Lifecycle
//!
//! Starting, wiring and stopping the order store.
//!
//! The store is one [`ResourceActor`](crate::framework::ResourceActor) in its
//! own Tokio task. Its dependencies (the clock) are injected when it starts
//! running, not when it is constructed:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(config.store_buffer);
//! let handle = tokio::spawn(order_actor.run(OrderContext::new(clock)));
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop every client**: the sender side of the channel closes.
//! 2. **The actor notices**: `receiver.recv()` returns `None` once the queue drains.
//! 3. **Await the task**: a panic inside the actor surfaces as an error here.
//!
//! Clones of [`OrderClient`](crate::clients::OrderClient) held elsewhere keep
//! the channel open, so drop them before calling
//! [`shutdown`](OrderSystem::shutdown).
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber once per process. See the
//! [`tracing`](self::tracing) module for the log format.

pub mod order_system;
pub mod tracing;

pub use order_system::*;
pub use self::tracing::setup_tracing;
