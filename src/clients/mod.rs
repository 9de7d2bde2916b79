//! Domain clients over [`ResourceClient`](crate::framework::ResourceClient).

pub mod actor_client;
pub mod order_client;

pub use actor_client::*;
pub use order_client::*;
