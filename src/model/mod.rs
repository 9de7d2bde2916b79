//! Pure data: the menu catalog, order items, money and persisted order records.
//!
//! [`OrderRecord`] is the one type here managed by an actor (see
//! [`order_actor`](crate::order_actor)); everything else is plain values.

pub mod catalog;
pub mod item;
pub mod money;
pub mod order;

pub use catalog::*;
pub use item::*;
pub use money::*;
pub use order::*;
