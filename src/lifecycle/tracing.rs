//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter whose
//! level comes from `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run     # one line per store operation
//! RUST_LOG=debug cargo run    # payloads, reconcile drops, client sends
//! RUST_LOG=coffee_order_engine::conversation=debug cargo run
//! ```
//!
//! Module paths are hidden (`with_target(false)`); the actor loop tags its
//! events with `entity_type` instead. With `RUST_LOG=info` placing and
//! advancing an order looks like:
//!
//! ```text
//! INFO Actor started entity_type="OrderRecord"
//! INFO place_order{items=2}: Created entity_type="OrderRecord" id=order_1 size=1
//! INFO place_order{items=2}: Order placed id=order_1
//! INFO Action ok entity_type="OrderRecord" id=order_1
//! ```
//!
//! Pure engine functions (pricing, validation) never log; everything that
//! crosses a task boundary does.

/// Installs the global subscriber. Call once, early in `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type carries the context instead
        .compact()
        .init();
}
