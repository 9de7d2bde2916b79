//! # Coffee Order Engine
//!
//! > **The order domain behind a conversational coffee-shop ordering bot.**
//!
//! An external agent talks to the customer and, every turn, proposes a full
//! replacement order. This crate decides what that order means: is it valid,
//! what does it cost, is it really done. Confirmed orders go to an in-process
//! store that the fulfillment board advances, and sales reports are computed
//! from the store.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### The agent is untrusted
//! Candidate orders deserialize even when they name things off the menu
//! ([`MenuToken`](model::MenuToken)), so the rules engine and not the parser
//! reports them. A completion claim is only honored when [`rules::validate`]
//! agrees, and restated drinks are collapsed by [`reconcile::reconcile`]
//! before anything else looks at them.
//!
//! ### Pure core, actor shell
//! Pricing, validation, reconciliation and aggregation are plain functions
//! over plain data; none of them log or touch a clock. The only mutable state
//! is the order store, a [`ResourceActor`](framework::ResourceActor) that owns
//! its records and serves requests one at a time.
//!
//! ### Money is exact
//! [`Money`](model::Money) counts cents. Sums never drift; only divisions
//! (average order value) round.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Domain ([`model`], [`pricing`], [`rules`], [`reconcile`])
//! - **Role**: The menu, the shape of an order and everything you can say
//!   about one without side effects.
//! - **Key items**: [`OrderState`](model::OrderState), [`pricing::price`],
//!   [`rules::validate`], [`reconcile::reconcile`].
//!
//! ### 2. The Conversation ([`conversation`])
//! - **Role**: The contract with the agent and a turn-by-turn session.
//! - **Key items**: [`OrderAgent`](conversation::OrderAgent),
//!   [`review_reply`](conversation::review_reply),
//!   [`ConversationSession`](conversation::ConversationSession).
//!
//! ### 3. The Store ([`framework`], [`order_actor`], [`clients`])
//! - **Role**: Persisting confirmed orders and moving them along the board.
//! - **Key items**: [`OrderClient`](clients::OrderClient),
//!   [`OrderError`](order_actor::OrderError).
//!
//! ### 4. The Numbers ([`metrics`])
//! - **Role**: Revenue, rankings, modifier mix and hourly load.
//! - **Key items**: [`metrics::aggregate`], [`Report`](metrics::Report).
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! - **Role**: Starting and stopping the store, logging, settings.
//! - **Key items**: [`OrderSystem`](lifecycle::OrderSystem),
//!   [`EngineConfig`](config::EngineConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod conversation;
pub mod framework;
pub mod lifecycle;
pub mod metrics;
pub mod model;
pub mod order_actor;
pub mod pricing;
pub mod reconcile;
pub mod rules;
