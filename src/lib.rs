//! Hamper
//!
//! Hamper is the shopping cart domain model of an e-commerce platform: a
//! passive value-object graph (cart, deliveries, items, totals) with pure
//! query and derivation helpers, consumed by an external cart service that
//! owns all mutation, persistence and orchestration.

pub mod cart;
pub mod prelude;
pub mod prices;
