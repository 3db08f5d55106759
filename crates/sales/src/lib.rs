//! Sales domain module (customer orders).
//!
//! This crate contains the order entity and its lines, implemented purely as
//! deterministic domain logic (no IO, no console, no storage).

pub mod order;

pub use order::{Order, OrderLine};
