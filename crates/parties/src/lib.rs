//! Parties domain module (suppliers).
//!
//! This crate contains the supplier entity, implemented purely as
//! deterministic domain logic (no IO, no console, no storage).

pub mod supplier;

pub use supplier::Supplier;
