//! Products domain module (stocked items).
//!
//! This crate contains the item entity, implemented purely as deterministic
//! domain logic (no IO, no console, no storage).

pub mod item;

pub use item::Item;
