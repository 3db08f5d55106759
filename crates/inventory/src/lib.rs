//! Inventory domain module.
//!
//! This crate contains the `Inventory` aggregate: on-hand stock per item code,
//! the supplier table, and the append-only order list. Pure in-memory logic
//! (no IO, no console, no storage).

pub mod stock;

pub use stock::{Inventory, ItemDetails, StockEntry};
