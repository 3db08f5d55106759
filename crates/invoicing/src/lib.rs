//! Invoicing domain module.
//!
//! Invoices are derived from orders on demand; this crate only knows how to
//! build one and how to total an order (no IO, no storage).

pub mod invoice;

pub use invoice::{Invoice, order_total};
