//! `stockroom-auth` — operator login boundary.
//!
//! This crate is decoupled from the console: the CLI supplies a
//! [`LoginPrompt`] and a [`CredentialCheck`], and the gate decides when to
//! stop asking.

pub mod credentials;
pub mod gate;
pub mod principal;

pub use credentials::{CredentialCheck, LoginAttempt, StaticCredentials};
pub use gate::{LoginError, LoginPrompt, RetryPolicy, authenticate};
pub use principal::Principal;
