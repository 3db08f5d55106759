//! Login gate: ask for credentials until one attempt passes.

use std::num::NonZeroU32;

use thiserror::Error;

use crate::{CredentialCheck, LoginAttempt, Principal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("login failed after {0} attempts")]
    AttemptsExhausted(u32),

    #[error("login aborted: input closed")]
    InputClosed,

    #[error("login prompt failed: {0}")]
    Prompt(String),
}

/// How many failed attempts the gate tolerates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Keep asking until a login succeeds or input closes.
    #[default]
    Unbounded,
    /// Give up after this many failed attempts.
    Limited(NonZeroU32),
}

impl RetryPolicy {
    /// `None` or `0` means unbounded.
    pub fn from_max_attempts(max: Option<u32>) -> Self {
        match max.and_then(NonZeroU32::new) {
            Some(n) => RetryPolicy::Limited(n),
            None => RetryPolicy::Unbounded,
        }
    }

    pub fn allows_another(self, failures: u32) -> bool {
        match self {
            RetryPolicy::Unbounded => true,
            RetryPolicy::Limited(max) => failures < max.get(),
        }
    }
}

/// Console side of the gate.
pub trait LoginPrompt {
    /// Read the next attempt; `Ok(None)` when input is closed.
    fn next_attempt(&mut self) -> Result<Option<LoginAttempt>, LoginError>;

    /// Called after a rejected attempt, before the next one is requested.
    fn rejected(&mut self, error: &LoginError) -> Result<(), LoginError>;
}

/// Run the login gate.
///
/// Returns the authenticated principal, or the reason the gate gave up.
pub fn authenticate<P, C>(
    prompt: &mut P,
    check: &C,
    policy: RetryPolicy,
) -> Result<Principal, LoginError>
where
    P: LoginPrompt + ?Sized,
    C: CredentialCheck + ?Sized,
{
    let mut failures: u32 = 0;

    loop {
        let Some(attempt) = prompt.next_attempt()? else {
            tracing::info!(failures, "login input closed");
            return Err(LoginError::InputClosed);
        };

        match check.verify(&attempt) {
            Ok(principal) => {
                tracing::info!(username = %principal.username(), failures, "login succeeded");
                return Ok(principal);
            }
            Err(err) => {
                failures = failures.saturating_add(1);
                tracing::warn!(username = %attempt.username, failures, "login rejected");
                if !policy.allows_another(failures) {
                    return Err(LoginError::AttemptsExhausted(failures));
                }
                prompt.rejected(&err)?;
            }
        }
    }
}
