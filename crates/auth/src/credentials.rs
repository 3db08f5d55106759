use std::collections::HashMap;

use crate::{LoginError, Principal};

/// One username/password pair as typed by the operator.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    pub username: String,
    pub password: String,
}

impl LoginAttempt {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs and panic messages.
impl core::fmt::Debug for LoginAttempt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginAttempt")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Credential-check collaborator: decides a single attempt.
pub trait CredentialCheck {
    fn verify(&self, attempt: &LoginAttempt) -> Result<Principal, LoginError>;
}

/// Plaintext credential table held in memory.
///
/// The application configures exactly one entry; the table shape stays a map
/// so a lookup is a single keyed comparison.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    users: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn single(username: impl Into<String>, password: impl Into<String>) -> Self {
        let mut users = HashMap::with_capacity(1);
        users.insert(username.into(), password.into());
        Self { users }
    }
}

impl core::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("users", &self.users.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CredentialCheck for StaticCredentials {
    fn verify(&self, attempt: &LoginAttempt) -> Result<Principal, LoginError> {
        match self.users.get(&attempt.username) {
            Some(password) if *password == attempt.password => {
                Ok(Principal::new(attempt.username.clone()))
            }
            _ => Err(LoginError::InvalidCredentials),
        }
    }
}
