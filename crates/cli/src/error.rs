use thiserror::Error;

use stockroom_auth::LoginError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Standard input reached end-of-file.
    #[error("input closed")]
    InputClosed,

    #[error("invalid number for {field}: {input:?}")]
    MalformedNumber { field: &'static str, input: String },

    #[error(transparent)]
    Login(#[from] LoginError),
}
