//! Result and error types for the core library

use rust_decimal::Decimal;
use thiserror::Error;

/// Core library error type
///
/// Every variant is recoverable by the caller; the core never terminates the
/// process. Validation failures are raised before any state is mutated, so a
/// returned error always leaves the ledger exactly as it was.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Credential check failed")]
    BadCredential,

    #[error("No account is logged in")]
    NotLoggedIn,

    #[error("Stored ledger is corrupt: {0}")]
    CorruptStorage(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] std::io::Error),

    #[error("Credential hashing failed: {0}")]
    Credential(String),
}

impl Error {
    /// Create a corrupt storage error
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptStorage(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
