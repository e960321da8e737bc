//! Passbook - core business logic for a file-persisted personal banking ledger
//!
//! This crate implements the core domain logic behind a single-user banking
//! tool: named accounts protected by a credential, each with a balance and an
//! append-only transaction history, persisted to a single JSON file.
//!
//! - **domain**: Core business entities (BankAccount, Transaction, etc.)
//! - **store**: JSON file persistence (load, validate, atomic save)
//! - **manager**: Session handling and operation routing
//!
//! The crate never reads from or writes to the terminal; a UI layer is
//! expected to call [`AccountManager`] and render results itself.

pub mod domain;
pub mod manager;
pub mod store;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{BankAccount, CredentialHash, Transaction, TransactionKind};
pub use manager::AccountManager;
