//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod account;
mod credential;
mod transaction;
pub mod result;

pub use account::BankAccount;
pub use credential::CredentialHash;
pub use transaction::{Transaction, TransactionKind};
