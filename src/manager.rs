//! Account manager - session handling and operation routing
//!
//! [`AccountManager`] owns the account mapping, the storage location, and the
//! single logged-in session. All account creation, login/logout, and ledger
//! operations go through it; mutating operations persist synchronously so
//! the on-disk ledger never trails the in-memory one across a crash.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::result::{Error, Result};
use crate::domain::{BankAccount, CredentialHash, Transaction};
use crate::store;

/// Note attached to the transaction recorded for an opening balance
const INITIAL_DEPOSIT_NOTE: &str = "initial deposit";

/// Entry point for all ledger operations
///
/// The session is a key into the account mapping, scoped to this manager
/// instance; two managers have two independent sessions. Construction does
/// not touch storage - call [`load`](AccountManager::load) at startup.
pub struct AccountManager {
    storage_path: PathBuf,
    accounts: BTreeMap<String, BankAccount>,
    session: Option<String>,
}

impl AccountManager {
    /// Create a manager for the given storage location, with no accounts
    /// loaded and no session
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
            accounts: BTreeMap::new(),
            session: None,
        }
    }

    /// The storage location this manager reads and writes
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// All accounts, keyed by username
    pub fn accounts(&self) -> &BTreeMap<String, BankAccount> {
        &self.accounts
    }

    /// Username of the logged-in account, if any
    pub fn logged_in(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Repopulate the account mapping from storage
    ///
    /// A missing file yields an empty mapping. On failure
    /// ([`Error::StorageUnavailable`] or [`Error::CorruptStorage`]) the
    /// in-memory state is left untouched. On success the mapping is replaced
    /// wholesale; a session whose account is gone from the new mapping is
    /// cleared.
    pub fn load(&mut self) -> Result<()> {
        let accounts = store::load(&self.storage_path)?;
        if let Some(username) = &self.session {
            if !accounts.contains_key(username) {
                self.session = None;
            }
        }
        self.accounts = accounts;
        Ok(())
    }

    /// Persist the full account mapping, atomically replacing any prior
    /// content; returns the location written
    pub fn save(&self) -> Result<&Path> {
        store::save(&self.storage_path, &self.accounts)?;
        Ok(&self.storage_path)
    }

    /// Create an account, record any opening balance, and persist
    pub fn create_account(
        &mut self,
        username: &str,
        secret: &str,
        initial_deposit: Decimal,
    ) -> Result<&BankAccount> {
        if self.accounts.contains_key(username) {
            return Err(Error::DuplicateUsername(username.to_owned()));
        }
        if initial_deposit < Decimal::ZERO {
            return Err(Error::InvalidAmount(initial_deposit));
        }

        let credential = CredentialHash::derive(secret)?;
        let mut account = BankAccount::open(username, credential);
        if initial_deposit > Decimal::ZERO {
            account.deposit(initial_deposit, Some(INITIAL_DEPOSIT_NOTE))?;
        }

        self.accounts.insert(username.to_owned(), account);
        self.save()?;

        info!(username, "account created");
        Ok(&self.accounts[username])
    }

    /// Authenticate and open a session
    ///
    /// Fails with [`Error::UnknownUser`] or [`Error::BadCredential`] without
    /// touching the current session; success replaces any existing session.
    pub fn login(&mut self, username: &str, secret: &str) -> Result<&BankAccount> {
        let account = self
            .accounts
            .get(username)
            .ok_or_else(|| Error::UnknownUser(username.to_owned()))?;
        if !account.check_credential(secret) {
            return Err(Error::BadCredential);
        }
        self.session = Some(username.to_owned());
        info!(username, "logged in");
        Ok(account)
    }

    /// Clear the session; idempotent
    pub fn logout(&mut self) {
        if let Some(username) = self.session.take() {
            info!(username = %username, "logged out");
        }
    }

    /// Deposit into the logged-in account and persist
    pub fn deposit_logged(&mut self, amount: Decimal, note: Option<&str>) -> Result<Transaction> {
        let tx = self.session_account_mut()?.deposit(amount, note)?;
        self.save()?;
        Ok(tx)
    }

    /// Withdraw from the logged-in account and persist
    pub fn withdraw_logged(&mut self, amount: Decimal, note: Option<&str>) -> Result<Transaction> {
        let tx = self.session_account_mut()?.withdraw(amount, note)?;
        self.save()?;
        Ok(tx)
    }

    /// Balance of the logged-in account
    pub fn balance_logged(&self) -> Result<Decimal> {
        Ok(self.session_account()?.balance())
    }

    /// Statement of the logged-in account, oldest of the window first
    pub fn statement_logged(&self, n: usize) -> Result<&[Transaction]> {
        Ok(self.session_account()?.statement(n))
    }

    fn session_account(&self) -> Result<&BankAccount> {
        self.session
            .as_ref()
            .and_then(|username| self.accounts.get(username))
            .ok_or(Error::NotLoggedIn)
    }

    fn session_account_mut(&mut self) -> Result<&mut BankAccount> {
        match &self.session {
            Some(username) => self
                .accounts
                .get_mut(username)
                .ok_or(Error::NotLoggedIn),
            None => Err(Error::NotLoggedIn),
        }
    }
}
