//! Account domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::credential::CredentialHash;
use crate::domain::result::{Error, Result};
use crate::domain::transaction::{Transaction, TransactionKind};

/// A named account: credential hash, balance, append-only ledger
///
/// The balance and the transaction list only change together, through
/// [`deposit`](BankAccount::deposit) and [`withdraw`](BankAccount::withdraw),
/// and the balance is never negative. The username is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    username: String,
    credential_hash: CredentialHash,
    balance: Decimal,
    transactions: Vec<Transaction>,
}

impl BankAccount {
    /// Open a new account with a zero balance and empty ledger
    pub(crate) fn open(username: impl Into<String>, credential_hash: CredentialHash) -> Self {
        Self {
            username: username.into(),
            credential_hash,
            balance: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }

    /// Rebuild an account from persisted parts; callers must [`validate`]
    /// afterwards.
    ///
    /// [`validate`]: BankAccount::validate
    pub(crate) fn from_parts(
        username: String,
        credential_hash: CredentialHash,
        balance: Decimal,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            username,
            credential_hash,
            balance,
            transactions,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Full transaction history, oldest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn credential_hash(&self) -> &CredentialHash {
        &self.credential_hash
    }

    /// Check a secret against the stored credential hash
    pub fn check_credential(&self, secret: &str) -> bool {
        self.credential_hash.verify(secret)
    }

    /// Increase the balance and record a deposit transaction
    pub fn deposit(&mut self, amount: Decimal, note: Option<&str>) -> Result<Transaction> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(amount));
        }
        let balance_after = self.balance + amount;
        let tx = Transaction::new(
            TransactionKind::Deposit,
            amount,
            balance_after,
            note.map(str::to_owned),
        );
        self.balance = balance_after;
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    /// Decrease the balance and record a withdrawal transaction
    pub fn withdraw(&mut self, amount: Decimal, note: Option<&str>) -> Result<Transaction> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(Error::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        let balance_after = self.balance - amount;
        let tx = Transaction::new(
            TransactionKind::Withdrawal,
            amount,
            balance_after,
            note.map(str::to_owned),
        );
        self.balance = balance_after;
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    /// The most recent `n` transactions, oldest of the window first
    ///
    /// Always a suffix of the full history; `n = 0` yields an empty slice.
    pub fn statement(&self, n: usize) -> &[Transaction] {
        let start = self.transactions.len().saturating_sub(n);
        &self.transactions[start..]
    }

    /// Validate account data against the ledger invariants
    ///
    /// Replays the history from zero: every amount must be positive, no
    /// entry may drive the running balance negative, every `balance_after`
    /// must match the running balance, and the stored balance must agree
    /// with the final entry (zero for an empty ledger).
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        let mut running = Decimal::ZERO;
        for (i, tx) in self.transactions.iter().enumerate() {
            if tx.amount() <= Decimal::ZERO {
                return Err(format!(
                    "transaction {} has non-positive amount {}",
                    i,
                    tx.amount()
                ));
            }
            running = match tx.kind() {
                TransactionKind::Deposit => running + tx.amount(),
                TransactionKind::Withdrawal => running - tx.amount(),
            };
            if running < Decimal::ZERO {
                return Err(format!("transaction {} drives the balance negative", i));
            }
            if tx.balance_after() != running {
                return Err(format!(
                    "transaction {} records balance_after {} but the running balance is {}",
                    i,
                    tx.balance_after(),
                    running
                ));
            }
        }
        if self.balance != running {
            return Err(format!(
                "stored balance {} disagrees with the transaction history ({})",
                self.balance, running
            ));
        }
        Ok(())
    }
}
