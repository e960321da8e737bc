//! JSON file store for the account mapping
//!
//! On disk the ledger is a single JSON object keyed by username. Amounts are
//! decimal strings, so numeric values round-trip exactly; transaction order
//! is the array order; a saved file is always replaced atomically
//! (write-to-temp-then-rename), so an interrupted save can never leave a
//! partially written ledger behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::result::{Error, Result};
use crate::domain::{BankAccount, CredentialHash, Transaction};

/// Per-account record as persisted; the username lives in the outer map key
#[derive(Deserialize)]
struct StoredAccount {
    credential_hash: CredentialHash,
    balance: Decimal,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

#[derive(Serialize)]
struct StoredAccountRef<'a> {
    credential_hash: &'a CredentialHash,
    balance: Decimal,
    transactions: &'a [Transaction],
}

/// Read the account mapping from `path`
///
/// A missing file is an empty ledger, not an error. Unparseable content, or
/// any account whose history fails validation, is reported as
/// [`Error::CorruptStorage`] - never silently repaired.
pub fn load(path: &Path) -> Result<BTreeMap<String, BankAccount>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no ledger file, starting empty");
            return Ok(BTreeMap::new());
        }
        Err(e) => return Err(Error::StorageUnavailable(e)),
    };

    let records: BTreeMap<String, StoredAccount> =
        serde_json::from_str(&content).map_err(|e| Error::corrupt(e.to_string()))?;

    let mut accounts = BTreeMap::new();
    for (username, record) in records {
        let account = BankAccount::from_parts(
            username.clone(),
            record.credential_hash,
            record.balance,
            record.transactions,
        );
        account
            .validate()
            .map_err(|reason| Error::corrupt(format!("account '{}': {}", username, reason)))?;
        accounts.insert(username, account);
    }

    debug!(path = %path.display(), accounts = accounts.len(), "loaded ledger");
    Ok(accounts)
}

/// Write the account mapping to `path`, replacing any prior content
pub fn save(path: &Path, accounts: &BTreeMap<String, BankAccount>) -> Result<()> {
    let records: BTreeMap<&str, StoredAccountRef<'_>> = accounts
        .iter()
        .map(|(username, account)| {
            (
                username.as_str(),
                StoredAccountRef {
                    credential_hash: account.credential_hash(),
                    balance: account.balance(),
                    transactions: account.transactions(),
                },
            )
        })
        .collect();

    let json = serde_json::to_string_pretty(&records)
        .map_err(|e| Error::StorageUnavailable(io::Error::other(e)))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            parent
        }
        _ => Path::new("."),
    };

    // Write next to the target so the final rename stays on one filesystem
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| Error::StorageUnavailable(e.error))?;

    debug!(path = %path.display(), accounts = accounts.len(), "saved ledger");
    Ok(())
}
