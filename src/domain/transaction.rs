//! Transaction domain model

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a balance-affecting event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single immutable ledger entry belonging to one account
///
/// Fields are private and there are no mutators: once a transaction is
/// recorded it never changes. Construction is crate-internal and happens
/// exactly once per successful deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    timestamp: DateTime<Utc>,
    kind: TransactionKind,
    amount: Decimal,
    balance_after: Decimal,
    /// Absent and empty notes are distinct; an absent note is omitted on disk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl Transaction {
    /// Record a new ledger entry, timestamped now.
    ///
    /// Callers (BankAccount) are responsible for pre-validating: `amount`
    /// must be positive and `balance_after` must be the account balance
    /// resulting from this entry.
    pub(crate) fn new(
        kind: TransactionKind,
        amount: Decimal,
        balance_after: Decimal,
        note: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            amount,
            balance_after,
            note,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The account balance immediately after this entry was recorded
    pub fn balance_after(&self) -> Decimal {
        self.balance_after
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display_matches_wire_form() {
        assert_eq!(TransactionKind::Deposit.to_string(), "deposit");
        assert_eq!(TransactionKind::Withdrawal.to_string(), "withdrawal");
        assert_eq!(TransactionKind::Deposit.as_str(), "deposit");
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Deposit).unwrap(),
            "\"deposit\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::Withdrawal).unwrap(),
            "\"withdrawal\""
        );
    }

    #[test]
    fn test_absent_note_is_omitted() {
        let tx = Transaction::new(
            TransactionKind::Deposit,
            Decimal::new(5000, 2),
            Decimal::new(5000, 2),
            None,
        );
        let json = serde_json::to_string(&tx).unwrap();
        assert!(!json.contains("note"));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.note(), None);
    }

    #[test]
    fn test_empty_note_survives_round_trip() {
        let tx = Transaction::new(
            TransactionKind::Withdrawal,
            Decimal::new(100, 2),
            Decimal::ZERO,
            Some(String::new()),
        );
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.note(), Some(""));
        assert_eq!(back, tx);
    }

    #[test]
    fn test_amounts_round_trip_exactly() {
        let tx = Transaction::new(
            TransactionKind::Deposit,
            Decimal::new(1234567890123, 4), // 123456789.0123
            Decimal::new(1234567890123, 4),
            Some("precision check".to_string()),
        );
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
