//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense event. Its `amount` is never
//! negative: the direction lives in `kind`, and showing expenses with a minus
//! sign is up to the presentation layer.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidValue(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Server-assigned, stable identifier.
    pub id: i64,
    pub kind: TransactionKind,
    pub amount: Money,
    /// May reference a category that no longer exists.
    pub category_id: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// The user-editable fields of a transaction, used for create and update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: Money,
    pub category_id: String,
    pub date: NaiveDate,
}

impl TransactionDraft {
    /// Checks the draft before it is sent to the server.
    pub fn validate(&self) -> ResultEngine<()> {
        if !self.amount.is_positive() {
            return Err(EngineError::InvalidDraft(
                "amount must be greater than zero".to_string(),
            ));
        }
        if self.category_id.trim().is_empty() {
            return Err(EngineError::InvalidDraft(
                "category is required".to_string(),
            ));
        }
        Ok(())
    }
}
