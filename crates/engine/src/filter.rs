//! Filtering and ordering of transaction lists.

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::{EngineError, Transaction, TransactionKind};

/// Optional constraints; an absent field lets everything through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category_id: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.kind.is_none_or(|kind| tx.kind == kind)
            && self
                .category_id
                .as_deref()
                .is_none_or(|category_id| tx.category_id == category_id)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::AmountDesc => "amount-desc",
            Self::AmountAsc => "amount-asc",
        }
    }

    fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            Self::DateDesc => b.date.cmp(&a.date),
            Self::DateAsc => a.date.cmp(&b.date),
            Self::AmountDesc => b.amount.cmp(&a.amount),
            Self::AmountAsc => a.amount.cmp(&b.amount),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "date-desc" => Ok(Self::DateDesc),
            "date-asc" => Ok(Self::DateAsc),
            "amount-desc" => Ok(Self::AmountDesc),
            "amount-asc" => Ok(Self::AmountAsc),
            other => Err(EngineError::InvalidValue(format!("invalid sort key: {other}"))),
        }
    }
}

/// Returns the transactions matching `filter`, ordered by `sort`.
///
/// Dates compare as calendar dates and amounts numerically. The sort is
/// stable, so equal keys keep their input order.
pub fn filter_and_sort<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
    sort: SortKey,
) -> Vec<&'a Transaction> {
    let mut selected: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| filter.matches(tx))
        .collect();
    selected.sort_by(|a, b| sort.compare(a, b));
    selected
}
