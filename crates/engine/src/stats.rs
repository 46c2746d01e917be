//! Derived views over a [`Snapshot`].
//!
//! Every function here is pure: it borrows its input, never mutates it, and
//! returns a freshly built value. Calling them again after the store changed
//! is the only way to observe the change.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{Money, Snapshot, Transaction, TransactionKind, categories::palette_color};

/// How many transactions [`recent_transactions`] returns at most.
pub const RECENT_LIMIT: usize = 5;

/// Income and expense totals with the resulting balance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
}

/// Expense total of one category label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub label: String,
    pub total: Money,
    /// Position in the breakdown; see [`CategoryTotal::color`].
    pub color_index: usize,
}

impl CategoryTotal {
    /// Display color for this position.
    pub fn color(&self) -> &'static str {
        palette_color(self.color_index)
    }
}

/// A calendar month, rendered as `YYYY-MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;

        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Income and expense sums of one month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub month: Month,
    pub income: Money,
    pub expense: Money,
}

impl MonthlyTotals {
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Balance accumulated through the end of `month`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub month: Month,
    pub balance: Money,
}

/// Totals of all income and expense transactions in one pass.
pub fn summary(transactions: &[Transaction]) -> Summary {
    let (total_income, total_expenses) =
        transactions
            .iter()
            .fold((Money::ZERO, Money::ZERO), |(income, expenses), tx| match tx.kind {
                TransactionKind::Income => (income + tx.amount, expenses),
                TransactionKind::Expense => (income, expenses + tx.amount),
            });

    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

/// Expense totals grouped by category label, largest first.
///
/// Transactions pointing at a deleted category are grouped under
/// [`UNKNOWN_CATEGORY`](crate::categories::UNKNOWN_CATEGORY). Groups with
/// equal totals keep the order in which their label was first seen.
pub fn category_breakdown(snapshot: &Snapshot) -> Vec<CategoryTotal> {
    let mut groups: Vec<(String, Money)> = Vec::new();

    for tx in snapshot.transactions.iter().filter(|tx| tx.is_expense()) {
        let label = snapshot.category_label(&tx.category_id);
        match groups.iter_mut().find(|(name, _)| name == label) {
            Some((_, total)) => *total += tx.amount,
            None => groups.push((label.to_string(), tx.amount)),
        }
    }

    // stable: ties stay in first-seen order
    groups.sort_by(|a, b| b.1.cmp(&a.1));

    groups
        .into_iter()
        .enumerate()
        .map(|(color_index, (label, total))| CategoryTotal {
            label,
            total,
            color_index,
        })
        .collect()
}

/// The [`RECENT_LIMIT`] most recent transactions, newest first.
///
/// Transactions on the same date keep their snapshot order.
pub fn recent_transactions(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(RECENT_LIMIT);
    sorted
}

/// Per-month income and expense sums in ascending month order.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<Month, (Money, Money)> = BTreeMap::new();

    for tx in transactions {
        let (income, expense) = months.entry(Month::of(tx.date)).or_default();
        match tx.kind {
            TransactionKind::Income => *income += tx.amount,
            TransactionKind::Expense => *expense += tx.amount,
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expense))| MonthlyTotals {
            month,
            income,
            expense,
        })
        .collect()
}

/// Running balance over `series`, one point per month.
///
/// `series` must be in ascending month order, as returned by
/// [`monthly_series`]; the sum is taken left to right.
pub fn cumulative_balance(series: &[MonthlyTotals]) -> Vec<BalancePoint> {
    series
        .iter()
        .scan(Money::ZERO, |running, totals| {
            *running += totals.net();
            Some(BalancePoint {
                month: totals.month,
                balance: *running,
            })
        })
        .collect()
}
