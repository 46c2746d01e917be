//! Domain model and reporting for the finance tracker.
//!
//! The crate does no I/O. It defines the records mirrored from the server
//! ([`Transaction`], [`Category`], [`SavingsGoal`] gathered in a [`Snapshot`])
//! and the pure functions that derive every report from a snapshot:
//!
//! - [`stats`]: totals, category breakdown, recent transactions, monthly
//!   series and cumulative balance.
//! - [`filter`]: filtered and sorted transaction lists.
//!
//! Goal progress lives on [`SavingsGoal::progress`].

pub use categories::{Category, CategoryDraft, CategoryRole, UNKNOWN_CATEGORY};
pub use error::EngineError;
pub use filter::{SortKey, TransactionFilter, filter_and_sort};
pub use goals::{GoalDraft, SavingsGoal};
pub use money::Money;
pub use snapshot::Snapshot;
pub use stats::{BalancePoint, CategoryTotal, Month, MonthlyTotals, Summary};
pub use transactions::{Transaction, TransactionDraft, TransactionKind};

pub mod categories;
mod error;
pub mod filter;
mod goals;
mod money;
mod snapshot;
pub mod stats;
mod transactions;

pub type ResultEngine<T> = Result<T, EngineError>;
