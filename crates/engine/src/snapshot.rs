//! The in-memory mirror of one user's data.

use serde::{Deserialize, Serialize};

use crate::{
    Category, SavingsGoal, Transaction, TransactionKind, categories::UNKNOWN_CATEGORY,
};

/// Transactions, categories and goals of the signed-in user.
///
/// Each list keeps the order in which the server returned (or the client
/// appended) its records. Nothing here is sorted by date or id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub goals: Vec<SavingsGoal>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.categories.is_empty() && self.goals.is_empty()
    }

    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn goal(&self, id: i64) -> Option<&SavingsGoal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    /// Name of the category `id`, or [`UNKNOWN_CATEGORY`] if it is gone.
    pub fn category_label(&self, id: &str) -> &str {
        self.category(id)
            .map(|category| category.name.as_str())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    /// Categories offered when entering a transaction of `kind`.
    pub fn categories_for(&self, kind: TransactionKind) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(move |category| category.accepts(kind))
    }

    /// Transactions whose category is missing from this snapshot.
    pub fn dangling_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(|tx| self.category(&tx.category_id).is_none())
    }
}
