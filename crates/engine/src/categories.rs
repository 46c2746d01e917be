//! Categories used to classify transactions.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, TransactionKind};

/// Label shown for transactions whose category no longer exists.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Category name that legacy servers use to mark the income category.
const LEGACY_INCOME_NAME: &str = "Salary";

/// Default category colors handed out by the server, reused as the display
/// palette for breakdown positions.
pub const PALETTE: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#C9CBCF",
];

/// Returns the palette color for a breakdown position, cycling past the end.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Which transaction kind a category is offered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryRole {
    Income,
    Expense,
}

impl From<CategoryRole> for TransactionKind {
    fn from(value: CategoryRole) -> Self {
        match value {
            CategoryRole::Income => TransactionKind::Income,
            CategoryRole::Expense => TransactionKind::Expense,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Display hint only.
    pub color: String,
    /// Explicit role, when the server provides one.
    pub role: Option<CategoryRole>,
}

impl Category {
    /// Returns the role of this category.
    ///
    /// Servers that do not send an explicit role only distinguish the income
    /// category by its name.
    pub fn role(&self) -> CategoryRole {
        self.role.unwrap_or_else(|| role_from_name(&self.name))
    }

    /// Returns `true` if the category should be offered for `kind`.
    pub fn accepts(&self, kind: TransactionKind) -> bool {
        TransactionKind::from(self.role()) == kind
    }
}

fn role_from_name(name: &str) -> CategoryRole {
    if name == LEGACY_INCOME_NAME {
        CategoryRole::Income
    } else {
        CategoryRole::Expense
    }
}

/// The user-editable fields of a category, used for create and update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub color: String,
}

impl CategoryDraft {
    pub fn validate(&self) -> ResultEngine<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::InvalidDraft(
                "category name is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, role: Option<CategoryRole>) -> Category {
        Category {
            id: format!("1-{name}"),
            name: name.to_string(),
            color: "#000000".to_string(),
            role,
        }
    }

    #[test]
    fn legacy_salary_name_is_income() {
        assert_eq!(category("Salary", None).role(), CategoryRole::Income);
        assert_eq!(category("Food", None).role(), CategoryRole::Expense);
        assert!(category("Salary", None).accepts(TransactionKind::Income));
        assert!(!category("Salary", None).accepts(TransactionKind::Expense));
    }

    #[test]
    fn explicit_role_wins_over_name() {
        let bonus = category("Bonus", Some(CategoryRole::Income));
        assert!(bonus.accepts(TransactionKind::Income));

        let salary = category("Salary", Some(CategoryRole::Expense));
        assert!(salary.accepts(TransactionKind::Expense));
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(palette_color(0), "#FF6384");
        assert_eq!(palette_color(PALETTE.len()), "#FF6384");
        assert_eq!(palette_color(7), "#36A2EB");
    }

    #[test]
    fn draft_requires_name() {
        let draft = CategoryDraft {
            name: " ".to_string(),
            color: "#fff".to_string(),
        };
        assert!(draft.validate().is_err());
    }
}
