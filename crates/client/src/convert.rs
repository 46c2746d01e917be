//! Conversions between wire bodies and engine records.
//!
//! Amounts are rounded to cents here, once, so the engine only ever sees
//! exact values.

use api_types::{
    category::{CategoryNew, CategoryRole as WireRole, CategoryUpdate, CategoryView},
    data::DataResponse,
    goal::{GoalNew, GoalView},
    transaction::{TransactionKind as WireKind, TransactionNew, TransactionView},
};
use engine::{
    Category, CategoryDraft, CategoryRole, GoalDraft, Money, ResultEngine, SavingsGoal, Snapshot,
    Transaction, TransactionDraft, TransactionKind,
};

fn kind_from_wire(kind: WireKind) -> TransactionKind {
    match kind {
        WireKind::Income => TransactionKind::Income,
        WireKind::Expense => TransactionKind::Expense,
    }
}

fn kind_to_wire(kind: TransactionKind) -> WireKind {
    match kind {
        TransactionKind::Income => WireKind::Income,
        TransactionKind::Expense => WireKind::Expense,
    }
}

pub(crate) fn transaction(view: TransactionView) -> ResultEngine<Transaction> {
    Ok(Transaction {
        id: view.id,
        kind: kind_from_wire(view.kind),
        amount: Money::from_major(view.amount)?,
        category_id: view.category_id,
        date: view.date,
    })
}

pub(crate) fn category(view: CategoryView) -> Category {
    Category {
        id: view.id,
        name: view.name,
        color: view.color,
        role: view.role.map(|role| match role {
            WireRole::Income => CategoryRole::Income,
            WireRole::Expense => CategoryRole::Expense,
        }),
    }
}

pub(crate) fn goal(view: GoalView) -> ResultEngine<SavingsGoal> {
    Ok(SavingsGoal {
        id: view.id,
        name: view.name,
        target_amount: Money::from_major(view.target_amount)?,
        current_savings: Money::from_major(view.current_savings.unwrap_or_default())?,
        deadline: view.deadline,
    })
}

pub(crate) fn snapshot(data: DataResponse) -> ResultEngine<Snapshot> {
    Ok(Snapshot {
        transactions: data
            .transactions
            .into_iter()
            .map(transaction)
            .collect::<ResultEngine<_>>()?,
        categories: data.categories.into_iter().map(category).collect(),
        goals: data
            .goals
            .into_iter()
            .map(goal)
            .collect::<ResultEngine<_>>()?,
    })
}

pub(crate) fn transaction_body(draft: &TransactionDraft) -> TransactionNew {
    TransactionNew {
        kind: kind_to_wire(draft.kind),
        category_id: draft.category_id.clone(),
        amount: draft.amount.to_major(),
        date: draft.date,
    }
}

pub(crate) fn category_body(key: String, draft: &CategoryDraft) -> CategoryNew {
    CategoryNew {
        id: key,
        name: draft.name.clone(),
        color: draft.color.clone(),
    }
}

pub(crate) fn category_update_body(draft: &CategoryDraft) -> CategoryUpdate {
    CategoryUpdate {
        name: draft.name.clone(),
        color: draft.color.clone(),
    }
}

pub(crate) fn goal_body(draft: &GoalDraft) -> GoalNew {
    GoalNew {
        name: draft.name.clone(),
        target_amount: draft.target_amount.to_major(),
        current_savings: draft.current_savings.to_major(),
        deadline: draft.deadline,
    }
}
