//! Plain-text views of a snapshot.
//!
//! Every figure comes from the engine; this module only lays it out.

use engine::{
    BalancePoint, Category, CategoryTotal, Money, MonthlyTotals, SavingsGoal, Snapshot, Summary,
    Transaction, TransactionKind,
};

const BAR_WIDTH: usize = 30;

/// `value` as a bar of `#`, scaled so that `max` fills [`BAR_WIDTH`].
pub fn bar(value: Money, max: Money, width: usize) -> String {
    if !max.is_positive() || !value.is_positive() {
        return String::new();
    }
    let filled = (value.cents() as f64 / max.cents() as f64 * width as f64).round() as usize;
    "#".repeat(filled.clamp(1, width))
}

fn signed(tx: &Transaction) -> String {
    match tx.kind {
        TransactionKind::Income => format!("+{}", tx.amount),
        TransactionKind::Expense => format!("-{}", tx.amount),
    }
}

pub fn transaction_row(snapshot: &Snapshot, tx: &Transaction) -> String {
    format!(
        "{:>6}  {}  {:<7}  {:<20} {:>12}",
        tx.id,
        tx.date,
        tx.kind,
        snapshot.category_label(&tx.category_id),
        signed(tx)
    )
}

pub fn transactions<'a>(
    snapshot: &Snapshot,
    rows: impl IntoIterator<Item = &'a Transaction>,
) -> String {
    let lines: Vec<String> = rows
        .into_iter()
        .map(|tx| transaction_row(snapshot, tx))
        .collect();
    if lines.is_empty() {
        return "No transactions.".to_string();
    }
    lines.join("\n")
}

pub fn summary(
    snapshot: &Snapshot,
    totals: &Summary,
    breakdown: &[CategoryTotal],
    recent: &[&Transaction],
) -> String {
    let mut out = vec![
        format!("Income    {:>12}", totals.total_income),
        format!("Expenses  {:>12}", totals.total_expenses),
        format!("Balance   {:>12}", totals.balance),
    ];

    out.push(String::new());
    out.push("Expenses by category".to_string());
    if breakdown.is_empty() {
        out.push("  none".to_string());
    }
    let max = breakdown.first().map_or(Money::ZERO, |top| top.total);
    for entry in breakdown {
        out.push(format!(
            "  {:<20} {:>12}  {}  {}",
            entry.label,
            entry.total,
            entry.color(),
            bar(entry.total, max, BAR_WIDTH)
        ));
    }

    out.push(String::new());
    out.push("Recent transactions".to_string());
    out.push(transactions(snapshot, recent.iter().copied()));
    out.join("\n")
}

pub fn months(series: &[MonthlyTotals], cumulative: &[BalancePoint]) -> String {
    if series.is_empty() {
        return "No transactions.".to_string();
    }
    let max = series
        .iter()
        .flat_map(|totals| [totals.income, totals.expense])
        .max()
        .unwrap_or(Money::ZERO);

    let mut out = Vec::new();
    for (totals, point) in series.iter().zip(cumulative) {
        out.push(format!(
            "{}  income {:>12}  expense {:>12}  balance {:>12}",
            totals.month, totals.income, totals.expense, point.balance
        ));
        out.push(format!("         + {}", bar(totals.income, max, BAR_WIDTH)));
        out.push(format!("         - {}", bar(totals.expense, max, BAR_WIDTH)));
    }
    out.join("\n")
}

pub fn goal_row(goal: &SavingsGoal) -> String {
    let progress = goal.progress();
    let filled = (progress / 100.0 * 20.0).round() as usize;
    let mut row = format!(
        "{:>6}  {:<20} {:>12} / {:<12} [{}{}] {:>5.1}%",
        goal.id,
        goal.name,
        goal.current_savings,
        goal.target_amount,
        "#".repeat(filled),
        ".".repeat(20 - filled.min(20)),
        progress
    );
    if !goal.is_reached() {
        row.push_str(&format!("  {} to go", goal.remaining()));
    }
    if let Some(deadline) = goal.deadline {
        row.push_str(&format!("  due {deadline}"));
    }
    row
}

pub fn goals(goals: &[SavingsGoal]) -> String {
    if goals.is_empty() {
        return "No savings goals.".to_string();
    }
    goals.iter().map(goal_row).collect::<Vec<_>>().join("\n")
}

pub fn categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories.".to_string();
    }
    categories
        .iter()
        .map(|category| {
            format!(
                "{:<36} {:<20} {:<8} {}",
                category.id,
                category.name,
                category.color,
                TransactionKind::from(category.role())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
