use chrono::NaiveDate;
use clap::{Args, Subcommand};

use client::{ClientError, EntityStore, RemoteDataClient};
use engine::{
    CategoryDraft, GoalDraft, Money, SortKey, TransactionDraft, TransactionFilter,
    TransactionKind, categories::palette_color, filter_and_sort, stats,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    render,
};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account for the configured username.
    Register,
    /// Totals, expenses by category and the latest transactions.
    Summary,
    /// List transactions.
    Transactions(ListArgs),
    /// Monthly income and expense with the running balance.
    Months,
    /// Savings goals and their progress.
    Goals,
    /// List categories.
    Categories,
    /// Add, edit or remove a transaction.
    #[command(subcommand)]
    Tx(TxCommand),
    /// Add, edit or remove a category.
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Add, edit or remove a savings goal.
    #[command(subcommand)]
    Goal(GoalCommand),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only `income` or `expense` transactions.
    #[arg(long = "type")]
    kind: Option<TransactionKind>,
    /// Only transactions of this category id.
    #[arg(long)]
    category: Option<String>,
    /// One of date-desc, date-asc, amount-desc, amount-asc.
    #[arg(long, default_value_t = SortKey::DateDesc)]
    sort: SortKey,
}

#[derive(Subcommand, Debug)]
pub enum TxCommand {
    Add {
        #[arg(long = "type")]
        kind: TransactionKind,
        #[arg(long)]
        amount: Money,
        #[arg(long)]
        category: String,
        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Change the given fields of a transaction.
    Edit {
        id: i64,
        #[arg(long = "type")]
        kind: Option<TransactionKind>,
        #[arg(long)]
        amount: Option<Money>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Rm {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    Add {
        #[arg(long)]
        name: String,
        /// Defaults to the next palette color.
        #[arg(long)]
        color: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove a category; its transactions are kept as `unknown`.
    Rm {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum GoalCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        target: Money,
        #[arg(long, default_value_t = Money::ZERO)]
        saved: Money,
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        target: Option<Money>,
        #[arg(long)]
        saved: Option<Money>,
        #[arg(long)]
        deadline: Option<NaiveDate>,
        /// Drop the deadline.
        #[arg(long, conflicts_with = "deadline")]
        no_deadline: bool,
    },
    Rm {
        id: i64,
    },
}

/// A rejected login reads better as a credentials problem than as the raw
/// server message.
fn login_error(err: ClientError, username: &str) -> AppError {
    if err.is_unauthorized() {
        AppError::BadCredentials(username.to_string())
    } else {
        err.into()
    }
}

pub async fn run(config: AppConfig, command: Command) -> Result<()> {
    let client = RemoteDataClient::new(&config.base_url)?;
    tracing::debug!("using server {}", client.base_url());
    let password = config.password()?;

    if let Command::Register = command {
        let user_id = client.register(&config.username, &password).await?;
        println!("Registered {} (user id {user_id}).", config.username);
        return Ok(());
    }

    let identity = client
        .login(&config.username, &password)
        .await
        .map_err(|err| login_error(err, &config.username))?;
    tracing::debug!("logged in as user {}", identity.user_id);
    let mut store = EntityStore::new(client);
    store.sign_in(identity).await?;
    if let Some(err) = store.load_error() {
        return Err(AppError::Load(err.to_string()));
    }

    match command {
        Command::Register => {}
        Command::Summary => {
            let snapshot = store.snapshot();
            let totals = stats::summary(&snapshot.transactions);
            let breakdown = stats::category_breakdown(snapshot);
            let recent = stats::recent_transactions(&snapshot.transactions);
            println!(
                "{}",
                render::summary(snapshot, &totals, &breakdown, &recent)
            );
        }
        Command::Transactions(args) => {
            let snapshot = store.snapshot();
            let filter = TransactionFilter {
                kind: args.kind,
                category_id: args.category,
            };
            let rows = filter_and_sort(&snapshot.transactions, &filter, args.sort);
            println!("{}", render::transactions(snapshot, rows));
        }
        Command::Months => {
            let series = stats::monthly_series(&store.snapshot().transactions);
            let cumulative = stats::cumulative_balance(&series);
            println!("{}", render::months(&series, &cumulative));
        }
        Command::Goals => println!("{}", render::goals(&store.snapshot().goals)),
        Command::Categories => println!("{}", render::categories(&store.snapshot().categories)),
        Command::Tx(cmd) => transaction(&mut store, cmd).await?,
        Command::Category(cmd) => category(&mut store, cmd).await?,
        Command::Goal(cmd) => goal(&mut store, cmd).await?,
    }
    Ok(())
}

async fn transaction(store: &mut EntityStore, cmd: TxCommand) -> Result<()> {
    match cmd {
        TxCommand::Add {
            kind,
            amount,
            category,
            date,
        } => {
            let draft = TransactionDraft {
                kind,
                amount,
                category_id: category,
                date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
            };
            let tx = store.create_transaction(&draft).await?;
            println!("{}", render::transaction_row(store.snapshot(), &tx));
        }
        TxCommand::Edit {
            id,
            kind,
            amount,
            category,
            date,
        } => {
            let current = store
                .snapshot()
                .transaction(id)
                .ok_or_else(|| AppError::NotFound(format!("transaction {id}")))?;
            let draft = TransactionDraft {
                kind: kind.unwrap_or(current.kind),
                amount: amount.unwrap_or(current.amount),
                category_id: category.unwrap_or_else(|| current.category_id.clone()),
                date: date.unwrap_or(current.date),
            };
            let tx = store.update_transaction(id, &draft).await?;
            println!("{}", render::transaction_row(store.snapshot(), &tx));
        }
        TxCommand::Rm { id } => {
            store.delete_transaction(id).await?;
            println!("Deleted transaction {id}.");
        }
    }
    Ok(())
}

async fn category(store: &mut EntityStore, cmd: CategoryCommand) -> Result<()> {
    match cmd {
        CategoryCommand::Add { name, color } => {
            let color = color
                .unwrap_or_else(|| palette_color(store.snapshot().categories.len()).to_string());
            let created = store
                .create_category(&CategoryDraft { name, color })
                .await?;
            println!("Created category {} ({}).", created.name, created.id);
        }
        CategoryCommand::Edit { id, name, color } => {
            let current = store
                .snapshot()
                .category(&id)
                .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;
            let draft = CategoryDraft {
                name: name.unwrap_or_else(|| current.name.clone()),
                color: color.unwrap_or_else(|| current.color.clone()),
            };
            let updated = store.update_category(&id, &draft).await?;
            println!("Updated category {} ({}).", updated.name, updated.id);
        }
        CategoryCommand::Rm { id } => {
            store.delete_category(&id).await?;
            let orphans = store
                .snapshot()
                .transactions
                .iter()
                .filter(|tx| tx.category_id == id)
                .count();
            println!("Deleted category {id}.");
            if orphans > 0 {
                println!("{orphans} transactions now show as unknown.");
            }
        }
    }
    Ok(())
}

async fn goal(store: &mut EntityStore, cmd: GoalCommand) -> Result<()> {
    match cmd {
        GoalCommand::Add {
            name,
            target,
            saved,
            deadline,
        } => {
            let draft = GoalDraft {
                name,
                target_amount: target,
                current_savings: saved,
                deadline,
            };
            let goal = store.create_goal(&draft).await?;
            println!("{}", render::goal_row(&goal));
        }
        GoalCommand::Edit {
            id,
            name,
            target,
            saved,
            deadline,
            no_deadline,
        } => {
            let current = store
                .snapshot()
                .goal(id)
                .ok_or_else(|| AppError::NotFound(format!("goal {id}")))?;
            let draft = GoalDraft {
                name: name.unwrap_or_else(|| current.name.clone()),
                target_amount: target.unwrap_or(current.target_amount),
                current_savings: saved.unwrap_or(current.current_savings),
                deadline: if no_deadline {
                    None
                } else {
                    deadline.or(current.deadline)
                },
            };
            let goal = store.update_goal(id, &draft).await?;
            println!("{}", render::goal_row(&goal));
        }
        GoalCommand::Rm { id } => {
            store.delete_goal(id).await?;
            println!("Deleted goal {id}.");
        }
    }
    Ok(())
}
