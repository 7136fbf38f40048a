use std::{error::Error, io, sync::Arc};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{Engine, EngineError, Expense, ExpenseInput, JsonFileStore, parse_date};

#[derive(Parser, Debug)]
#[command(name = "expense_admin")]
#[command(about = "Admin utilities for the expense tracker (inspect and edit the data file)")]
struct Cli {
    /// Expenses file (also read from `EXPENSES_FILE`).
    #[arg(long, env = "EXPENSES_FILE", default_value = "expenses.json")]
    file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print expenses as JSON, optionally filtered.
    List(ListArgs),
    /// Add an expense.
    Add(AddArgs),
    /// Delete an expense by id.
    Delete { id: u64 },
    /// Print the summary statistics.
    Summary,
    /// Report the first port the server could bind, starting from `--port`.
    CheckPort(CheckPortArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long)]
    category: Option<String>,
    /// First date to include (YYYY-MM-DD).
    #[arg(long)]
    from: Option<String>,
    /// Last date to include (YYYY-MM-DD).
    #[arg(long)]
    to: Option<String>,
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    description: String,
    #[arg(long)]
    amount: f64,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    date: String,
}

#[derive(Args, Debug)]
struct CheckPortArgs {
    /// Address the server binds (`server.bind`).
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    #[arg(long, default_value_t = 20)]
    attempts: u16,
}

/// Uses the same binding logic as the server, so the answer matches the port
/// `expense_tracker` would pick with the same settings.
async fn free_port(args: &CheckPortArgs) -> io::Result<Option<u16>> {
    match server::bind_listener(&args.bind, args.port, args.attempts).await {
        Ok(listener) => Ok(Some(listener.local_addr()?.port())),
        Err(err) if err.kind() == io::ErrorKind::AddrInUse => Ok(None),
        Err(err) => Err(err),
    }
}

async fn list(engine: &Engine, args: ListArgs) -> Result<Vec<Expense>, EngineError> {
    let ranged = args.from.is_some() || args.to.is_some();

    let mut expenses = match (&args.category, ranged) {
        (_, true) => {
            let from = args.from.as_deref().map(parse_date).transpose()?;
            let to = args.to.as_deref().map(parse_date).transpose()?;
            engine
                .expenses_between(
                    from.unwrap_or(NaiveDate::MIN),
                    to.unwrap_or(NaiveDate::MAX),
                )
                .await?
        }
        (Some(category), false) => engine.expenses_by_category(category).await?,
        (None, false) => engine.list_expenses().await?,
    };

    if let (Some(category), true) = (&args.category, ranged) {
        expenses.retain(|e| &e.category == category);
    }
    Ok(expenses)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    if let Command::CheckPort(args) = &cli.command {
        match free_port(args).await? {
            Some(port) => println!("{port}"),
            None => {
                eprintln!(
                    "no free port in {}..{}",
                    args.port,
                    args.port.saturating_add(args.attempts)
                );
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let engine = Engine::builder()
        .store(Arc::new(JsonFileStore::new(&cli.file)))
        .build()
        .await?;

    match cli.command {
        Command::List(args) => {
            let expenses = list(&engine, args).await?;
            println!("{}", serde_json::to_string_pretty(&expenses)?);
        }
        Command::Add(args) => {
            let input = ExpenseInput {
                description: Some(args.description),
                amount: Some(args.amount),
                category: args.category,
                date: Some(args.date),
            };
            match engine.create_expense(input).await {
                Ok(expense) => println!("{}", serde_json::to_string_pretty(&expense)?),
                Err(EngineError::Validation(msg)) => {
                    eprintln!("{msg}");
                    std::process::exit(2);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Delete { id } => match engine.delete_expense(id).await {
            Ok(()) => println!("deleted expense {id}"),
            Err(EngineError::NotFound(_)) => {
                eprintln!("expense not found: {id}");
                std::process::exit(1);
            }
            Err(err) => return Err(err.into()),
        },
        Command::Summary => {
            let summary = engine.summary().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::CheckPort(_) => {}
    }

    Ok(())
}
