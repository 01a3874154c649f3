mod client;
mod commands;
mod config;
mod convert;
mod error;

use clap::{Parser, Subcommand};

use crate::{
    commands::{
        Context,
        add::AddArgs,
        browse::AccountsArgs,
        history::HistoryArgs,
        stats::StatsArgs,
    },
    config::ConfigArgs,
    error::Result,
};

#[derive(Parser, Debug)]
#[command(name = "bookkeep")]
#[command(about = "Record double-entry transactions and browse a remote ledger")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Print raw responses as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the books of the current user.
    Books,
    /// List the leaf accounts of the book, grouped by type.
    Accounts(AccountsArgs),
    /// List the tags of the book.
    Tags,
    /// Record a transaction.
    Add(AddArgs),
    /// Show one month of transactions, day by day.
    History(HistoryArgs),
    /// Show monthly totals and the largest expense categories.
    Stats(StatsArgs),
    /// Show asset and liability balances.
    Balances,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "bookkeep={level},ledger={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context::new(settings, cli.json)?;
    match &cli.command {
        Command::Books => commands::browse::books(&ctx).await,
        Command::Accounts(args) => commands::browse::accounts(&ctx, args).await,
        Command::Tags => commands::browse::tags(&ctx).await,
        Command::Add(args) => commands::add::run(&ctx, args).await,
        Command::History(args) => commands::history::run(&ctx, args).await,
        Command::Stats(args) => commands::stats::run(&ctx, args).await,
        Command::Balances => commands::browse::balances(&ctx).await,
    }
}
