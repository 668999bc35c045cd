//! OpenWallet CLI - Personal finance assistant backend
//!
//! Usage:
//!   openwallet init                     Initialize database
//!   openwallet serve --port 8000        Start web server
//!   openwallet ocr --file receipt.jpg   Parse a receipt image
//!   openwallet trends --keywords 커피   Summarize news trends
//!   openwallet report --user-id 1       Generate a spending report

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Serve { port, host } => commands::cmd_serve(&cli.db, &host, port).await,
        Commands::Ocr { file, memo } => commands::cmd_ocr(&file, memo.as_deref()).await,
        Commands::Trends {
            keywords,
            days,
            max_articles,
        } => commands::cmd_trends(&keywords, days, max_articles).await,
        Commands::Report {
            user_id,
            from,
            to,
            question,
        } => commands::cmd_report(&cli.db, user_id, from, to, question).await,
        Commands::Transactions { action } => match action {
            TransactionsAction::List { user_id, from, to } => {
                commands::cmd_transactions_list(&cli.db, user_id, from.as_deref(), to.as_deref())
            }
            TransactionsAction::Add {
                user_id,
                date,
                merchant,
                amount,
                category,
                memo,
            } => commands::cmd_transactions_add(
                &cli.db, user_id, &date, &merchant, amount, category, memo,
            ),
        },
        Commands::Status => commands::cmd_status(&cli.db),
    }
}
