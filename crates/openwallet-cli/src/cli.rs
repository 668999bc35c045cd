//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// OpenWallet - Personal finance assistant backend
#[derive(Parser)]
#[command(name = "openwallet")]
#[command(about = "Receipt OCR, trend summaries, and spending reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "openwallet.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Run OCR + field extraction over a receipt image
    Ocr {
        /// Receipt image file
        #[arg(short, long)]
        file: PathBuf,

        /// Free-text memo, feeds category suggestion
        #[arg(short, long)]
        memo: Option<String>,
    },

    /// Collect recent news and print a trend summary
    Trends {
        /// Comma-separated keywords
        #[arg(short, long)]
        keywords: String,

        /// Recency window in days
        #[arg(short, long, default_value = "7")]
        days: i64,

        /// Global article cap across all keywords
        #[arg(long, default_value = "30")]
        max_articles: usize,
    },

    /// Generate a spending report for a user
    Report {
        /// User to report on
        #[arg(short, long)]
        user_id: i64,

        /// Inclusive start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Inclusive end date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Custom question instead of the default report
        #[arg(short, long)]
        question: Option<String>,
    },

    /// Manage transactions
    Transactions {
        #[command(subcommand)]
        action: TransactionsAction,
    },

    /// Show database status
    Status,
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List a user's transactions
    List {
        #[arg(short, long)]
        user_id: i64,

        /// Inclusive start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Inclusive end date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Add a transaction manually
    Add {
        #[arg(short, long)]
        user_id: i64,

        /// Purchase date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        #[arg(short, long)]
        merchant: String,

        /// Amount in won
        #[arg(short, long)]
        amount: i64,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(long)]
        memo: Option<String>,
    },
}
