//! Core commands: init, serve, ocr, report, transactions, status

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use openwallet_core::db::Database;
use openwallet_core::models::{NewTransaction, ReportRequest};
use openwallet_core::receipt::parse_receipt_text;
use openwallet_core::report::generate_report;
use openwallet_core::vision::VisionClient;
use openwallet_core::{global_client, ModelBackend};

/// Maximum receipt upload size (8 MB), matching the server limit
const MAX_IMAGE_SIZE: u64 = 8 * 1024 * 1024;

pub fn open_db(path: &Path) -> Result<Database> {
    Database::new(&path.to_string_lossy()).context("Failed to open database")
}

pub fn cmd_init(path: &Path) -> Result<()> {
    let db = open_db(path)?;
    println!("Initialized database at {}", db.path());
    Ok(())
}

pub async fn cmd_serve(path: &Path, host: &str, port: u16) -> Result<()> {
    let db = open_db(path)?;
    openwallet_server::serve(db, host, port).await
}

pub async fn cmd_ocr(file: &Path, memo: Option<&str>) -> Result<()> {
    let metadata = std::fs::metadata(file)
        .with_context(|| format!("Cannot read {}", file.display()))?;
    if metadata.len() == 0 {
        bail!("Empty image file");
    }
    if metadata.len() > MAX_IMAGE_SIZE {
        bail!("Image too large (max 8MB)");
    }

    let Some(vision) = VisionClient::from_env() else {
        bail!("Vision OCR not configured (set VISION_API_KEY)");
    };

    let image = std::fs::read(file)?;
    let text = vision.run_ocr(&image).await?;
    let result = parse_receipt_text(&text, memo);

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub async fn cmd_report(
    path: &Path,
    user_id: i64,
    from: Option<String>,
    to: Option<String>,
    question: Option<String>,
) -> Result<()> {
    let db = open_db(path)?;
    let Some(client) = global_client() else {
        bail!("Model backend not configured (set OLLAMA_HOST)");
    };

    let request = ReportRequest {
        user_id,
        start_date: from,
        end_date: to,
        question,
    };
    let response = generate_report(&db, client, &request).await?;

    println!(
        "리포트 (user {}, 거래 {}건)\n",
        response.user_id, response.transaction_count
    );
    println!("{}", response.report);
    Ok(())
}

fn parse_date(label: &str, raw: &str) -> Result<NaiveDate> {
    raw.parse()
        .with_context(|| format!("Invalid {} (expected YYYY-MM-DD): {}", label, raw))
}

pub fn cmd_transactions_list(
    path: &Path,
    user_id: i64,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let db = open_db(path)?;
    let from = from.map(|s| parse_date("--from", s)).transpose()?;
    let to = to.map(|s| parse_date("--to", s)).transpose()?;

    let transactions = db.list_transactions(user_id, from, to)?;
    if transactions.is_empty() {
        println!("No transactions found");
        return Ok(());
    }

    for tx in &transactions {
        println!(
            "{:>6}  {}  {:<24} {:>10}원  {}",
            tx.id,
            tx.date,
            tx.merchant,
            tx.amount,
            tx.category.as_deref().unwrap_or("-"),
        );
    }
    println!("\n{} transaction(s)", transactions.len());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_transactions_add(
    path: &Path,
    user_id: i64,
    date: &str,
    merchant: &str,
    amount: i64,
    category: Option<String>,
    memo: Option<String>,
) -> Result<()> {
    if merchant.trim().is_empty() {
        bail!("Merchant must not be empty");
    }
    if amount <= 0 {
        bail!("Amount must be positive");
    }

    let db = open_db(path)?;
    let id = db.insert_transaction(&NewTransaction {
        user_id,
        date: parse_date("--date", date)?,
        merchant: merchant.to_string(),
        amount,
        category,
        memo,
        raw_json: None,
    })?;

    println!("Added transaction {}", id);
    Ok(())
}

pub fn cmd_status(path: &Path) -> Result<()> {
    let db = open_db(path)?;

    println!("Database: {}", db.path());
    match global_client() {
        Some(client) => println!("Model backend: {} ({})", client.host(), client.model()),
        None => println!("Model backend: not configured"),
    }
    match VisionClient::from_env() {
        Some(client) => println!("Vision OCR: {}", client.host()),
        None => println!("Vision OCR: not configured"),
    }

    let articles = db.list_recent_articles(1000)?;
    println!("Stored articles: {}", articles.len());
    Ok(())
}
