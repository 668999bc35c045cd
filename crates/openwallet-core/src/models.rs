//! Domain models for OpenWallet

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A line item extracted from a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub qty: i64,
    /// Unit price in won
    pub price: i64,
}

/// Structured result of running a receipt image through OCR + extraction
///
/// Built fresh per request and handed straight back to the caller; the
/// pipeline never persists it. Saving a confirmed expense is a separate
/// transaction insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    pub merchant: Option<String>,
    /// Total amount in won
    pub amount: Option<i64>,
    /// ISO date, or a year-less "MM-DD" when only month/day were printed
    pub date: Option<String>,
    pub items: Vec<ReceiptItem>,
    pub suggested_category: Option<String>,
    pub raw_text: Option<String>,
}

/// A collected news article
///
/// `url` is the identity: the article store deduplicates on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub source: String,
    /// RFC 3339 publication timestamp, when the feed provided one
    pub published_at: Option<String>,
    /// Extracted body text, capped at the collector's max length
    pub content: String,
}

/// Structured trend digest produced by the summary orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSummary {
    pub period_start: String,
    pub period_end: String,
    pub keywords: Vec<String>,
    pub bullets: Vec<String>,
    pub key_stats: Vec<String>,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
    /// URLs of the articles that fed the summary; empty for the demo fallback
    pub sources: Vec<String>,
    pub model: String,
    /// Repaired model output (or the fallback marker), kept for debugging
    pub raw_response: serde_json::Value,
}

/// A stored expense transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub merchant: String,
    /// Amount in won
    pub amount: i64,
    pub category: Option<String>,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A transaction to insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub user_id: i64,
    pub date: NaiveDate,
    pub merchant: String,
    pub amount: i64,
    pub category: Option<String>,
    pub memo: Option<String>,
    /// Original OCR result as JSON, when the expense came from a receipt scan
    #[serde(default)]
    pub raw_json: Option<String>,
}

/// Request body for spending report generation
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    pub user_id: i64,
    /// Inclusive "YYYY-MM-DD" range bounds; open-ended when omitted
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Custom question to answer instead of the default report
    #[serde(default)]
    pub question: Option<String>,
}

/// Generated spending report
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub report: String,
    pub user_id: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub transaction_count: usize,
}

/// One turn of a model conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}
