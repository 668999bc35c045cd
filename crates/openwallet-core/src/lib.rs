//! OpenWallet Core Library
//!
//! Shared functionality for the OpenWallet personal finance backend:
//! - Receipt text parsing pipeline (normalize, field extraction, category)
//! - Vision OCR gateway for receipt images
//! - Pluggable local model backend (Ollama, mock) with JSON-repair parsing
//! - News article collection and trend summarization
//! - SQLite persistence for transactions and collected articles
//! - Spending report generation over a date range

pub mod ai;
pub mod db;
pub mod error;
pub mod models;
pub mod receipt;
pub mod report;
pub mod trends;
pub mod vision;

/// Test utilities including the mock model server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{global_client, AIClient, MockBackend, ModelBackend, OllamaBackend};
pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    Article, ChatMessage, NewTransaction, OcrResult, ReceiptItem, ReportRequest, ReportResponse,
    Transaction, TrendSummary,
};
pub use receipt::parse_receipt_text;
pub use report::generate_report;
pub use trends::{ArticleCollector, CollectorConfig, HttpFetcher};
pub use vision::VisionClient;
