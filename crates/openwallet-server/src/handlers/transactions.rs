//! Transaction handlers
//!
//! The thin persistence surface: confirmed receipt scans and manual entries
//! go in here, and the report path reads them back out.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use openwallet_core::models::{NewTransaction, Transaction};

/// Query params for GET /api/transactions
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub user_id: i64,
    /// Inclusive "YYYY-MM-DD" bounds
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

fn parse_bound(label: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    raw.map(|s| {
        s.parse().map_err(|_| {
            AppError::bad_request(&format!("Invalid {} (expected YYYY-MM-DD): {}", label, s))
        })
    })
    .transpose()
}

/// GET /api/transactions - List a user's transactions
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let from = parse_bound("from", query.from.as_deref())?;
    let to = parse_bound("to", query.to.as_deref())?;

    let transactions = state.db.list_transactions(query.user_id, from, to)?;
    Ok(Json(transactions))
}

/// Response for transaction creation
#[derive(Debug, Serialize)]
pub struct CreateTransactionResponse {
    pub id: i64,
}

/// POST /api/transactions - Store a confirmed expense
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(new_tx): Json<NewTransaction>,
) -> Result<Json<CreateTransactionResponse>, AppError> {
    if new_tx.merchant.trim().is_empty() {
        return Err(AppError::bad_request("Merchant must not be empty"));
    }
    if new_tx.amount <= 0 {
        return Err(AppError::bad_request("Amount must be positive"));
    }

    let id = state.db.insert_transaction(&new_tx)?;
    Ok(Json(CreateTransactionResponse { id }))
}
