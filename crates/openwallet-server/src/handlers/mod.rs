//! Request handlers, one module per domain

mod ocr;
mod reports;
mod transactions;
mod trends;

pub use ocr::ocr_receipt;
pub use reports::create_report;
pub use transactions::{create_transaction, list_transactions};
pub use trends::trend_summary;

use axum::Json;

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "openwallet",
    }))
}
