//! OpenWallet Web Server
//!
//! Axum-based REST API for the OpenWallet personal finance backend:
//! - `POST /api/ocr-receipt`: receipt image upload → OCR → field extraction
//! - `POST /api/trends/summary`: news collection → model trend digest
//! - `POST /api/report`: transaction history → model spending report
//! - `GET/POST /api/transactions`: the thin persistence surface
//!
//! Input validation (upload size, required fields) happens here, before the
//! core is reached; error responses are sanitized.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use openwallet_core::ai::{AIClient, ModelBackend};
use openwallet_core::db::Database;
use openwallet_core::vision::VisionClient;
use openwallet_core::Error as CoreError;

mod handlers;

/// Maximum receipt upload size (8 MB)
pub const MAX_UPLOAD_SIZE: usize = 8 * 1024 * 1024;

/// Shared application state
pub struct AppState {
    pub db: Database,
    /// Vision OCR gateway; absent when `VISION_API_KEY` is not set
    pub vision: Option<VisionClient>,
    /// Model backend; absent when no backend is configured
    pub ai: Option<AIClient>,
}

/// Create the application router, resolving external clients from the
/// environment
pub fn create_router(db: Database) -> Router {
    let vision = VisionClient::from_env();
    if let Some(ref client) = vision {
        info!("Vision OCR configured: {}", client.host());
    } else {
        info!("ℹ️  Vision OCR not configured (set VISION_API_KEY to enable receipt scanning)");
    }

    let ai = AIClient::from_env();
    if let Some(ref client) = ai {
        info!(
            "Model backend configured: {} (model: {})",
            client.host(),
            client.model()
        );
    } else {
        info!("ℹ️  Model backend not configured (set OLLAMA_HOST to enable reports and trend summaries)");
    }

    create_router_with_clients(db, vision, ai)
}

/// Create the application router with explicit clients (for testing)
pub fn create_router_with_clients(
    db: Database,
    vision: Option<VisionClient>,
    ai: Option<AIClient>,
) -> Router {
    let state = Arc::new(AppState { db, vision, ai });

    let api_routes = Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Receipt OCR
        .route("/ocr-receipt", post(handlers::ocr_receipt))
        // Trend summary
        .route("/trends/summary", post(handlers::trend_summary))
        // Spending report
        .route("/report", post(handlers::create_report))
        // Transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        );

    // Open CORS: the API is consumed directly by the front-end during
    // development
    let cors = CorsLayer::permissive();

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        // Allow the 8 MB receipt limit plus multipart overhead; the handler
        // enforces the exact cap
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 64 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(db: Database, host: &str, port: u16) -> anyhow::Result<()> {
    check_ai_connection().await;

    let app = create_router(db);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log model backend connection status
async fn check_ai_connection() {
    match AIClient::from_env() {
        Some(client) => {
            if client.health_check().await {
                info!(
                    "✅ Model backend connected: {} (model: {})",
                    client.host(),
                    client.model()
                );
            } else {
                info!(
                    "⚠️  Model backend configured but not responding: {}",
                    client.host()
                );
            }
        }
        None => {
            info!("ℹ️  Model backend not configured (set OLLAMA_HOST to enable AI features)");
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn payload_too_large(msg: &str) -> Self {
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn service_unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(msg) => AppError::not_found(&msg),
            CoreError::InvalidData(msg) => AppError::bad_request(&msg),
            CoreError::VisionUnavailable => {
                AppError::service_unavailable("Vision OCR backend not configured")
            }
            CoreError::ModelUnavailable => {
                AppError::service_unavailable("Model backend not configured")
            }
            CoreError::VisionService(msg) => Self {
                status: StatusCode::BAD_GATEWAY,
                message: format!("Vision OCR service error: {}", msg),
                internal: None,
            },
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                // Return generic message to client
                message: "An internal error occurred".to_string(),
                // Keep full error for logging
                internal: Some(other.into()),
            },
        }
    }
}
