//! Test utilities for openwallet-core
//!
//! Provides a mock model server speaking the Ollama chat API, used by
//! integration tests and local development without a real model.

use axum::{
    extract::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::sync::oneshot;

use crate::models::ChatMessage;

/// Mock model server for testing and development
pub struct MockModelServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockModelServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/api/tags", get(handle_tags))
            .route("/api/chat", post(handle_chat));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockModelServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Serialize)]
struct TagsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Serialize)]
struct ModelInfo {
    name: String,
    modified_at: String,
    size: u64,
}

/// Tags endpoint response (health check)
async fn handle_tags() -> Json<TagsResponse> {
    Json(TagsResponse {
        models: vec![ModelInfo {
            name: "qwen2.5:1.5b".to_string(),
            modified_at: "2025-01-01T00:00:00Z".to_string(),
            size: 1_500_000_000,
        }],
    })
}

#[derive(Deserialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatResponse {
    model: String,
    message: ResponseMessage,
    done: bool,
}

#[derive(Serialize)]
struct ResponseMessage {
    role: String,
    content: String,
}

/// Chat endpoint, keyed off the prompt content
///
/// Trend summarization prompts name the four-key JSON schema; everything
/// else is treated as a report request and answered with prose.
async fn handle_chat(Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
    let prompt = request
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let content = if prompt.contains("key_stats") && prompt.contains("opportunities") {
        // Fenced on purpose: exercises the caller's repair chain
        "```json\n{\n  \"bullets\": [\"카페 소비가 늘고 있습니다.\"],\n  \"key_stats\": [\"주간 결제 5% 증가\"],\n  \"risks\": [\"구독 고정비\"],\n  \"opportunities\": [\"구독 정리 제안\"]\n}\n```"
            .to_string()
    } else {
        "기간 내 지출은 카페/간식 비중이 가장 높았습니다. 소액 결제를 주간 예산으로 묶어 관리하는 것을 권장합니다."
            .to_string()
    };

    Json(ChatResponse {
        model: request.model,
        message: ResponseMessage {
            role: "assistant".to_string(),
            content,
        },
        done: true,
    })
}
