//! Mock model backend for testing
//!
//! Returns deterministic canned responses keyed off the prompt content so
//! tests and local development work without a running model server.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ChatMessage;

use super::ModelBackend;

#[derive(Clone)]
pub struct MockBackend {
    model: String,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            model: "mock".to_string(),
        }
    }

    pub fn with_model(&self, model: &str) -> Self {
        Self {
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ModelBackend for MockBackend {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        // Trend summarization asks for the four-key JSON schema
        let response = if prompt.contains("key_stats") && prompt.contains("opportunities") {
            r#"{
  "bullets": ["카페 소비가 꾸준히 이어지고 있습니다.", "근거리 여행 지출이 늘고 있습니다."],
  "key_stats": ["커피 관련 결제 건수 주간 5% 증가"],
  "risks": ["구독 고정비 누적"],
  "opportunities": ["구독 정리 알림 기능"]
}"#
            .to_string()
        } else {
            // Spending report request
            "이번 기간 동안 카페/간식 지출이 가장 큰 비중을 차지했습니다. \
             고정 지출을 점검하고 커피 관련 소액 결제를 주 단위 예산으로 관리하면 \
             절약 여지가 있습니다."
                .to_string()
        };

        Ok(response)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
