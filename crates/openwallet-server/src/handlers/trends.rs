//! Trend summary handler

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{AppError, AppState};
use openwallet_core::trends::{self, ArticleCollector, CollectorConfig};
use openwallet_core::{ModelBackend, TrendSummary};

fn default_days() -> i64 {
    7
}

fn default_max_articles() -> usize {
    30
}

/// Request body for POST /api/trends/summary
#[derive(Debug, Deserialize)]
pub struct TrendSummaryRequest {
    pub keywords: Vec<String>,
    #[serde(default = "default_days")]
    pub days: i64,
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
    /// Override the configured model for this request
    #[serde(default)]
    pub model: Option<String>,
}

/// Response body: the summary without its raw model payload
#[derive(Debug, Serialize)]
pub struct TrendSummaryResponse {
    pub period_start: String,
    pub period_end: String,
    pub keywords: Vec<String>,
    pub bullets: Vec<String>,
    pub key_stats: Vec<String>,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
    pub sources: Vec<String>,
    pub model: String,
}

impl From<TrendSummary> for TrendSummaryResponse {
    fn from(summary: TrendSummary) -> Self {
        Self {
            period_start: summary.period_start,
            period_end: summary.period_end,
            keywords: summary.keywords,
            bullets: summary.bullets,
            key_stats: summary.key_stats,
            risks: summary.risks,
            opportunities: summary.opportunities,
            sources: summary.sources,
            model: summary.model,
        }
    }
}

/// POST /api/trends/summary - Collect recent news and summarize trends
pub async fn trend_summary(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TrendSummaryRequest>,
) -> Result<Json<TrendSummaryResponse>, AppError> {
    let keywords: Vec<String> = request
        .keywords
        .iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return Err(AppError::bad_request("At least one keyword is required"));
    }

    let client = state
        .ai
        .as_ref()
        .map(|c| match &request.model {
            Some(model) => c.with_model(model),
            None => c.clone(),
        });

    let collector = ArticleCollector::new(CollectorConfig::default());
    let articles = collector
        .collect(&keywords, request.days, request.max_articles)
        .await;

    // Keep collected articles for later inspection; failure here must not
    // break the response
    for article in &articles {
        if let Err(e) = state.db.upsert_article(article) {
            warn!(url = %article.url, error = %e, "failed to store article");
        }
    }

    let now = chrono::Utc::now();
    let summary = if articles.is_empty() {
        let model = request
            .model
            .as_deref()
            .or_else(|| client.as_ref().map(|c| c.model()))
            .unwrap_or("demo")
            .to_string();
        trends::demo_fallback(&keywords, request.days, now, &model)
    } else {
        let client = client
            .as_ref()
            .ok_or_else(|| AppError::service_unavailable("Model backend not configured"))?;
        trends::summarize(
            client,
            &articles,
            &keywords,
            request.days,
            now,
            trends::DEFAULT_CONTEXT_CHARS,
        )
        .await?
    };

    Ok(Json(summary.into()))
}
