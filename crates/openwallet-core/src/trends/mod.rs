//! News trend collection and summarization
//!
//! Two stages: the [`collector`] gathers recent articles per keyword from
//! the news search feed, and the orchestrator in this module turns them into
//! a structured [`TrendSummary`] via the language model — or a deterministic
//! demo fallback when nothing qualifying was collected, so sparse news
//! coverage never surfaces as an empty or error response.

pub mod collector;
pub mod feed;
pub mod html;

pub use collector::{ArticleCollector, CollectorConfig, Fetch, HttpFetcher};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::ai::parsing::repair_summary;
use crate::ai::{AIClient, ModelBackend};
use crate::error::{Error, Result};
use crate::models::{Article, ChatMessage, TrendSummary};

use collector::clamp_chars;

/// Default character budget for the article digest handed to the model
pub const DEFAULT_CONTEXT_CHARS: usize = 24_000;

fn iso_date(dt: DateTime<Utc>) -> String {
    dt.date_naive().to_string()
}

/// The deterministic summary returned when no qualifying articles were
/// collected
///
/// A pure function of `(keywords, days, now)`: period is `[now - days, now]`,
/// the request keywords are echoed, the body is fixed illustrative content,
/// `sources` is empty, and the raw response carries the fallback marker.
pub fn demo_fallback(
    keywords: &[String],
    days: i64,
    now: DateTime<Utc>,
    model: &str,
) -> TrendSummary {
    let joined_kw = if keywords.is_empty() {
        "소비 트렌드".to_string()
    } else {
        keywords.join(", ")
    };

    let bullets = vec![
        format!(
            "'{}' 키워드로 최근 {}일간 수집된 기사가 충분하지 않아, 대표적인 생활 소비 트렌드 예시를 대신 제공합니다.",
            joined_kw, days
        ),
        "카페·소확행, 근거리 여행, 구독 다이어트처럼 일상에 밀접한 소비 패턴이 계속 관찰되고 있습니다."
            .to_string(),
    ];
    let key_stats = vec![
        "2030 직장인 기준, '하루 한 잔' 카페 루틴은 유지되면서 리필·구독·편의점 커피 등 단가를 낮추는 선택이 늘고 있습니다."
            .to_string(),
        "장거리 해외 여행보다 근교 소도시·당일치기 중심의 짧고 잦은 여행 지출 패턴이 증가하는 추세입니다."
            .to_string(),
        "OTT·클라우드·교육 서비스 등 구독형 상품을 주기적으로 정리하는 '구독 다이어트' 수요가 커지고 있습니다."
            .to_string(),
    ];
    let risks = vec![
        "사용하지 않는 구독이 누적될 경우, 인지하지 못한 고정비가 매달 지출을 압박할 수 있습니다."
            .to_string(),
        "카페·외식, 여가·취미 지출이 소액이라도 자주 발생하면 예산 대비 체감보다 큰 지출로 이어질 수 있습니다."
            .to_string(),
    ];
    let opportunities = vec![
        "정기 결제 캘린더와 연동해 '해지 후보 구독'을 자동 추천하는 기능에 대한 니즈가 존재합니다."
            .to_string(),
        "카페·식비 예산을 '하루 한 잔 루틴'에 맞춰 미리 쪼개서 보여주면, 체감 관리 난이도가 낮아질 수 있습니다."
            .to_string(),
        "근거리 여행 패턴을 분석해 '교통비 + 경험 위주 소비' 조합에 맞는 예산 가이드를 제안할 수 있습니다."
            .to_string(),
    ];

    TrendSummary {
        period_start: iso_date(now - Duration::days(days)),
        period_end: iso_date(now),
        keywords: keywords.to_vec(),
        bullets,
        key_stats,
        risks,
        opportunities,
        sources: Vec::new(),
        model: model.to_string(),
        raw_response: serde_json::json!({"note": "no_articles_demo"}),
    }
}

/// Assemble the system+user prompt over the article digest
///
/// The digest is clamped to `max_context_chars` minus a 10% safety margin so
/// the instructions always fit inside the model's window.
pub fn build_summary_prompt(articles: &[Article], max_context_chars: usize) -> Vec<ChatMessage> {
    let joined = articles
        .iter()
        .map(|a| format!("# {}\n{}", a.title, a.content))
        .collect::<Vec<_>>()
        .join("\n\n");
    let budget = max_context_chars - max_context_chars / 10;
    let joined = clamp_chars(&joined, budget);

    vec![
        ChatMessage::system(
            "너는 한국어 경제/리테일/소비 트렌드 애널리스트다. \
             반드시 '유효한 JSON 한 개'만 출력하라. \
             말머리/설명/코드블록 없이, 아래 스키마 그대로 출력하라.",
        ),
        ChatMessage::user(format!(
            "아래 기사 묶음을 요약해 bullets, key_stats, risks, opportunities 키를 포함한 JSON으로 내놔. \
             가능하면 각 배열에 3~6개 항목을 넣고, 없으면 빈 배열을 넣어라.\n\n\
             {}\n\n\
             출력 JSON 예시:\n\
             {{\n  \"bullets\": [\"...\"],\n  \"key_stats\": [\"...\"],\n  \"risks\": [\"...\"],\n  \"opportunities\": [\"...\"]\n}}\n",
            joined
        )),
    ]
}

/// Summarize collected articles into a trend digest via the model
pub async fn summarize(
    client: &AIClient,
    articles: &[Article],
    keywords: &[String],
    days: i64,
    now: DateTime<Utc>,
    max_context_chars: usize,
) -> Result<TrendSummary> {
    let messages = build_summary_prompt(articles, max_context_chars);
    let raw = client.chat(&messages).await?;
    debug!(chars = raw.len(), "model summary response");

    // The model output is never trusted as-is
    let (sections, raw_response) = repair_summary(&raw);

    Ok(TrendSummary {
        period_start: iso_date(now - Duration::days(days)),
        period_end: iso_date(now),
        keywords: keywords.to_vec(),
        bullets: sections.bullets,
        key_stats: sections.key_stats,
        risks: sections.risks,
        opportunities: sections.opportunities,
        sources: articles.iter().map(|a| a.url.clone()).collect(),
        model: client.model().to_string(),
        raw_response,
    })
}

/// Collect and summarize: the main trend-summary entry point
///
/// Zero collected articles short-circuits into the demo fallback without
/// touching the model; otherwise a missing model backend is an error.
pub async fn run<F: Fetch>(
    client: Option<&AIClient>,
    article_collector: &ArticleCollector<F>,
    keywords: &[String],
    days: i64,
    max_articles: usize,
) -> Result<TrendSummary> {
    let articles = article_collector.collect(keywords, days, max_articles).await;
    info!(collected = articles.len(), "trend collection complete");

    let now = Utc::now();

    if articles.is_empty() {
        let model = client.map(|c| c.model()).unwrap_or("demo");
        return Ok(demo_fallback(keywords, days, now, model));
    }

    let client = client.ok_or(Error::ModelUnavailable)?;
    summarize(client, &articles, keywords, days, now, DEFAULT_CONTEXT_CHARS).await
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 10, 12, 0, 0).unwrap()
    }

    fn article(url: &str, content: &str) -> Article {
        Article {
            url: url.to_string(),
            title: "기사 제목".to_string(),
            source: "예시".to_string(),
            published_at: None,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_demo_fallback_shape() {
        let keywords = vec!["커피".to_string(), "여행".to_string()];
        let summary = demo_fallback(&keywords, 7, fixed_now(), "demo");

        assert_eq!(summary.period_start, "2025-11-03");
        assert_eq!(summary.period_end, "2025-11-10");
        assert_eq!(summary.keywords, keywords);
        assert!(summary.sources.is_empty());
        assert!(!summary.bullets.is_empty());
        assert_eq!(summary.raw_response["note"], "no_articles_demo");
        assert!(summary.bullets[0].contains("커피, 여행"));
    }

    #[test]
    fn test_demo_fallback_is_pure() {
        let keywords = vec!["커피".to_string()];
        let a = demo_fallback(&keywords, 3, fixed_now(), "demo");
        let b = demo_fallback(&keywords, 3, fixed_now(), "demo");
        assert_eq!(a.period_start, b.period_start);
        assert_eq!(a.bullets, b.bullets);
        assert_eq!(a.key_stats, b.key_stats);
    }

    #[test]
    fn test_period_reflects_requested_days() {
        let summary = demo_fallback(&[], 30, fixed_now(), "demo");
        assert_eq!(summary.period_start, "2025-10-11");
        assert!(summary.period_start <= summary.period_end);
    }

    #[test]
    fn test_prompt_clamps_article_digest() {
        let big = article("https://a/1", &"가".repeat(50_000));
        let messages = build_summary_prompt(&[big], 1_000);
        // 10% margin below the context budget
        assert!(messages[1].content.chars().count() < 1_500);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }

    #[tokio::test]
    async fn test_summarize_with_mock_backend() {
        let client = AIClient::mock();
        let articles = vec![
            article("https://a/1", "카페 소비가 늘었다"),
            article("https://a/2", "여행 지출 분석"),
        ];
        let keywords = vec!["커피".to_string()];

        let summary = summarize(
            &client,
            &articles,
            &keywords,
            7,
            fixed_now(),
            DEFAULT_CONTEXT_CHARS,
        )
        .await
        .unwrap();

        assert_eq!(summary.sources, vec!["https://a/1", "https://a/2"]);
        assert_eq!(summary.keywords, keywords);
        assert!(!summary.bullets.is_empty());
        assert_eq!(summary.model, "mock");
        assert_eq!(summary.period_start, "2025-11-03");
    }
}
