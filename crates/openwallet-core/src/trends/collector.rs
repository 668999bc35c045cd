//! Article collection from the news search feed
//!
//! For each keyword the collector pulls the RSS feed, filters entries by
//! publication date, fetches and extracts each article body, and stops the
//! moment the global article cap is reached. Every per-entry failure is
//! non-fatal: log and move on to the next entry.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, DateTime, Utc};
use tracing::{debug, info, warn};

use crate::models::Article;

use super::feed::{news_rss_url, parse_feed, parse_pub_date, FeedEntry};
use super::html::{page_text, paragraph_text};

/// Collector tuning knobs
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Minimum extracted-body length to keep an article
    pub min_chars: usize,
    /// Article content is truncated to this many characters
    pub max_chars: usize,
    /// When set, only articles published in this calendar year are admitted
    /// (on top of the recency window). `None` applies the recency window
    /// alone.
    pub accepted_year: Option<i32>,
    /// Pause between keywords, a soft rate limit on the feed host
    pub keyword_delay: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            min_chars: 10,
            max_chars: 25_000,
            accepted_year: None,
            keyword_delay: Duration::from_millis(200),
        }
    }
}

/// Text-over-HTTP fetch abstraction
///
/// `None` covers every transport failure (connect, timeout, HTTP >= 400) —
/// the collector treats them all as skip-and-continue.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get_text(&self, url: &str) -> Option<String>;
}

/// Production fetcher over reqwest
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("Mozilla/5.0 (OpenWallet-TrendSummary)")
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &str) -> Option<String> {
        let response = self.client.get(url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.text().await.ok()
    }
}

/// Why an entry was rejected (or not)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryVerdict {
    Accept,
    NoLink,
    UnparseableDate,
    WrongYear,
    TooOld,
}

/// Date-window decision for a single feed entry
///
/// Pure so the filter policy is testable without any network.
pub fn judge_entry(
    entry: &FeedEntry,
    now: DateTime<Utc>,
    days: i64,
    accepted_year: Option<i32>,
) -> (EntryVerdict, Option<DateTime<Utc>>) {
    if entry.link.is_none() {
        return (EntryVerdict::NoLink, None);
    }

    let Some(published) = entry.published.as_deref().and_then(parse_pub_date) else {
        return (EntryVerdict::UnparseableDate, None);
    };

    if let Some(year) = accepted_year {
        if published.year() != year {
            return (EntryVerdict::WrongYear, Some(published));
        }
    }

    if published < now - chrono::Duration::days(days) {
        return (EntryVerdict::TooOld, Some(published));
    }

    (EntryVerdict::Accept, Some(published))
}

pub struct ArticleCollector<F: Fetch> {
    fetcher: F,
    config: CollectorConfig,
}

impl ArticleCollector<HttpFetcher> {
    pub fn new(config: CollectorConfig) -> Self {
        Self {
            fetcher: HttpFetcher::new(),
            config,
        }
    }
}

impl<F: Fetch> ArticleCollector<F> {
    pub fn with_fetcher(fetcher: F, config: CollectorConfig) -> Self {
        Self { fetcher, config }
    }

    /// Collect up to `max_articles` articles across all keywords
    ///
    /// The cap is global: once reached, collection stops immediately and no
    /// further fetches happen, even with keywords left unprocessed.
    pub async fn collect(&self, keywords: &[String], days: i64, max_articles: usize) -> Vec<Article> {
        let now = Utc::now();
        let mut out = Vec::new();

        info!(?keywords, days, max_articles, "collecting articles");

        for (i, keyword) in keywords.iter().enumerate() {
            // Soft rate limit between keywords
            if i > 0 {
                tokio::time::sleep(self.config.keyword_delay).await;
            }

            let feed_url = news_rss_url(keyword);
            let Some(xml) = self.fetcher.get_text(&feed_url).await else {
                warn!(%keyword, "feed fetch failed, skipping keyword");
                continue;
            };

            let entries = parse_feed(&xml);
            debug!(%keyword, entries = entries.len(), "feed parsed");

            for entry in &entries {
                let (verdict, published) =
                    judge_entry(entry, now, days, self.config.accepted_year);
                if verdict != EntryVerdict::Accept {
                    debug!(?verdict, title = %entry.title, "entry skipped");
                    continue;
                }
                // Accept implies a link
                let Some(link) = entry.link.as_deref() else {
                    continue;
                };

                let Some(html) = self.fetcher.get_text(link).await else {
                    debug!(link, "article fetch failed, skipping");
                    continue;
                };

                let Some(content) = self.extract_content(&html) else {
                    debug!(link, "article body too short, skipping");
                    continue;
                };

                out.push(Article {
                    url: link.to_string(),
                    title: entry.title.clone(),
                    source: entry.source.clone(),
                    published_at: published.map(|dt| dt.to_rfc3339()),
                    content,
                });

                if out.len() >= max_articles {
                    info!(collected = out.len(), "reached max_articles, stopping");
                    return out;
                }
            }
        }

        info!(collected = out.len(), "collection finished");
        out
    }

    /// Paragraph text first; whole-page text when the paragraphs are too
    /// short; `None` when even that is below the minimum.
    fn extract_content(&self, html: &str) -> Option<String> {
        let p_text = paragraph_text(html);
        let text = if p_text.chars().count() >= self.config.min_chars {
            p_text
        } else {
            page_text(html)
        };

        if text.chars().count() < self.config.min_chars {
            return None;
        }
        Some(clamp_chars(&text, self.config.max_chars))
    }
}

/// Truncate to at most `max` characters on a char boundary
pub fn clamp_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Stub fetcher serving canned responses and counting every call
    struct StubFetcher {
        responses: Mutex<std::collections::HashMap<String, String>>,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn new(pairs: &[(&str, &str)]) -> Self {
            let map = pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Self {
                responses: Mutex::new(map),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetch for StubFetcher {
        async fn get_text(&self, url: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses.lock().unwrap().get(url).cloned()
        }
    }

    fn entry(link: Option<&str>, published: Option<&str>) -> FeedEntry {
        FeedEntry {
            link: link.map(|s| s.to_string()),
            title: "기사".to_string(),
            source: "예시".to_string(),
            published: published.map(|s| s.to_string()),
        }
    }

    fn rss_item(link: &str, pub_date: &str) -> String {
        format!(
            "<item><title>기사</title><link>{}</link><pubDate>{}</pubDate></item>",
            link, pub_date
        )
    }

    fn recent_pub_date(now: DateTime<Utc>) -> String {
        (now - chrono::Duration::hours(12)).to_rfc2822()
    }

    /// Fixed reference instant so the filter tests never straddle a year
    /// boundary
    fn fixed_now() -> DateTime<Utc> {
        use chrono::TimeZone;
        Utc.with_ymd_and_hms(2025, 11, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_judge_entry_requires_link_and_date() {
        let now = fixed_now();
        assert_eq!(
            judge_entry(&entry(None, None), now, 7, None).0,
            EntryVerdict::NoLink
        );
        assert_eq!(
            judge_entry(&entry(Some("https://x"), None), now, 7, None).0,
            EntryVerdict::UnparseableDate
        );
        assert_eq!(
            judge_entry(&entry(Some("https://x"), Some("gibberish")), now, 7, None).0,
            EntryVerdict::UnparseableDate
        );
    }

    #[test]
    fn test_judge_entry_year_policy() {
        let now = fixed_now();
        let recent = recent_pub_date(now);

        // Passes with no year policy and with the matching year
        assert_eq!(
            judge_entry(&entry(Some("https://x"), Some(&recent)), now, 7, None).0,
            EntryVerdict::Accept
        );
        assert_eq!(
            judge_entry(&entry(Some("https://x"), Some(&recent)), now, 7, Some(2025)).0,
            EntryVerdict::Accept
        );
        // Excluded when the policy names a different year, regardless of
        // how fresh the entry is
        assert_eq!(
            judge_entry(&entry(Some("https://x"), Some(&recent)), now, 7, Some(2024)).0,
            EntryVerdict::WrongYear
        );
    }

    #[test]
    fn test_judge_entry_recency_window() {
        let now = fixed_now();
        let stale = (now - chrono::Duration::days(30)).to_rfc2822();
        assert_eq!(
            judge_entry(&entry(Some("https://x"), Some(&stale)), now, 7, None).0,
            EntryVerdict::TooOld
        );
    }

    #[tokio::test]
    async fn test_collect_happy_path() {
        let now = Utc::now();
        let feed = format!(
            "<rss><channel>{}</channel></rss>",
            rss_item("https://a/1", &recent_pub_date(now))
        );
        let fetcher = StubFetcher::new(&[
            (news_rss_url("커피").as_str(), feed.as_str()),
            ("https://a/1", "<p>본문 내용이 충분히 길게 들어 있습니다.</p>"),
        ]);

        let collector = ArticleCollector::with_fetcher(fetcher, CollectorConfig::default());
        let articles = collector.collect(&["커피".to_string()], 7, 30).await;

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "https://a/1");
        assert!(articles[0].content.contains("본문 내용"));
        assert!(articles[0].published_at.is_some());
    }

    #[tokio::test]
    async fn test_collect_cap_stops_further_fetches() {
        let now = Utc::now();
        let pub_date = recent_pub_date(now);
        let feed_one = format!(
            "<rss><channel>{}{}</channel></rss>",
            rss_item("https://a/1", &pub_date),
            rss_item("https://a/2", &pub_date)
        );
        let fetcher = StubFetcher::new(&[
            (news_rss_url("커피").as_str(), feed_one.as_str()),
            ("https://a/1", "<p>첫 기사 본문이 충분히 깁니다.</p>"),
            ("https://a/2", "<p>두 번째 기사 본문입니다.</p>"),
            // The second keyword's feed must never be requested
            (
                news_rss_url("여행").as_str(),
                "<rss><channel></channel></rss>",
            ),
        ]);

        let collector = ArticleCollector::with_fetcher(fetcher, CollectorConfig::default());
        let keywords = vec!["커피".to_string(), "여행".to_string()];
        let articles = collector.collect(&keywords, 7, 1).await;

        assert_eq!(articles.len(), 1);
        // Exactly two fetches: the first feed and the first article page
        assert_eq!(collector.fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_collect_skips_failed_page_fetch() {
        let now = Utc::now();
        let pub_date = recent_pub_date(now);
        let feed = format!(
            "<rss><channel>{}{}</channel></rss>",
            rss_item("https://a/dead", &pub_date),
            rss_item("https://a/live", &pub_date)
        );
        let fetcher = StubFetcher::new(&[
            (news_rss_url("커피").as_str(), feed.as_str()),
            // https://a/dead intentionally missing: fetch returns None
            ("https://a/live", "<p>살아있는 기사 본문입니다.</p>"),
        ]);

        let collector = ArticleCollector::with_fetcher(fetcher, CollectorConfig::default());
        let articles = collector.collect(&["커피".to_string()], 7, 30).await;

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "https://a/live");
    }

    #[tokio::test]
    async fn test_collect_short_body_falls_back_then_skips() {
        let now = Utc::now();
        let pub_date = recent_pub_date(now);
        let feed = format!(
            "<rss><channel>{}{}</channel></rss>",
            rss_item("https://a/full", &pub_date),
            rss_item("https://a/thin", &pub_date)
        );
        let fetcher = StubFetcher::new(&[
            (news_rss_url("커피").as_str(), feed.as_str()),
            // No <p> content, but enough visible page text: whole-page fallback
            ("https://a/full", "<div>문단 태그 없이 작성된 제법 긴 본문</div>"),
            // Too short even for the whole-page fallback
            ("https://a/thin", "<p>짧음</p>"),
        ]);

        let collector = ArticleCollector::with_fetcher(fetcher, CollectorConfig::default());
        let articles = collector.collect(&["커피".to_string()], 7, 30).await;

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "https://a/full");
    }

    #[test]
    fn test_clamp_chars_on_boundary() {
        assert_eq!(clamp_chars("가나다라", 2), "가나");
        assert_eq!(clamp_chars("abc", 10), "abc");
    }
}
