//! News-search RSS feed parsing
//!
//! Hand-rolled extraction over the RSS 2.0 item structure — the feed shape
//! is fixed and shallow, so tag scanning is enough.

use chrono::{DateTime, Utc};

/// One entry of a news search feed
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub link: Option<String>,
    pub title: String,
    pub source: String,
    /// Raw pubDate string as it appeared in the feed
    pub published: Option<String>,
}

/// Build a Google News RSS search URL for a keyword (ko/KR locale)
pub fn news_rss_url(query: &str) -> String {
    format!(
        "https://news.google.com/rss/search?q={}&hl=ko&gl=KR&ceid=KR:ko",
        urlencoding::encode(query)
    )
}

/// Extract all `<item>...</item>` blocks from the feed XML
fn extract_item_blocks(xml: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut search_from = 0;

    loop {
        let start_tag = "<item>";
        let end_tag = "</item>";

        let start = match xml[search_from..].find(start_tag) {
            Some(pos) => search_from + pos,
            None => break,
        };

        let end = match xml[start..].find(end_tag) {
            Some(pos) => start + pos + end_tag.len(),
            None => break,
        };

        blocks.push(&xml[start..end]);
        search_from = end;
    }

    blocks
}

/// Extract the text of the first `<tag>...</tag>` occurrence
fn extract_tag_text(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);

    let open_pos = xml.find(&open)?;
    let content_start = open_pos + xml[open_pos..].find('>')? + 1;
    let content_end = content_start + xml[content_start..].find(&close)?;

    Some(unwrap_cdata(xml[content_start..content_end].trim()))
}

/// Strip a CDATA wrapper and decode the common XML entities
fn unwrap_cdata(text: &str) -> String {
    let inner = text
        .strip_prefix("<![CDATA[")
        .and_then(|t| t.strip_suffix("]]>"))
        .unwrap_or(text);
    inner
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Parse a news feed into entries
pub fn parse_feed(xml: &str) -> Vec<FeedEntry> {
    extract_item_blocks(xml)
        .into_iter()
        .map(|block| FeedEntry {
            link: extract_tag_text(block, "link"),
            title: extract_tag_text(block, "title").unwrap_or_default(),
            source: extract_tag_text(block, "source")
                .unwrap_or_else(|| "Google News".to_string()),
            published: extract_tag_text(block, "pubDate"),
        })
        .collect()
}

/// Parse a feed pubDate (RFC 2822, with an RFC 3339 fallback) into UTC
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
<title>search results</title>
<item>
  <title><![CDATA[카페 소비 트렌드 확산]]></title>
  <link>https://news.example.com/a1</link>
  <pubDate>Mon, 03 Nov 2025 09:00:00 GMT</pubDate>
  <source url="https://example.com">예시신문</source>
</item>
<item>
  <title>두 번째 기사 &amp; 분석</title>
  <link>https://news.example.com/a2</link>
  <pubDate>Tue, 04 Nov 2025 10:30:00 GMT</pubDate>
</item>
<item>
  <title>링크 없는 항목</title>
</item>
</channel></rss>"#;

    #[test]
    fn test_parse_feed_entries() {
        let entries = parse_feed(SAMPLE_FEED);
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].title, "카페 소비 트렌드 확산");
        assert_eq!(entries[0].link.as_deref(), Some("https://news.example.com/a1"));
        assert_eq!(entries[0].source, "예시신문");
        assert!(entries[0].published.as_deref().unwrap().contains("2025"));

        // Missing <source> falls back; entities decoded
        assert_eq!(entries[1].source, "Google News");
        assert_eq!(entries[1].title, "두 번째 기사 & 분석");

        assert_eq!(entries[2].link, None);
        assert_eq!(entries[2].published, None);
    }

    #[test]
    fn test_parse_pub_date_rfc2822() {
        let dt = parse_pub_date("Mon, 03 Nov 2025 09:00:00 GMT").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-11-03T09:00:00+00:00");
    }

    #[test]
    fn test_parse_pub_date_rfc3339_fallback() {
        assert!(parse_pub_date("2025-11-03T09:00:00+09:00").is_some());
        assert!(parse_pub_date("not a date").is_none());
    }

    #[test]
    fn test_news_rss_url_encodes_query() {
        let url = news_rss_url("소비 트렌드");
        assert!(url.starts_with("https://news.google.com/rss/search?q="));
        assert!(!url.contains(' '));
        assert!(url.ends_with("&hl=ko&gl=KR&ceid=KR:ko"));
    }

    #[test]
    fn test_empty_feed() {
        assert!(parse_feed("<rss><channel></channel></rss>").is_empty());
    }
}
