//! Trend summary command

use anyhow::Result;

use openwallet_core::global_client;
use openwallet_core::trends::{self, ArticleCollector, CollectorConfig};

pub async fn cmd_trends(keywords: &str, days: i64, max_articles: usize) -> Result<()> {
    let keywords: Vec<String> = keywords
        .split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        anyhow::bail!("At least one keyword is required");
    }

    let collector = ArticleCollector::new(CollectorConfig::default());
    let summary = trends::run(global_client(), &collector, &keywords, days, max_articles).await?;

    println!("기간: {} ~ {}\n", summary.period_start, summary.period_end);
    for bullet in &summary.bullets {
        println!(" - {}", bullet);
    }
    if !summary.key_stats.is_empty() {
        println!("\n주요 수치:");
        for stat in &summary.key_stats {
            println!(" - {}", stat);
        }
    }
    if !summary.risks.is_empty() {
        println!("\n리스크:");
        for risk in &summary.risks {
            println!(" - {}", risk);
        }
    }
    if !summary.opportunities.is_empty() {
        println!("\n기회:");
        for opportunity in &summary.opportunities {
            println!(" - {}", opportunity);
        }
    }
    if !summary.sources.is_empty() {
        println!("\n출처 {}건 (model: {})", summary.sources.len(), summary.model);
    }

    Ok(())
}
