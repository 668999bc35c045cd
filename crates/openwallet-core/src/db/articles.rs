//! Collected-article store

use rusqlite::params;

use super::Database;
use crate::error::Result;
use crate::models::Article;

impl Database {
    /// Store a collected article; duplicates (same URL) are ignored
    ///
    /// Returns true when the article was newly inserted.
    pub fn upsert_article(&self, article: &Article) -> Result<bool> {
        let conn = self.conn()?;

        let inserted = conn.execute(
            r#"
            INSERT OR IGNORE INTO articles (url, title, source, published_at, content)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                article.url,
                article.title,
                article.source,
                article.published_at,
                article.content,
            ],
        )?;

        Ok(inserted > 0)
    }

    /// Most recently collected articles, newest first
    pub fn list_recent_articles(&self, limit: i64) -> Result<Vec<Article>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT url, title, source, published_at, content
            FROM articles
            ORDER BY created_at DESC, url DESC
            LIMIT ?
            "#,
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(Article {
                url: row.get(0)?,
                title: row.get(1)?,
                source: row.get(2)?,
                published_at: row.get(3)?,
                content: row.get(4)?,
            })
        })?;

        let mut articles = Vec::new();
        for row in rows {
            articles.push(row?);
        }
        Ok(articles)
    }
}
