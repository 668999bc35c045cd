//! Transaction operations

use chrono::NaiveDate;
use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewTransaction, Transaction};

impl Database {
    /// Insert a transaction, returning its new ID
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (user_id, date, merchant, amount, category, memo, raw_json)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                tx.user_id,
                tx.date.to_string(),
                tx.merchant,
                tx.amount,
                tx.category,
                tx.memo,
                tx.raw_json,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List a user's transactions, optionally bounded by an inclusive date
    /// range, ordered by date ascending
    pub fn list_transactions(
        &self,
        user_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut conditions = vec!["user_id = ?".to_string()];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id)];

        if let Some(start) = start_date {
            conditions.push("date >= ?".to_string());
            params.push(Box::new(start.to_string()));
        }
        if let Some(end) = end_date {
            conditions.push("date <= ?".to_string());
            params.push(Box::new(end.to_string()));
        }

        let sql = format!(
            r#"
            SELECT id, user_id, date, merchant, amount, category, memo, created_at
            FROM transactions
            WHERE {}
            ORDER BY date ASC, id ASC
            "#,
            conditions.join(" AND ")
        );

        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(param_refs.as_slice(), |row| {
            Ok(Transaction {
                id: row.get(0)?,
                user_id: row.get(1)?,
                date: row
                    .get::<_, String>(2)?
                    .parse()
                    .unwrap_or_default(),
                merchant: row.get(3)?,
                amount: row.get(4)?,
                category: row.get(5)?,
                memo: row.get(6)?,
                created_at: parse_datetime(&row.get::<_, String>(7)?),
            })
        })?;

        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(row?);
        }
        Ok(transactions)
    }

    /// Count a user's transactions
    pub fn count_transactions(&self, user_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
