//! Spending report generation
//!
//! Reads a user's transactions for the requested period and asks the
//! language model for a prose report. An empty transaction set is a NoData
//! condition surfaced to the caller, not silently papered over.

use chrono::NaiveDate;
use tracing::debug;

use crate::ai::{AIClient, ModelBackend};
use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{ChatMessage, ReportRequest, ReportResponse, Transaction};

/// Question used when the caller does not ask one
const DEFAULT_QUESTION: &str = "이 소비 내역을 바탕으로 기간별/카테고리별 요약, \
     지출 패턴 분석, 절약을 위한 한두 가지 조언을 포함한 리포트를 줄글 형식으로 작성하십시오.";

const SYSTEM_PROMPT: &str = "당신은 개인 가계부 서비스 'OpenWallet'의 소비 분석 리포트 생성가입니다. \
     입력으로 주어지는 JSON 형식의 거래 내역을 이해하고, 읽기 좋은 텍스트(줄글)로 작성하십시오. \
     가능하면 항목별 합계, 카테고리별 통계, 소비 패턴 요약, 절약/개선 팁 등을 포함하고, \
     중요한 수치는 숫자로 명확하게 보여주세요.";

/// Assemble the report prompt over the serialized transactions
pub fn build_report_prompt(
    transactions: &[Transaction],
    question: Option<&str>,
) -> Result<Vec<ChatMessage>> {
    let transactions_json = serde_json::to_string_pretty(transactions)?;
    let question = question.unwrap_or(DEFAULT_QUESTION);

    Ok(vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "요청사항: {}\n\n\
             다음은 분석해야 할 거래 내역 데이터입니다:\n{}\n\n\
             위 데이터를 바탕으로 분석 보고서를 작성하세요. \
             데이터 자체를 다시 보여주지 말고, 해석된 내용만 텍스트로 출력하세요.",
            question, transactions_json
        )),
    ])
}

fn parse_bound(label: &str, raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map(|s| {
        s.parse().map_err(|_| {
            Error::InvalidData(format!("Invalid {} (expected YYYY-MM-DD): {}", label, s))
        })
    })
    .transpose()
}

/// Generate a spending report for the requested user and period
///
/// Fails with [`Error::NotFound`] when no transactions match the range.
pub async fn generate_report(
    db: &Database,
    client: &AIClient,
    request: &ReportRequest,
) -> Result<ReportResponse> {
    let start = parse_bound("start_date", request.start_date.as_deref())?;
    let end = parse_bound("end_date", request.end_date.as_deref())?;

    let transactions = db.list_transactions(request.user_id, start, end)?;
    if transactions.is_empty() {
        return Err(Error::NotFound(
            "해당 조건에 해당하는 거래 내역이 없습니다.".to_string(),
        ));
    }

    let messages = build_report_prompt(&transactions, request.question.as_deref())?;
    let report = client.chat(&messages).await?;
    debug!(
        transactions = transactions.len(),
        chars = report.len(),
        "report generated"
    );

    Ok(ReportResponse {
        report: report.trim().to_string(),
        user_id: request.user_id,
        start_date: request.start_date.clone(),
        end_date: request.end_date.clone(),
        transaction_count: transactions.len(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::NewTransaction;

    fn seed(db: &Database, user_id: i64, d: &str, amount: i64) {
        db.insert_transaction(&NewTransaction {
            user_id,
            date: d.parse::<NaiveDate>().unwrap(),
            merchant: "스타카페".to_string(),
            amount,
            category: Some("카페/간식".to_string()),
            memo: None,
            raw_json: None,
        })
        .unwrap();
    }

    fn request(user_id: i64) -> ReportRequest {
        ReportRequest {
            user_id,
            start_date: None,
            end_date: None,
            question: None,
        }
    }

    #[tokio::test]
    async fn test_report_over_empty_set_is_not_found() {
        let db = Database::in_memory().unwrap();
        let client = AIClient::mock();

        let err = generate_report(&db, &client, &request(1)).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_report_counts_rows_read() {
        let db = Database::in_memory().unwrap();
        let client = AIClient::mock();
        seed(&db, 1, "2025-11-01", 4500);
        seed(&db, 1, "2025-11-03", 6100);
        seed(&db, 2, "2025-11-02", 9999);

        let response = generate_report(&db, &client, &request(1)).await.unwrap();
        assert_eq!(response.transaction_count, 2);
        assert_eq!(response.user_id, 1);
        assert!(!response.report.is_empty());
    }

    #[tokio::test]
    async fn test_report_range_filters_rows() {
        let db = Database::in_memory().unwrap();
        let client = AIClient::mock();
        seed(&db, 1, "2025-10-11", 5200);
        seed(&db, 1, "2025-11-01", 4500);

        let mut req = request(1);
        req.start_date = Some("2025-11-01".to_string());
        let response = generate_report(&db, &client, &req).await.unwrap();
        assert_eq!(response.transaction_count, 1);
        assert_eq!(response.start_date.as_deref(), Some("2025-11-01"));
    }

    #[tokio::test]
    async fn test_report_rejects_malformed_date() {
        let db = Database::in_memory().unwrap();
        let client = AIClient::mock();

        let mut req = request(1);
        req.start_date = Some("11/01/2025".to_string());
        let err = generate_report(&db, &client, &req).await.unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_prompt_contains_question_and_data() {
        let transactions = Vec::new();
        let messages = build_report_prompt(&transactions, Some("카테고리별 합계만 알려줘")).unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.contains("카테고리별 합계만 알려줘"));
        assert!(messages[0].content.contains("OpenWallet"));
    }
}
