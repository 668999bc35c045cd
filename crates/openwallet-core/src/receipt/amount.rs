//! Total amount extraction
//!
//! Keyword-anchored patterns (합계/총액/결제금액/TOTAL) are tried before the
//! generic number-plus-currency forms. Within one pattern every match is
//! scanned and the first with a positive parsed value wins.

use std::sync::OnceLock;

use regex::Regex;

fn patterns() -> &'static [Regex] {
    static TABLE: OnceLock<Vec<Regex>> = OnceLock::new();
    TABLE.get_or_init(|| {
        vec![
            Regex::new(r"(?i)(?:합계|총액|결제금액|TOTAL)\s*[:：]?\s*([0-9][0-9,. ]*)")
                .expect("valid amount pattern"),
            Regex::new(r"([0-9][0-9,]*)\s*원").expect("valid amount pattern"),
            Regex::new(r"[₩\u{FFE6}]\s*([0-9][0-9,]*)").expect("valid amount pattern"),
        ]
    })
}

/// Parse a money string into an integer amount of won
///
/// Thousands separators, spaces, and currency markers are stripped first.
/// Anything left that is not purely numeric yields `None` rather than an
/// error.
pub fn to_int_money(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .replace("KRW", "")
        .chars()
        .filter(|c| !matches!(c, ',' | '.' | '원' | '₩' | '￦') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

/// Extract the total amount from raw receipt text
pub fn extract_amount(text: &str) -> Option<i64> {
    for pattern in patterns() {
        for caps in pattern.captures_iter(text) {
            if let Some(value) = to_int_money(&caps[1]) {
                if value > 0 {
                    return Some(value);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_anchored_total() {
        assert_eq!(extract_amount("합계: 12,345원"), Some(12345));
        assert_eq!(extract_amount("결제금액 4,500"), Some(4500));
        assert_eq!(extract_amount("TOTAL: 9,900"), Some(9900));
    }

    #[test]
    fn test_keyword_beats_generic_suffix() {
        // The item line appears first but 합계 is anchored by a
        // higher-priority pattern.
        let text = "아메리카노 4,500원\n합계 9,000원";
        assert_eq!(extract_amount(text), Some(9000));
    }

    #[test]
    fn test_generic_currency_suffix() {
        assert_eq!(extract_amount("금액 3,000원"), Some(3000));
    }

    #[test]
    fn test_currency_prefix() {
        assert_eq!(extract_amount("₩ 15,000"), Some(15000));
    }

    #[test]
    fn test_zero_amount_skipped() {
        // 0원 parses but is not positive, so it never wins
        assert_eq!(extract_amount("할인 0원 합계 500원"), Some(500));
        assert_eq!(extract_amount("할인 0원 총 500원"), Some(500));
    }

    #[test]
    fn test_no_currency_like_number() {
        assert_eq!(extract_amount("오늘도 좋은 하루 되세요"), None);
        assert_eq!(extract_amount(""), None);
    }

    #[test]
    fn test_to_int_money_strips_markers() {
        assert_eq!(to_int_money("12,345원"), Some(12345));
        assert_eq!(to_int_money("₩ 1,000"), Some(1000));
        assert_eq!(to_int_money(" 4 500 "), Some(4500));
        assert_eq!(to_int_money("2,500KRW"), Some(2500));
    }

    #[test]
    fn test_to_int_money_rejects_residual_nondigits() {
        assert_eq!(to_int_money("12a45"), None);
        assert_eq!(to_int_money("만원"), None);
        assert_eq!(to_int_money(""), None);
    }
}
