//! Line item extraction

use std::sync::OnceLock;

use regex::Regex;

use super::amount::to_int_money;
use crate::models::ReceiptItem;

fn item_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // <name> <qty>[unit] <price>[currency suffix]
    RE.get_or_init(|| {
        Regex::new(r"^(.+?)\s+(\d{1,3})\s*개?\s+([0-9][0-9,]*)\s*원?$")
            .expect("valid item pattern")
    })
}

/// Extract purchased items from normalized receipt lines
///
/// Lines that do not match the fixed item shape are skipped silently; a
/// receipt with no item lines simply yields an empty vec.
pub fn extract_items(lines: &[String]) -> Vec<ReceiptItem> {
    let mut items = Vec::new();

    for line in lines {
        let Some(caps) = item_line().captures(line) else {
            continue;
        };
        let Ok(qty) = caps[2].parse::<i64>() else {
            continue;
        };
        let Some(price) = to_int_money(&caps[3]) else {
            continue;
        };
        items.push(ReceiptItem {
            name: caps[1].trim().to_string(),
            qty,
            price,
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_item_line_with_unit_and_currency() {
        let items = extract_items(&lines(&["아메리카노 2개 4500원"]));
        assert_eq!(
            items,
            vec![ReceiptItem {
                name: "아메리카노".to_string(),
                qty: 2,
                price: 4500,
            }]
        );
    }

    #[test]
    fn test_item_line_bare_numbers() {
        let items = extract_items(&lines(&["카페라떼 1 5,000"]));
        assert_eq!(items[0].name, "카페라떼");
        assert_eq!(items[0].qty, 1);
        assert_eq!(items[0].price, 5000);
    }

    #[test]
    fn test_missing_price_not_matched() {
        assert!(extract_items(&lines(&["아메리카노 2개"])).is_empty());
    }

    #[test]
    fn test_non_item_lines_skipped() {
        let items = extract_items(&lines(&[
            "스타카페 강남점",
            "아메리카노 2개 4500원",
            "합계 4,500원",
            "감사합니다",
        ]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "아메리카노");
    }

    #[test]
    fn test_multi_word_name_trimmed() {
        let items = extract_items(&lines(&["수제 버거 세트 1개 8,900원"]));
        assert_eq!(items[0].name, "수제 버거 세트");
        assert_eq!(items[0].price, 8900);
    }
}
