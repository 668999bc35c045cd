//! Keyword-frequency category suggestion
//!
//! The category table is an ordered list, not a map: ties in keyword-match
//! count are broken by declaration order, so the result is reproducible.
//! The trailing zero-keyword catch-all can never score above zero and
//! therefore never wins; a best score of zero yields `None`.

use crate::models::ReceiptItem;

/// Ordered (category, keywords) table. Keywords are matched as
/// case-insensitive substrings of the combined search text.
const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    (
        "카페/간식",
        &[
            "카페",
            "커피",
            "아메리카노",
            "라떼",
            "베이커리",
            "디저트",
            "케이크",
            "도넛",
            "음료",
        ],
    ),
    (
        "식비",
        &[
            "마트",
            "식당",
            "김밥",
            "분식",
            "치킨",
            "피자",
            "버거",
            "편의점",
            "정육",
            "식료품",
            "반찬",
        ],
    ),
    (
        "교통",
        &["택시", "버스", "지하철", "주유", "충전", "주차", "톨게이트"],
    ),
    (
        "쇼핑",
        &["백화점", "의류", "패션", "신발", "가방", "잡화", "몰"],
    ),
    (
        "의료/건강",
        &["약국", "병원", "의원", "한의원", "헬스", "필라테스"],
    ),
    (
        "구독/디지털",
        &["구독", "멤버십", "ott", "클라우드", "앱스토어"],
    ),
    ("기타", &[]),
];

/// Suggest a spending category from the extracted receipt fields
///
/// Returns `None` when no keyword matches anywhere — there is no default
/// category.
pub fn suggest_category(
    merchant: Option<&str>,
    items: &[ReceiptItem],
    memo: Option<&str>,
) -> Option<String> {
    let mut haystack = String::new();
    if let Some(m) = merchant {
        haystack.push_str(m);
        haystack.push(' ');
    }
    for item in items {
        haystack.push_str(&item.name);
        haystack.push(' ');
    }
    if let Some(m) = memo {
        haystack.push_str(m);
    }
    let haystack = haystack.to_lowercase();

    let mut best: Option<(&str, usize)> = None;
    for (category, keywords) in CATEGORY_TABLE {
        let score = keywords
            .iter()
            .filter(|kw| haystack.contains(&kw.to_lowercase()))
            .count();
        // Strictly greater keeps the first-declared winner on ties
        if score > best.map(|(_, s)| s).unwrap_or(0) {
            best = Some((category, score));
        }
    }

    best.map(|(category, _)| category.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> ReceiptItem {
        ReceiptItem {
            name: name.to_string(),
            qty: 1,
            price: 1000,
        }
    }

    #[test]
    fn test_cafe_from_merchant_and_items() {
        let items = vec![item("아메리카노"), item("치즈케이크")];
        assert_eq!(
            suggest_category(Some("스타카페 강남점"), &items, None),
            Some("카페/간식".to_string())
        );
    }

    #[test]
    fn test_memo_contributes() {
        assert_eq!(
            suggest_category(None, &[], Some("야근 택시비")),
            Some("교통".to_string())
        );
    }

    #[test]
    fn test_tie_broken_by_declaration_order() {
        // One 카페/간식 keyword (커피) and one 식비 keyword (편의점):
        // the earlier-declared category wins the tie.
        assert_eq!(
            suggest_category(Some("편의점 커피"), &[], None),
            Some("카페/간식".to_string())
        );
    }

    #[test]
    fn test_no_match_is_unknown_not_catch_all() {
        assert_eq!(suggest_category(Some("ㅇㅇ상사"), &[], None), None);
        assert_eq!(suggest_category(None, &[], None), None);
    }

    #[test]
    fn test_deterministic() {
        let items = vec![item("김밥")];
        let first = suggest_category(Some("분식집"), &items, None);
        for _ in 0..3 {
            assert_eq!(suggest_category(Some("분식집"), &items, None), first);
        }
    }
}
