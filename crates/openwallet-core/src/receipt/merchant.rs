//! Merchant name extraction
//!
//! Receipts print the store name near the top (or occasionally in the footer
//! block), surrounded by boilerplate. Detection runs three passes over the
//! candidate regions:
//!
//! 1. brand hints over the top lines — a known merchant substring returns
//!    that line verbatim, bypassing every other heuristic;
//! 2. the plausibility predicate over the top lines;
//! 3. the same predicate over the bottom lines.

use std::sync::OnceLock;

use regex::Regex;

/// How many lines from each end of the receipt are scanned
const SCAN_LINES: usize = 10;

/// Known merchant-name substrings, matched case-insensitively
const BRAND_HINTS: &[&str] = &[
    "스타벅스",
    "이디야",
    "투썸플레이스",
    "메가커피",
    "빽다방",
    "스타카페",
    "이마트",
    "홈플러스",
    "롯데마트",
    "하이퍼마트",
    "하나로마트",
    "gs25",
    "cu",
    "세븐일레븐",
    "올리브영",
    "다이소",
    "맥도날드",
    "버거킹",
    "롯데리아",
    "서브웨이",
];

/// Receipt boilerplate tokens that disqualify a line as a merchant name
const DENYLIST: &[&str] = &[
    "영수증",
    "합계",
    "총액",
    "결제금액",
    "부가세",
    "과세",
    "면세",
    "신용카드",
    "카드번호",
    "현금",
    "거스름",
    "승인번호",
    "사업자",
    "대표자",
    "전화",
    "tel",
    "pos",
    "주문번호",
    "감사합니다",
];

fn time_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // H:MM or H시MM at the start of the line
    RE.get_or_init(|| Regex::new(r"^\d{1,2}[:시]\d{2}").expect("valid time pattern"))
}

/// Whether a line plausibly holds a merchant name
fn is_plausible_merchant(line: &str) -> bool {
    if time_prefix().is_match(line) {
        return false;
    }

    let lowered = line.to_lowercase();
    if DENYLIST.iter().any(|token| lowered.contains(token)) {
        return false;
    }

    // Reject lines of pure digits/punctuation, and require at least two
    // alphanumeric/Hangul characters of substance.
    let alnum: Vec<char> = line.chars().filter(|c| c.is_alphanumeric()).collect();
    if alnum.len() < 2 {
        return false;
    }
    alnum.iter().any(|c| !c.is_ascii_digit())
}

/// Extract the merchant name from normalized receipt lines
pub fn extract_merchant(lines: &[String]) -> Option<String> {
    let top = &lines[..lines.len().min(SCAN_LINES)];

    // Brand hints win outright, even over an earlier plausible line
    for line in top {
        let lowered = line.to_lowercase();
        if BRAND_HINTS.iter().any(|hint| lowered.contains(hint)) {
            return Some(line.clone());
        }
    }

    for line in top {
        if is_plausible_merchant(line) {
            return Some(line.clone());
        }
    }

    // Some receipts print the store block in the footer
    let bottom_start = lines.len().saturating_sub(SCAN_LINES);
    for line in &lines[bottom_start..] {
        if is_plausible_merchant(line) {
            return Some(line.clone());
        }
    }

    None
}
