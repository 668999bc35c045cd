//! Purchase date extraction
//!
//! An ordered table of (pattern, handler) pairs evaluated in priority order.
//! Earlier patterns win even when a later pattern would also match, so a full
//! date always beats a month/day-only match. Handlers validate ranges and
//! decline instead of erroring, letting the scan continue.

use std::sync::OnceLock;

use regex::Regex;

type Handler = fn(&regex::Captures) -> Option<String>;

struct DatePattern {
    regex: Regex,
    handler: Handler,
}

/// Full date with `.`/`-`/`/` separators or Korean unit words: 2025.11.03,
/// 2025-11-03, 2025년 11월 3일
fn full_date(caps: &regex::Captures) -> Option<String> {
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    format_ymd(year, month, day)
}

/// Two-digit-year variant: 25.11.03. Two-digit years are assumed 2000s.
fn short_year_date(caps: &regex::Captures) -> Option<String> {
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    format_ymd(2000 + year, month, day)
}

/// Month/day only: 11/03, 11월 3일. Yields a year-less "MM-DD".
fn month_day(caps: &regex::Captures) -> Option<String> {
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(format!("{:02}-{:02}", month, day))
}

fn format_ymd(year: i32, month: u32, day: u32) -> Option<String> {
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(format!("{:04}-{:02}-{:02}", year, month, day))
}

fn patterns() -> &'static [DatePattern] {
    static TABLE: OnceLock<Vec<DatePattern>> = OnceLock::new();
    TABLE.get_or_init(|| {
        vec![
            DatePattern {
                regex: Regex::new(r"(20\d{2})\s*[.\-/년]\s*(\d{1,2})\s*[.\-/월]\s*(\d{1,2})\s*일?")
                    .expect("valid date pattern"),
                handler: full_date,
            },
            DatePattern {
                regex: Regex::new(r"\b(\d{2})\s*[.\-/]\s*(\d{1,2})\s*[.\-/]\s*(\d{1,2})\b")
                    .expect("valid date pattern"),
                handler: short_year_date,
            },
            DatePattern {
                regex: Regex::new(r"\b(\d{1,2})\s*[/.월]\s*(\d{1,2})\s*일?")
                    .expect("valid date pattern"),
                handler: month_day,
            },
        ]
    })
}

/// Extract a purchase date from raw receipt text
///
/// Returns `None` when nothing date-like is found.
pub fn extract_date(text: &str) -> Option<String> {
    for pattern in patterns() {
        for caps in pattern.regex.captures_iter(text) {
            if let Some(date) = (pattern.handler)(&caps) {
                return Some(date);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_date_with_dots() {
        assert_eq!(
            extract_date("2025.11.03 14:22 승인"),
            Some("2025-11-03".to_string())
        );
    }

    #[test]
    fn test_full_date_korean_units() {
        assert_eq!(
            extract_date("2025년 11월 3일"),
            Some("2025-11-03".to_string())
        );
    }

    #[test]
    fn test_two_digit_year_assumed_2000s() {
        assert_eq!(extract_date("25-11-03"), Some("2025-11-03".to_string()));
    }

    #[test]
    fn test_month_day_only() {
        assert_eq!(extract_date("영수증 11/03"), Some("11-03".to_string()));
        assert_eq!(extract_date("11월 3일"), Some("11-03".to_string()));
    }

    #[test]
    fn test_full_date_beats_month_day() {
        // Both the full-date and month/day patterns match; the earlier
        // pattern must win.
        assert_eq!(
            extract_date("발행 11/03 구매일 2025-11-03"),
            Some("2025-11-03".to_string())
        );
    }

    #[test]
    fn test_invalid_month_declines() {
        // 13/40 is not a date; the handler declines and nothing else matches
        assert_eq!(extract_date("코드 13/40"), None);
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_date("합계 4,500원"), None);
    }
}
