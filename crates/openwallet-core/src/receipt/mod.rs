//! Receipt text parsing pipeline
//!
//! Turns noisy OCR output into a structured [`OcrResult`]:
//! normalize → field extractors (date, amount, merchant, items) → category
//! suggestion. Every extractor is best-effort; a field that cannot be
//! recovered is simply `None`.

mod amount;
mod category;
mod date;
mod items;
mod merchant;
mod normalize;

pub use amount::{extract_amount, to_int_money};
pub use category::suggest_category;
pub use date::extract_date;
pub use items::extract_items;
pub use merchant::extract_merchant;
pub use normalize::normalize;

use crate::models::OcrResult;

/// Run the full extraction pipeline over raw OCR text
pub fn parse_receipt_text(text: &str, memo: Option<&str>) -> OcrResult {
    let lines = normalize(text);

    let merchant = extract_merchant(&lines);
    let amount = extract_amount(text);
    let date = extract_date(text);
    let items = extract_items(&lines);
    let suggested_category = suggest_category(merchant.as_deref(), &items, memo);

    OcrResult {
        merchant,
        amount,
        date,
        items,
        suggested_category,
        raw_text: Some(text.to_string()),
    }
}
