//! Receipt OCR handler

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;

use crate::{AppError, AppState, MAX_UPLOAD_SIZE};
use openwallet_core::models::OcrResult;
use openwallet_core::receipt::parse_receipt_text;

/// POST /api/ocr-receipt - Upload a receipt image and extract its fields
///
/// Multipart form: `file` (the image, required) and `memo` (optional free
/// text that feeds category suggestion).
pub async fn ocr_receipt(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<OcrResult>, AppError> {
    let mut image: Option<Vec<u8>> = None;
    let mut memo: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::bad_request("Invalid multipart body"))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::payload_too_large("Image too large (max 8MB)"))?;
                image = Some(bytes.to_vec());
            }
            Some("memo") => {
                memo = field.text().await.ok().filter(|t| !t.trim().is_empty());
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| AppError::bad_request("Missing 'file' field"))?;
    if image.is_empty() {
        return Err(AppError::bad_request("Empty file"));
    }
    if image.len() > MAX_UPLOAD_SIZE {
        return Err(AppError::payload_too_large("Image too large (max 8MB)"));
    }

    let vision = state
        .vision
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable("Vision OCR backend not configured"))?;

    let text = vision.run_ocr(&image).await?;
    let result = parse_receipt_text(&text, memo.as_deref());

    info!(
        merchant = ?result.merchant,
        amount = ?result.amount,
        items = result.items.len(),
        "receipt parsed"
    );

    Ok(Json(result))
}
