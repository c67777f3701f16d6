//! Card composition API.

use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use card_composer::{CompositionError, CompositionRequest, CARD_FILE_NAME};
use serde_json::Value;

use crate::app::SharedState;

use super::err_json;

/// Response header carrying the display caption.
pub const CAPTION_HEADER: &str = "x-card-caption";

type ApiError = (StatusCode, Json<Value>);

/// POST /api/cards – Compose a card from an uploaded photo
///
/// Multipart fields: `photo` (required, image bytes), `message` (optional).
pub async fn create_card(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut photo: Option<Vec<u8>> = None;
    let mut message: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_err)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "photo" => {
                let data = field.bytes().await.map_err(multipart_err)?;
                photo = Some(data.to_vec());
            }
            "message" => {
                let text = field.text().await.map_err(multipart_err)?;
                message = Some(text);
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    let photo = photo
        .filter(|p| !p.is_empty())
        .ok_or_else(|| err_json(400, "No photo provided"))?;
    let request = CompositionRequest::new(photo, message.filter(|m| !m.is_empty()));

    let worker_state = state.clone();
    let result = tokio::task::spawn_blocking(move || worker_state.composer().compose(&request))
        .await
        .map_err(|e| err_json(500, &e.to_string()))?
        .map_err(|e| {
            tracing::warn!("Card composition failed: {e}");
            err_json(status_for(&e), &e.to_string())
        })?;

    Response::builder()
        .header(header::CONTENT_TYPE, "image/png")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{CARD_FILE_NAME}\""),
        )
        .header(CAPTION_HEADER, result.caption)
        .body(Body::from(result.png))
        .map_err(|e| err_json(500, &e.to_string()))
}

/// Oversized bodies come back as 413, malformed ones as 400.
fn multipart_err(e: MultipartError) -> ApiError {
    err_json(e.status().as_u16(), &e.body_text())
}

fn status_for(err: &CompositionError) -> u16 {
    match err {
        CompositionError::Decode(_) => 400,
        CompositionError::MissingTemplate { .. }
        | CompositionError::InvalidTemplate { .. }
        | CompositionError::Encode(_) => 500,
    }
}
