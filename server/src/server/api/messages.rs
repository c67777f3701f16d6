//! Message catalog API.

use axum::extract::State;
use axum::Json;
use card_composer::message::PLACEHOLDER;
use serde::Serialize;

use crate::app::SharedState;

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub name: String,
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub placeholder: &'static str,
    /// Selection list in display order, placeholder first.
    pub options: Vec<String>,
    pub categories: Vec<CategoryView>,
}

/// GET /api/messages – Selectable messages grouped by category
pub async fn get_messages(State(state): State<SharedState>) -> Json<MessagesResponse> {
    let catalog = state.composer().catalog();
    let categories = catalog
        .categories()
        .iter()
        .map(|c| CategoryView {
            name: c.name.clone(),
            messages: c.entries.iter().map(|e| e.text.clone()).collect(),
        })
        .collect();

    Json(MessagesResponse {
        placeholder: PLACEHOLDER,
        options: catalog.options().into_iter().map(str::to_string).collect(),
        categories,
    })
}
