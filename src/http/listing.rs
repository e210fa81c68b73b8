//! Listing of registered target names.

use axum::{extract::State, Json};

use crate::http::server::AppState;

/// `GET /list`: current names, sorted.
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<String>> {
    let mut names = state.table.list_names();
    names.sort();
    Json(names)
}
