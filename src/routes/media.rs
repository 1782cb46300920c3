use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

async fn get_media(
    State(state): State<AppState>,
    Path((uid, object)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let stored = state
        .backend
        .objects
        .get_object(&format!("{uid}/{object}"))
        .await?;
    Ok(([(header::CONTENT_TYPE, stored.content_type)], stored.bytes))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/media/:uid/:object", get(get_media))
}
