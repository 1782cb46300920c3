use std::fmt::Debug;
use std::fmt::Display;

use axum::response::Html;
use axum::{http::StatusCode, response::IntoResponse};

use crate::services::StoreError;

pub struct AppError {
    pub status: StatusCode,
    pub inner: anyhow::Error,
}

impl AppError {
    pub fn new(status: StatusCode, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            status,
            inner: inner.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!("sign in first"))
    }
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Html(format!("Something went wrong: {}", self.inner)),
        )
            .into_response()
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.inner, f)
    }
}

impl Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.inner, f)
    }
}

fn status_of(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(StoreError::PermissionDenied(_)) => StatusCode::FORBIDDEN,
        Some(StoreError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
        Some(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>` to turn them into
// `Result<_, AppError>`. That way you don't need to do that manually.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let inner = err.into();
        Self {
            status: status_of(&inner),
            inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        let err = AppError::from(StoreError::NotFound("posts/x".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let res = AppError::unauthorized().into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
