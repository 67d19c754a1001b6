use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("movie not found with id: {0}")]
    NotFound(i64),
    #[error(transparent)]
    Store(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

// Structured error body returned for client-side failures.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub message: String,
    pub details: String,
    pub hint: String,
    pub next_actions: String,
    pub support: Option<String>,
}

impl ApiError {
    fn movie_not_found() -> Self {
        Self {
            message: "try again".to_string(),
            details: "id is not correct".to_string(),
            hint: "check the id".to_string(),
            next_actions: "send request with correct data".to_string(),
            support: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // A missing record is reported as a client input error, not 404.
            AppError::NotFound(id) => {
                tracing::debug!(id, "movie lookup missed");
                (StatusCode::BAD_REQUEST, Json(ApiError::movie_not_found())).into_response()
            }
            AppError::Store(err) => {
                tracing::error!(%err, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
            AppError::Internal(err) => {
                tracing::error!(%err, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
