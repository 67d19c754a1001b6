use std::sync::Arc;

use axum::{
    Json,
    extract::{OriginalUri, Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

use crate::{
    AppState,
    error::AppResult,
    models::{Movie, MovieDraft},
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Json(draft): Json<MovieDraft>,
) -> AppResult<Response> {
    let movie = state.service.create(draft).await?;

    // Location mirrors the request URI with the trailing "/create" segment
    // swapped for the generated id.
    let location = uri.to_string().replace("/create", &format!("/{}", movie.id));

    let mut resp = StatusCode::CREATED.into_response();
    resp.headers_mut().insert(
        header::LOCATION,
        HeaderValue::from_str(&location).map_err(anyhow::Error::new)?,
    );
    Ok(resp)
}

pub async fn find_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Movie>> {
    Ok(Json(state.service.find_by_id(id).await?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    Ok(Json(state.service.get_all().await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(draft): Json<MovieDraft>,
) -> AppResult<Json<Movie>> {
    Ok(Json(state.service.update_full(id, draft).await?))
}

pub async fn update_partial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(updates): Json<Map<String, Value>>,
) -> AppResult<Json<Movie>> {
    Ok(Json(state.service.update_partial(id, updates).await?))
}
