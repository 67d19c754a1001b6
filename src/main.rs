mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod service;
mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, service::MovieService, store::MovieStore};

#[derive(Clone)]
pub struct AppState {
    pub service: MovieService,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", get(routes::list))
        .route("/movies/create", post(routes::create))
        .route(
            "/movies/{id}",
            get(routes::find_by_id)
                .put(routes::update)
                .patch(routes::update_partial)
                .delete(routes::delete),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,moviehouse=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let service = MovieService::new(MovieStore::new(db));

    let state = Arc::new(AppState { service });

    let app = router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
