pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod icon;
pub mod models;
pub mod routes;
pub mod store;
pub mod uploads;

pub const STATIC_HASH: &str = env!("STATIC_HASH");

use axum::http::{header, HeaderValue};
use axum::{routing::get, Router};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower::ServiceBuilder;
use tower_http::{
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub upload_dir: PathBuf,
}

async fn health() -> &'static str {
    "ok"
}

/// Build the full Axum application router.
///
/// Caller is responsible for running database migrations on `pool` beforehand.
/// Uploaded files are written below `upload_dir` and served from `/uploads`.
pub fn build_app(pool: SqlitePool, upload_dir: PathBuf) -> Router {
    let state = AppState {
        db: pool,
        upload_dir: upload_dir.clone(),
    };

    Router::new()
        .route("/health", get(health))
        .merge(routes::pages::router())
        .merge(routes::recipe_books::router())
        .merge(routes::recipes::router())
        .merge(routes::moods::router())
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=86400"),
                ))
                .service(ServeDir::new("static")),
        )
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
