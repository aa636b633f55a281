use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::store::mood_recipes;
use crate::AppState;

#[derive(Deserialize)]
pub struct AnotherQuery {
    exclude: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/moods", get(list_moods))
        .route("/api/mood-recipes/{mood}", get(random_recipe))
        .route("/api/mood-recipes/{mood}/another", get(another_recipe))
}

async fn list_moods(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let moods = mood_recipes::moods(&state.db).await?;
    Ok(Json(moods))
}

async fn random_recipe(
    State(state): State<AppState>,
    Path(mood): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = mood_recipes::random(&state.db, &mood, None).await?;
    Ok(Json(recipe))
}

async fn another_recipe(
    State(state): State<AppState>,
    Path(mood): Path<String>,
    Query(query): Query<AnotherQuery>,
) -> Result<impl IntoResponse, AppError> {
    // An empty `exclude` behaves like no exclusion at all
    let exclude = query
        .exclude
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<i64>)
        .transpose()
        .map_err(|_| AppError::Payload("exclude must be a recipe id".to_string()))?;

    let recipe = mood_recipes::random(&state.db, &mood, exclude).await?;
    Ok(Json(recipe))
}
