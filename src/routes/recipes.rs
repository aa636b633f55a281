use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::error::AppError;
use crate::models::{NewRecipe, RecipeUpdate};
use crate::routes::payload::Payload;
use crate::store::recipes;
use crate::uploads;
use crate::AppState;

const UPLOAD_CATEGORY: &str = "recipes";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/recipes", post(create_recipe))
        .route("/api/recipes/{id}", get(show_recipe))
        .route("/api/recipes/{id}", put(update_recipe))
        .route("/api/recipes/{id}", delete(delete_recipe))
}

async fn show_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = recipes::get(&state.db, &id).await?;
    Ok(Json(detail))
}

async fn create_recipe(
    State(state): State<AppState>,
    Payload { mut data, upload }: Payload<NewRecipe>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(upload) = upload {
        data.thumbnail_image = Some(uploads::store(&state.upload_dir, UPLOAD_CATEGORY, &upload).await?);
    }

    let detail = recipes::create(&state.db, data).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload { mut data, upload }: Payload<RecipeUpdate>,
) -> Result<impl IntoResponse, AppError> {
    recipes::find(&state.db, &id).await?;

    if let Some(upload) = upload {
        data.thumbnail_image = Some(uploads::store(&state.upload_dir, UPLOAD_CATEGORY, &upload).await?);
    }

    let detail = recipes::update(&state.db, &id, data).await?;
    Ok(Json(detail))
}

async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    recipes::delete(&state.db, &id).await?;
    Ok(Json(json!({ "message": "Recipe deleted successfully" })))
}
