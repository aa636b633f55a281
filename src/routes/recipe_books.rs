use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::error::AppError;
use crate::models::{NewRecipeBook, RecipeBookUpdate};
use crate::routes::payload::Payload;
use crate::store::recipe_books;
use crate::uploads;
use crate::AppState;

const UPLOAD_CATEGORY: &str = "recipe_books";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/recipe-books", get(list_recipe_books))
        .route("/api/recipe-books", post(create_recipe_book))
        .route("/api/recipe-books/{id}", get(show_recipe_book))
        .route("/api/recipe-books/{id}", put(update_recipe_book))
        .route("/api/recipe-books/{id}", delete(delete_recipe_book))
}

async fn list_recipe_books(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let books = recipe_books::list(&state.db).await?;
    Ok(Json(books))
}

async fn show_recipe_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = recipe_books::get(&state.db, &id).await?;
    Ok(Json(detail))
}

async fn create_recipe_book(
    State(state): State<AppState>,
    Payload { mut data, upload }: Payload<NewRecipeBook>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(upload) = upload {
        data.cover_image = Some(uploads::store(&state.upload_dir, UPLOAD_CATEGORY, &upload).await?);
    }

    let book = recipe_books::create(&state.db, data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_recipe_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload { mut data, upload }: Payload<RecipeBookUpdate>,
) -> Result<impl IntoResponse, AppError> {
    // Check existence first so a bad id does not leave an orphaned upload
    recipe_books::find(&state.db, &id).await?;

    if let Some(upload) = upload {
        data.cover_image = Some(uploads::store(&state.upload_dir, UPLOAD_CATEGORY, &upload).await?);
    }

    let book = recipe_books::update(&state.db, &id, data).await?;
    Ok(Json(book))
}

async fn delete_recipe_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    recipe_books::delete(&state.db, &id).await?;
    Ok(Json(json!({ "message": "Recipe book deleted successfully" })))
}
