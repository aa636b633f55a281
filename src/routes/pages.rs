use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::error::AppError;
use crate::models::{RecipeBookDetail, RecipeBookSummary, RecipeDetail};
use crate::store::{recipe_books, recipes};
use crate::AppState;

#[derive(Template)]
#[template(path = "recipe_books/list.html")]
struct RecipeBookListTemplate {
    books: Vec<RecipeBookSummary>,
    static_hash: &'static str,
}

#[derive(Template)]
#[template(path = "recipe_books/show.html")]
struct RecipeBookShowTemplate {
    detail: RecipeBookDetail,
    static_hash: &'static str,
}

#[derive(Template)]
#[template(path = "recipes/show.html")]
struct RecipeShowTemplate {
    detail: RecipeDetail,
    static_hash: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recipe_book_list))
        .route("/recipe-books/{id}", get(recipe_book_page))
        .route("/recipes/{id}", get(recipe_page))
}

async fn recipe_book_list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let template = RecipeBookListTemplate {
        books: recipe_books::list(&state.db).await?,
        static_hash: crate::STATIC_HASH,
    };
    Ok(Html(template.render()?))
}

async fn recipe_book_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let template = RecipeBookShowTemplate {
        detail: recipe_books::get(&state.db, &id).await?,
        static_hash: crate::STATIC_HASH,
    };
    Ok(Html(template.render()?))
}

async fn recipe_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let template = RecipeShowTemplate {
        detail: recipes::get(&state.db, &id).await?,
        static_hash: crate::STATIC_HASH,
    };
    Ok(Html(template.render()?))
}
