use sqlx::SqlitePool;

use crate::error::{Entity, StoreError};
use crate::models::{
    non_blank, timestamp, NewRecipeBook, Recipe, RecipeBook, RecipeBookDetail, RecipeBookSummary,
    RecipeBookUpdate,
};

/// All books with their recipe counts, newest first.
pub async fn list(db: &SqlitePool) -> Result<Vec<RecipeBookSummary>, StoreError> {
    let books: Vec<RecipeBookSummary> = sqlx::query_as(
        r#"
        SELECT rb.*, COUNT(r.id) as recipe_count
        FROM recipe_books rb
        LEFT JOIN recipes r ON r.recipe_book_id = rb.id
        GROUP BY rb.id
        ORDER BY rb.created_at DESC, rb.rowid DESC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(books)
}

pub async fn find(db: &SqlitePool, id: &str) -> Result<RecipeBook, StoreError> {
    let book: Option<RecipeBook> = sqlx::query_as("SELECT * FROM recipe_books WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;

    book.ok_or_else(|| StoreError::not_found(Entity::RecipeBook, id))
}

/// A book and its recipes, newest first. Recipe children are not loaded.
pub async fn get(db: &SqlitePool, id: &str) -> Result<RecipeBookDetail, StoreError> {
    let book = find(db, id).await?;

    let recipes: Vec<Recipe> = sqlx::query_as(
        "SELECT * FROM recipes WHERE recipe_book_id = ? ORDER BY created_at DESC, rowid DESC",
    )
    .bind(id)
    .fetch_all(db)
    .await?;

    Ok(RecipeBookDetail { book, recipes })
}

pub async fn create(db: &SqlitePool, input: NewRecipeBook) -> Result<RecipeBook, StoreError> {
    let title = non_blank(input.title)
        .ok_or_else(|| StoreError::validation("title", "Title is required"))?;

    let book = RecipeBook::new(title, non_blank(input.cover_image));

    sqlx::query(
        "INSERT INTO recipe_books (id, title, cover_image, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&book.id)
    .bind(&book.title)
    .bind(&book.cover_image)
    .bind(&book.created_at)
    .bind(&book.updated_at)
    .execute(db)
    .await?;

    tracing::info!(recipe_book_id = %book.id, "created recipe book");
    Ok(book)
}

/// Partial update: a missing or blank field keeps its stored value.
pub async fn update(
    db: &SqlitePool,
    id: &str,
    input: RecipeBookUpdate,
) -> Result<RecipeBook, StoreError> {
    let mut book = find(db, id).await?;

    if let Some(title) = non_blank(input.title) {
        book.title = title;
    }
    if let Some(cover_image) = non_blank(input.cover_image) {
        book.cover_image = Some(cover_image);
    }
    book.updated_at = timestamp();

    sqlx::query("UPDATE recipe_books SET title = ?, cover_image = ?, updated_at = ? WHERE id = ?")
        .bind(&book.title)
        .bind(&book.cover_image)
        .bind(&book.updated_at)
        .bind(id)
        .execute(db)
        .await?;

    tracing::info!(recipe_book_id = %id, "updated recipe book");
    Ok(book)
}

/// Delete a book. Recipes, ingredients and instructions go with it through
/// the schema's cascading foreign keys.
pub async fn delete(db: &SqlitePool, id: &str) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM recipe_books WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(Entity::RecipeBook, id));
    }

    tracing::info!(recipe_book_id = %id, "deleted recipe book");
    Ok(())
}
