use sqlx::SqlitePool;
use std::fs;
use std::path::Path;

use crate::models::{NewRecipe, NewRecipeBook, RecipeBook};
use crate::store::{recipe_books, recipes};

/// Import a JSON array of recipes into an existing book.
///
/// Each element uses the same shape as the create-recipe API body; any
/// `recipe_book_id` in the file is ignored. Import stops at the first recipe
/// that fails validation, keeping the ones already created.
pub async fn import_recipes(
    pool: &SqlitePool,
    file_path: &Path,
    book_id: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    // Verify the book exists before reading anything
    let book = recipe_books::find(pool, book_id).await?;

    let content = fs::read_to_string(file_path)?;
    let entries: Vec<NewRecipe> = serde_json::from_str(&content)?;

    let mut imported = 0;
    for mut entry in entries {
        entry.recipe_book_id = Some(book.id.clone());
        recipes::create(pool, entry).await?;
        imported += 1;
    }

    println!("Imported {} recipes into \"{}\"", imported, book.title);
    Ok(imported)
}

pub async fn create_book(
    pool: &SqlitePool,
    title: &str,
) -> Result<RecipeBook, Box<dyn std::error::Error>> {
    let book = recipe_books::create(
        pool,
        NewRecipeBook {
            title: Some(title.to_string()),
            cover_image: None,
        },
    )
    .await?;

    println!("Created recipe book:");
    println!("  ID: {}", book.id);
    println!("  Title: {}", book.title);

    Ok(book)
}
