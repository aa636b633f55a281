use sqlx::SqlitePool;

use crate::error::{Entity, StoreError};
use crate::models::MoodRecipe;

/// Pick a random recipe for `mood`, optionally skipping the one just shown.
pub async fn random(
    db: &SqlitePool,
    mood: &str,
    exclude: Option<i64>,
) -> Result<MoodRecipe, StoreError> {
    let mood = mood.trim().to_lowercase();

    let recipe: Option<MoodRecipe> = match exclude {
        Some(exclude_id) => {
            sqlx::query_as(
                "SELECT * FROM mood_recipes WHERE mood = ? AND id != ? ORDER BY RANDOM() LIMIT 1",
            )
            .bind(&mood)
            .bind(exclude_id)
            .fetch_optional(db)
            .await?
        }
        None => {
            sqlx::query_as("SELECT * FROM mood_recipes WHERE mood = ? ORDER BY RANDOM() LIMIT 1")
                .bind(&mood)
                .fetch_optional(db)
                .await?
        }
    };

    recipe.ok_or_else(|| StoreError::not_found(Entity::MoodRecipe, mood))
}

/// Distinct moods that have at least one recipe, alphabetically.
pub async fn moods(db: &SqlitePool) -> Result<Vec<String>, StoreError> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT DISTINCT mood FROM mood_recipes ORDER BY mood")
        .fetch_all(db)
        .await?;

    Ok(rows.into_iter().map(|(mood,)| mood).collect())
}
