use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Seeded suggestion shown by the mood picker. Ingredients and instructions
/// are display text, not structured children.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodRecipe {
    pub id: i64,
    pub name: String,
    pub mood: String,
    pub description: Option<String>,
    pub ingredients: String,
    pub instructions: String,
    pub cooking_time: Option<String>,
    pub difficulty: Option<String>,
}
