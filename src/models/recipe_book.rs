use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{timestamp, Recipe};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecipeBook {
    pub id: String,
    pub title: String,
    pub cover_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl RecipeBook {
    pub fn new(title: String, cover_image: Option<String>) -> Self {
        let now = timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            cover_image,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Book row joined with the number of recipes it owns.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeBookSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub book: RecipeBook,
    pub recipe_count: i64,
}

/// Book with its recipes. Recipes carry no ingredients or instructions here.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeBookDetail {
    #[serde(flatten)]
    pub book: RecipeBook,
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRecipeBook {
    pub title: Option<String>,
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeBookUpdate {
    pub title: Option<String>,
    pub cover_image: Option<String>,
}
