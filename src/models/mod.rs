pub mod mood_recipe;
pub mod recipe;
pub mod recipe_book;

pub use mood_recipe::MoodRecipe;
pub use recipe::{
    Ingredient, InstructionStep, ListInput, NewIngredient, NewInstruction, NewRecipe, Recipe,
    RecipeDetail, RecipeUpdate,
};
pub use recipe_book::{NewRecipeBook, RecipeBook, RecipeBookDetail, RecipeBookSummary, RecipeBookUpdate};

use chrono::{SecondsFormat, Utc};

/// Current time as fixed-width RFC 3339, so stored timestamps sort as text.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Treat a missing or whitespace-only string as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
