use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::error::StoreError;
use crate::icon::Icon;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: String,
    pub recipe_book_id: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_image: Option<String>,
    pub is_favorite: bool,
    pub tags: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: String,
    pub recipe_id: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub ingredient_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InstructionStep {
    pub id: String,
    pub recipe_id: String,
    pub step_number: i64,
    pub description: String,
    pub image: Option<String>,
    pub icon: Option<Icon>,
}

/// Full recipe aggregate as returned by reads and writes.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<InstructionStep>,
}

/// A child collection as sent by callers: either a structured array or the
/// same array serialized as JSON text (multipart forms send the latter).
///
/// Elements stay as raw JSON until [`ListInput::resolve`], so a bad element
/// is reported against its own index whichever form it arrived in.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Items(Vec<Value>),
    Text(String),
    Other(Value),
}

impl ListInput {
    pub fn is_blank(&self) -> bool {
        matches!(self, ListInput::Text(text) if text.trim().is_empty())
    }

    /// Normalize to a sequence of `T`, rejecting input that is not an array
    /// and elements that do not decode.
    pub fn resolve<T: DeserializeOwned>(self, field: &str) -> Result<Vec<T>, StoreError> {
        let items = match self {
            ListInput::Items(items) => items,
            ListInput::Text(text) => serde_json::from_str::<Vec<Value>>(&text).map_err(|e| {
                StoreError::validation(field, format!("Invalid JSON format for {field}: {e}"))
            })?,
            ListInput::Other(_) => {
                return Err(StoreError::validation(
                    field,
                    format!("{field} must be an array"),
                ));
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item).map_err(|e| {
                    StoreError::validation(format!("{field}[{i}]"), format!("Invalid {field} entry: {e}"))
                })
            })
            .collect()
    }
}

impl<T: Serialize> From<Vec<T>> for ListInput {
    fn from(items: Vec<T>) -> Self {
        ListInput::Items(
            items
                .iter()
                .map(|item| serde_json::to_value(item).unwrap_or(Value::Null))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewIngredient {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub unit: Option<String>,
    #[serde(default)]
    pub ingredient_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewInstruction {
    #[serde(default)]
    pub step_number: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRecipe {
    pub recipe_book_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_favorite: Option<bool>,
    pub tags: Option<String>,
    pub ingredients: Option<ListInput>,
    pub instructions: Option<ListInput>,
}

/// Partial recipe update. `None` means "not supplied", except for
/// `description`, which is always written as given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_favorite: Option<bool>,
    pub tags: Option<String>,
    pub ingredients: Option<ListInput>,
    pub instructions: Option<ListInput>,
}

// Quantities arrive as "1/2" from forms but as bare numbers from JSON clients
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(TextOrNumber::Text(s)) => Some(s),
        Some(TextOrNumber::Int(i)) => Some(i.to_string()),
        Some(TextOrNumber::Float(f)) => Some(f.to_string()),
        None => None,
    })
}

// Checkbox values from multipart forms come through as strings
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagValue {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Option::<FlagValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FlagValue::Bool(b)) => Ok(Some(b)),
        Some(FlagValue::Int(i)) => Ok(Some(i != 0)),
        Some(FlagValue::Text(s)) => match s.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "true" | "on" | "1" | "yes" => Ok(Some(true)),
            "false" | "off" | "0" | "no" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value: {other}"
            ))),
        },
    }
}
