use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Kind of row a lookup failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    RecipeBook,
    Recipe,
    MoodRecipe,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::RecipeBook => write!(f, "Recipe book"),
            Entity::Recipe => write!(f, "Recipe"),
            Entity::MoodRecipe => write!(f, "Mood recipe"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{reason}")]
    Validation { field: String, reason: String },

    #[error("{entity} not found")]
    NotFound { entity: Entity, id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl StoreError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid request body: {0}")]
    Payload(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Upload error: {0}")]
    Upload(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Store(StoreError::Validation { field, reason }) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": reason, "field": field })),
            )
                .into_response(),
            AppError::Store(e @ StoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() }))).into_response()
            }
            AppError::Store(StoreError::Storage(e)) => {
                tracing::error!("Database error: {e}");
                internal_error()
            }
            AppError::Payload(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                internal_error()
            }
            AppError::Upload(e) => {
                tracing::error!("Upload error: {e}");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
