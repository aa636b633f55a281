//! Persistence operations over the shared SQLite pool.
//!
//! Every function takes the pool by reference and returns a
//! [`StoreError`](crate::error::StoreError) so the HTTP layer can tell
//! validation failures, missing rows and storage faults apart.

pub mod mood_recipes;
pub mod recipe_books;
pub mod recipes;
