use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::{Entity, StoreError};
use crate::icon::{classify, Icon};
use crate::models::{
    non_blank, timestamp, Ingredient, InstructionStep, ListInput, NewIngredient, NewInstruction,
    NewRecipe, Recipe, RecipeDetail, RecipeUpdate,
};

/// Ingredient that passed validation and is ready to insert.
#[derive(Debug)]
struct PreparedIngredient {
    quantity: Option<String>,
    unit: Option<String>,
    ingredient_name: String,
}

/// Instruction with its step number resolved and icon derived.
#[derive(Debug)]
struct PreparedInstruction {
    step_number: i64,
    description: String,
    image: Option<String>,
    icon: Option<Icon>,
}

fn prepare_ingredients(
    input: ListInput,
) -> Result<Vec<PreparedIngredient>, StoreError> {
    input
        .resolve::<NewIngredient>("ingredients")?
        .into_iter()
        .enumerate()
        .map(|(i, ing)| {
            let ingredient_name = non_blank(ing.ingredient_name).ok_or_else(|| {
                StoreError::validation(
                    format!("ingredients[{i}].ingredient_name"),
                    "Ingredient name is required",
                )
            })?;
            Ok(PreparedIngredient {
                quantity: non_blank(ing.quantity),
                unit: non_blank(ing.unit),
                ingredient_name,
            })
        })
        .collect()
}

fn prepare_instructions(
    input: ListInput,
) -> Result<Vec<PreparedInstruction>, StoreError> {
    input
        .resolve::<NewInstruction>("instructions")?
        .into_iter()
        .enumerate()
        .map(|(i, inst)| {
            let description = non_blank(inst.description).ok_or_else(|| {
                StoreError::validation(
                    format!("instructions[{i}].description"),
                    "Instruction description is required",
                )
            })?;
            // Zero counts as "not given", matching how forms submit an empty field
            let step_number = match inst.step_number {
                Some(n) if n < 0 => {
                    return Err(StoreError::validation(
                        format!("instructions[{i}].step_number"),
                        "Step number must be positive",
                    ));
                }
                Some(n) if n > 0 => n,
                _ => i as i64 + 1,
            };
            Ok(PreparedInstruction {
                step_number,
                icon: classify(&description),
                description,
                image: non_blank(inst.image),
            })
        })
        .collect()
}

async fn insert_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    ingredients: &[PreparedIngredient],
) -> Result<(), sqlx::Error> {
    for (position, ing) in ingredients.iter().enumerate() {
        sqlx::query(
            "INSERT INTO ingredients (id, recipe_id, position, quantity, unit, ingredient_name) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(recipe_id)
        .bind(position as i64)
        .bind(&ing.quantity)
        .bind(&ing.unit)
        .bind(&ing.ingredient_name)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn insert_instructions(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    instructions: &[PreparedInstruction],
) -> Result<(), sqlx::Error> {
    for inst in instructions {
        sqlx::query(
            "INSERT INTO instructions (id, recipe_id, step_number, description, image, icon) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(recipe_id)
        .bind(inst.step_number)
        .bind(&inst.description)
        .bind(&inst.image)
        .bind(inst.icon)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

pub async fn find(db: &SqlitePool, id: &str) -> Result<Recipe, StoreError> {
    let recipe: Option<Recipe> = sqlx::query_as("SELECT * FROM recipes WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;

    recipe.ok_or_else(|| StoreError::not_found(Entity::Recipe, id))
}

/// Recipe with ingredients in insertion order and instructions in step order.
pub async fn get(db: &SqlitePool, id: &str) -> Result<RecipeDetail, StoreError> {
    let recipe = find(db, id).await?;

    let ingredients: Vec<Ingredient> = sqlx::query_as(
        r#"
        SELECT id, recipe_id, quantity, unit, ingredient_name
        FROM ingredients
        WHERE recipe_id = ?
        ORDER BY position, rowid
        "#,
    )
    .bind(id)
    .fetch_all(db)
    .await?;

    let instructions: Vec<InstructionStep> = sqlx::query_as(
        r#"
        SELECT id, recipe_id, step_number, description, image, icon
        FROM instructions
        WHERE recipe_id = ?
        ORDER BY step_number, rowid
        "#,
    )
    .bind(id)
    .fetch_all(db)
    .await?;

    Ok(RecipeDetail {
        recipe,
        ingredients,
        instructions,
    })
}

/// Create a recipe with its ingredients and instructions.
///
/// All input is validated before anything is written. The recipe row and its
/// children are inserted in one transaction, so a failed child insert leaves
/// no recipe behind.
pub async fn create(db: &SqlitePool, input: NewRecipe) -> Result<RecipeDetail, StoreError> {
    let recipe_book_id = non_blank(input.recipe_book_id)
        .ok_or_else(|| StoreError::validation("recipe_book_id", "recipe_book_id is required"))?;
    let title = non_blank(input.title)
        .ok_or_else(|| StoreError::validation("title", "Title is required"))?;

    let ingredients = match input.ingredients {
        Some(list) => prepare_ingredients(list)?,
        None => Vec::new(),
    };
    let instructions = match input.instructions {
        Some(list) => prepare_instructions(list)?,
        None => Vec::new(),
    };

    let mut tx = db.begin().await?;

    let book: Option<(String,)> = sqlx::query_as("SELECT id FROM recipe_books WHERE id = ?")
        .bind(&recipe_book_id)
        .fetch_optional(&mut *tx)
        .await?;
    if book.is_none() {
        return Err(StoreError::not_found(Entity::RecipeBook, recipe_book_id));
    }

    let id = Uuid::new_v4().to_string();
    let now = timestamp();

    sqlx::query(
        r#"
        INSERT INTO recipes (id, recipe_book_id, title, description, thumbnail_image, is_favorite, tags, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&recipe_book_id)
    .bind(&title)
    .bind(&input.description)
    .bind(non_blank(input.thumbnail_image))
    .bind(input.is_favorite.unwrap_or(false))
    .bind(non_blank(input.tags))
    .bind(&now)
    .bind(&now)
    .execute(&mut *tx)
    .await?;

    insert_ingredients(&mut *tx, &id, &ingredients).await?;
    insert_instructions(&mut *tx, &id, &instructions).await?;

    tx.commit().await?;

    tracing::info!(
        recipe_id = %id,
        recipe_book_id = %recipe_book_id,
        ingredients = ingredients.len(),
        instructions = instructions.len(),
        "created recipe"
    );

    get(db, &id).await
}

/// Update a recipe and optionally replace its child collections.
///
/// `title` and `thumbnail_image` keep their stored values when missing or
/// blank; `is_favorite` and `tags` only when missing. `description` is always
/// overwritten, so leaving it out clears it.
///
/// A supplied `ingredients` list replaces every stored ingredient; a missing
/// list (or blank text) leaves them alone. Instructions follow the same rule
/// independently.
pub async fn update(
    db: &SqlitePool,
    id: &str,
    input: RecipeUpdate,
) -> Result<RecipeDetail, StoreError> {
    let existing = find(db, id).await?;

    let ingredients = match input.ingredients {
        Some(list) if !list.is_blank() => Some(prepare_ingredients(list)?),
        _ => None,
    };
    let instructions = match input.instructions {
        Some(list) if !list.is_blank() => Some(prepare_instructions(list)?),
        _ => None,
    };

    let title = non_blank(input.title).unwrap_or(existing.title);
    let thumbnail_image = non_blank(input.thumbnail_image).or(existing.thumbnail_image);
    let is_favorite = input.is_favorite.unwrap_or(existing.is_favorite);
    let tags = input.tags.or(existing.tags);

    let mut tx = db.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE recipes
        SET title = ?, description = ?, thumbnail_image = ?, is_favorite = ?, tags = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&title)
    .bind(&input.description)
    .bind(&thumbnail_image)
    .bind(is_favorite)
    .bind(&tags)
    .bind(timestamp())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    // Deleted since the lookup above
    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(Entity::Recipe, id));
    }

    if let Some(ingredients) = &ingredients {
        sqlx::query("DELETE FROM ingredients WHERE recipe_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_ingredients(&mut *tx, id, ingredients).await?;
    }

    if let Some(instructions) = &instructions {
        sqlx::query("DELETE FROM instructions WHERE recipe_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_instructions(&mut *tx, id, instructions).await?;
    }

    tx.commit().await?;

    tracing::info!(
        recipe_id = %id,
        replaced_ingredients = ingredients.is_some(),
        replaced_instructions = instructions.is_some(),
        "updated recipe"
    );

    get(db, id).await
}

/// Delete a recipe; its ingredients and instructions cascade.
pub async fn delete(db: &SqlitePool, id: &str) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(Entity::Recipe, id));
    }

    tracing::info!(recipe_id = %id, "deleted recipe");
    Ok(())
}
