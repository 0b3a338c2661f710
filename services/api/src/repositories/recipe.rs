//! Recipe repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use super::{RecipeStore, UNKNOWN_AUTHOR};
use crate::models::{Difficulty, NewRecipe, Recipe, RecipeAuthor, RecipeListItem, RecipeQuery};

const RECIPE_COLUMNS: &str = r#"
    r.id, r.user_id, r.title, r.description, r.ingredients, r.instructions,
    r.prep_time, r.cook_time, r.total_time, r.servings, r.difficulty, r.cuisine,
    r.calories, r.tags, r.image_url, r.is_generated, r.created_at, r.updated_at
"#;

/// Recipe repository backed by PostgreSQL
#[derive(Clone)]
pub struct RecipeRepository {
    pool: PgPool,
}

impl RecipeRepository {
    /// Create a new recipe repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn recipe_from_row(row: &PgRow) -> DatabaseResult<Recipe> {
    let difficulty: Option<String> = row.try_get("difficulty")?;
    let difficulty = difficulty
        .map(|d| d.parse::<Difficulty>())
        .transpose()
        .map_err(DatabaseError::Corrupt)?;

    Ok(Recipe {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        ingredients: row.try_get("ingredients")?,
        instructions: row.try_get("instructions")?,
        prep_time: row.try_get("prep_time")?,
        cook_time: row.try_get("cook_time")?,
        total_time: row.try_get("total_time")?,
        servings: row.try_get("servings")?,
        difficulty,
        cuisine: row.try_get("cuisine")?,
        calories: row.try_get("calories")?,
        tags: row.try_get("tags")?,
        image_url: row.try_get("image_url")?,
        is_generated: row.try_get("is_generated")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl RecipeStore for RecipeRepository {
    async fn create(&self, recipe: &NewRecipe) -> DatabaseResult<Recipe> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO recipes AS r (
                id, user_id, title, description, ingredients, instructions,
                prep_time, cook_time, total_time, servings, difficulty, cuisine,
                calories, tags, image_url, is_generated
            )
            VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(recipe.user_id)
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(&recipe.ingredients)
        .bind(&recipe.instructions)
        .bind(recipe.prep_time)
        .bind(recipe.cook_time)
        .bind(recipe.total_time)
        .bind(recipe.servings)
        .bind(recipe.difficulty.map(|d| d.as_str()))
        .bind(&recipe.cuisine)
        .bind(recipe.calories)
        .bind(&recipe.tags)
        .bind(&recipe.image_url)
        .bind(recipe.is_generated)
        .fetch_one(&self.pool)
        .await?;

        recipe_from_row(&row)
    }

    async fn get_by_id(&self, id: Uuid) -> DatabaseResult<Option<Recipe>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {RECIPE_COLUMNS}
            FROM recipes r
            WHERE r.id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(recipe_from_row).transpose()
    }

    async fn update(&self, recipe: &Recipe) -> DatabaseResult<Option<Recipe>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE recipes AS r
            SET title = $2, description = $3, ingredients = $4, instructions = $5,
                prep_time = $6, cook_time = $7, total_time = $8, servings = $9,
                difficulty = $10, cuisine = $11, calories = $12, tags = $13,
                image_url = $14, is_generated = $15, updated_at = NOW()
            WHERE r.id = $1
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(recipe.id)
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(&recipe.ingredients)
        .bind(&recipe.instructions)
        .bind(recipe.prep_time)
        .bind(recipe.cook_time)
        .bind(recipe.total_time)
        .bind(recipe.servings)
        .bind(recipe.difficulty.map(|d| d.as_str()))
        .bind(&recipe.cuisine)
        .bind(recipe.calories)
        .bind(&recipe.tags)
        .bind(&recipe.image_url)
        .bind(recipe.is_generated)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(recipe_from_row).transpose()
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &RecipeQuery) -> DatabaseResult<Vec<RecipeListItem>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {RECIPE_COLUMNS}, u.name AS author_name
            FROM recipes r
            LEFT JOIN users u ON u.id = r.user_id
            WHERE ($1::uuid IS NULL OR r.user_id = $1)
              AND ($2::text IS NULL OR $2 = ANY(r.tags))
            ORDER BY r.created_at DESC
            "#
        ))
        .bind(query.user_id)
        .bind(&query.tag)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> DatabaseResult<RecipeListItem> {
                let recipe = recipe_from_row(row)?;
                let name: Option<String> = row.try_get("author_name")?;
                Ok(RecipeListItem {
                    user: RecipeAuthor {
                        id: recipe.user_id,
                        name: name.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
                    },
                    recipe,
                })
            })
            .collect()
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        common::database::health_check(&self.pool).await
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
