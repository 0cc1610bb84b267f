use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::RecipeRepository;
use crate::database::models::{Recipe, RecipeFields};
use crate::error::AppResult;

/// `recipes` collection on postgres.
#[derive(Clone)]
pub struct PgRecipeRepository {
    pool: PgPool,
}

impl PgRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn insert(&self, recipe: &Recipe) -> AppResult<String> {
        sqlx::query(
            r#"
            INSERT INTO recipes (id, name, tags, ingredients, instructions, published_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&recipe.id)
        .bind(&recipe.name)
        .bind(&recipe.tags)
        .bind(&recipe.ingredients)
        .bind(&recipe.instructions)
        .bind(recipe.published_at)
        .execute(&self.pool)
        .await?;

        Ok(recipe.id.clone())
    }

    async fn find_all(&self) -> AppResult<Vec<Recipe>> {
        let recipes = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, tags, ingredients, instructions, published_at
            FROM recipes
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(recipes)
    }

    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Recipe>> {
        let recipes = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, tags, ingredients, instructions, published_at
            FROM recipes
            WHERE $1 = ANY(tags)
            "#,
        )
        .bind(tag)
        .fetch_all(&self.pool)
        .await?;

        Ok(recipes)
    }

    async fn update(&self, id: &str, fields: &RecipeFields) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE recipes
            SET name = $1, tags = $2, ingredients = $3, instructions = $4
            WHERE id = $5
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.tags)
        .bind(&fields.ingredients)
        .bind(&fields.instructions)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
