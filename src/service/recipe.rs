use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use uuid::Uuid;

use crate::cache::RecipeCache;
use crate::database::{Recipe, RecipeFields, RecipeRepository};
use crate::error::AppResult;

/// Recipe CRUD composed from the repository and the optional cache.
///
/// Every successful write drops the cached collection; list repopulates it
/// lazily. Tag search always goes to the repository.
#[derive(Clone)]
pub struct RecipeService {
    repository: Arc<dyn RecipeRepository>,
    cache: Option<Arc<dyn RecipeCache>>,
}

impl RecipeService {
    pub fn new(repository: Arc<dyn RecipeRepository>, cache: Option<Arc<dyn RecipeCache>>) -> Self {
        Self { repository, cache }
    }

    pub async fn create(&self, fields: RecipeFields) -> AppResult<Recipe> {
        fields.validate()?;

        // postgres keeps microseconds; truncate so the response matches later reads
        let recipe = fields.into_recipe(Uuid::new_v4().to_string(), Utc::now().trunc_subsecs(6));
        self.repository.insert(&recipe).await?;
        tracing::info!("Created recipe {}", recipe.id);

        self.invalidate().await?;
        Ok(recipe)
    }

    /// Order not guaranteed.
    pub async fn list(&self) -> AppResult<Vec<Recipe>> {
        let Some(cache) = &self.cache else {
            return self.repository.find_all().await;
        };

        if let Some(recipes) = cache.get().await? {
            tracing::debug!("Serving {} recipes from cache", recipes.len());
            return Ok(recipes);
        }

        tracing::debug!("Cache miss, loading recipes from store");
        let recipes = self.repository.find_all().await?;
        cache.put(&recipes).await?;
        Ok(recipes)
    }

    /// Returns whether a recipe matched. An unknown id is not an error and
    /// still invalidates the cache.
    pub async fn update(&self, id: &str, fields: RecipeFields) -> AppResult<bool> {
        fields.validate()?;

        let matched = self.repository.update(id, &fields).await?;
        if matched == 0 {
            tracing::debug!("Update matched no recipe with id {}", id);
        }

        self.invalidate().await?;
        Ok(matched > 0)
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let deleted = self.repository.delete(id).await?;
        if deleted == 0 {
            tracing::debug!("Delete matched no recipe with id {}", id);
        }

        self.invalidate().await?;
        Ok(deleted > 0)
    }

    pub async fn search(&self, tag: &str) -> AppResult<Vec<Recipe>> {
        self.repository.find_by_tag(tag).await
    }

    async fn invalidate(&self) -> AppResult<()> {
        if let Some(cache) = &self.cache {
            tracing::debug!("Removing recipe snapshot from cache");
            cache.invalidate().await?;
        }
        Ok(())
    }
}
