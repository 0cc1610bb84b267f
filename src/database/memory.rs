use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::{Recipe, RecipeFields, UserEntity};
use crate::database::{CredentialStore, RecipeRepository};
use crate::error::{AppError, AppResult};

/// Recipes held in process memory, iterated in insertion order.
#[derive(Default)]
pub struct MemoryRecipeRepository {
    recipes: RwLock<Vec<Recipe>>,
}

#[async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn insert(&self, recipe: &Recipe) -> AppResult<String> {
        self.recipes.write().await.push(recipe.clone());
        Ok(recipe.id.clone())
    }

    async fn find_all(&self) -> AppResult<Vec<Recipe>> {
        Ok(self.recipes.read().await.clone())
    }

    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes
            .iter()
            .filter(|recipe| recipe.tags.iter().any(|t| t == tag))
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, fields: &RecipeFields) -> AppResult<u64> {
        let mut recipes = self.recipes.write().await;
        match recipes.iter_mut().find(|recipe| recipe.id == id) {
            Some(recipe) => {
                recipe.name = fields.name.clone();
                recipe.tags = fields.tags.clone();
                recipe.ingredients = fields.ingredients.clone();
                recipe.instructions = fields.instructions.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &str) -> AppResult<u64> {
        let mut recipes = self.recipes.write().await;
        let before = recipes.len();
        recipes.retain(|recipe| recipe.id != id);
        Ok((before - recipes.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<String, UserEntity>>,
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserEntity>> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn insert_user(&self, username: &str, password_hash: &str) -> AppResult<String> {
        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(AppError::AlreadyExists(username.to_string()));
        }

        users.insert(
            username.to_string(),
            UserEntity {
                username: username.to_string(),
                password: password_hash.to_string(),
            },
        );
        Ok(username.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn recipe(id: &str, name: &str, tags: &[&str]) -> Recipe {
        RecipeFields {
            name: name.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ingredients: vec![],
            instructions: vec![],
        }
        .into_recipe(id.into(), Utc::now())
    }

    #[tokio::test]
    async fn tag_search_is_exact_not_substring() {
        let repo = MemoryRecipeRepository::default();
        repo.insert(&recipe("1", "Pancakes", &["breakfast"])).await.unwrap();
        repo.insert(&recipe("2", "Brunch bowl", &["breakfast-ish"])).await.unwrap();

        let found = repo.find_by_tag("breakfast").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
        assert!(repo.find_by_tag("break").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_id_and_published_at() {
        let repo = MemoryRecipeRepository::default();
        let original = recipe("1", "Toast", &["breakfast"]);
        repo.insert(&original).await.unwrap();

        let fields = RecipeFields {
            name: "French toast".into(),
            tags: vec!["brunch".into()],
            ingredients: vec!["bread".into(), "egg".into()],
            instructions: vec!["soak".into(), "fry".into()],
        };
        assert_eq!(repo.update("1", &fields).await.unwrap(), 1);

        let stored = repo.find_all().await.unwrap().remove(0);
        assert_eq!(stored.id, "1");
        assert_eq!(stored.published_at, original.published_at);
        assert_eq!(stored.name, "French toast");
        assert_eq!(stored.ingredients, vec!["bread", "egg"]);
    }

    #[tokio::test]
    async fn missing_id_is_a_silent_no_op() {
        let repo = MemoryRecipeRepository::default();
        repo.insert(&recipe("1", "Toast", &[])).await.unwrap();

        let fields = RecipeFields {
            name: "Ghost".into(),
            tags: vec![],
            ingredients: vec![],
            instructions: vec![],
        };
        assert_eq!(repo.update("nope", &fields).await.unwrap(), 0);
        assert_eq!(repo.delete("nope").await.unwrap(), 0);
        assert_eq!(repo.delete("1").await.unwrap(), 1);
        assert_eq!(repo.delete("1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryCredentialStore::default();
        store.insert_user("admin", "hash").await.unwrap();

        let err = store.insert_user("admin", "other").await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(name) if name == "admin"));
        assert!(store.insert_user("ADMIN", "hash").await.is_ok());
    }
}
