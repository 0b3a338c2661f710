//! In-memory storage for tests and database-free local runs

use async_trait::async_trait;
use chrono::Utc;
use common::error::DatabaseResult;
use std::{cmp::Reverse, collections::HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RecipeStore, UNKNOWN_AUTHOR, UserStore};
use crate::models::{
    ExternalIdentity, NewRecipe, Recipe, RecipeAuthor, RecipeListItem, RecipeQuery, User,
};

/// Recipe and user store kept in process memory.
///
/// Recipes are held in insertion order so that recipes created within the
/// same clock tick still list newest first.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    recipes: RwLock<Vec<Recipe>>,
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for InMemoryStore {
    async fn create(&self, recipe: &NewRecipe) -> DatabaseResult<Recipe> {
        let now = Utc::now();
        let recipe = Recipe {
            id: Uuid::new_v4(),
            user_id: recipe.user_id,
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            total_time: recipe.total_time,
            servings: recipe.servings,
            difficulty: recipe.difficulty,
            cuisine: recipe.cuisine.clone(),
            calories: recipe.calories,
            tags: recipe.tags.clone(),
            image_url: recipe.image_url.clone(),
            is_generated: recipe.is_generated,
            created_at: now,
            updated_at: now,
        };

        self.recipes.write().await.push(recipe.clone());
        Ok(recipe)
    }

    async fn get_by_id(&self, id: Uuid) -> DatabaseResult<Option<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, recipe: &Recipe) -> DatabaseResult<Option<Recipe>> {
        let mut recipes = self.recipes.write().await;

        match recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(stored) => {
                let created_at = stored.created_at;
                let user_id = stored.user_id;
                *stored = Recipe {
                    user_id,
                    created_at,
                    updated_at: Utc::now(),
                    ..recipe.clone()
                };
                Ok(Some(stored.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut recipes = self.recipes.write().await;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        Ok(recipes.len() < before)
    }

    async fn list(&self, query: &RecipeQuery) -> DatabaseResult<Vec<RecipeListItem>> {
        let recipes = self.recipes.read().await;
        let users = self.users.read().await;

        let mut matching: Vec<&Recipe> = recipes
            .iter()
            .rev()
            .filter(|r| query.user_id.is_none_or(|id| r.user_id == id))
            .filter(|r| {
                query
                    .tag
                    .as_ref()
                    .is_none_or(|tag| r.tags.iter().any(|t| t == tag))
            })
            .collect();

        // Stable sort keeps later insertions first among equal timestamps
        matching.sort_by_key(|r| Reverse(r.created_at));

        Ok(matching
            .into_iter()
            .map(|recipe| RecipeListItem {
                user: RecipeAuthor {
                    id: recipe.user_id,
                    name: users
                        .get(&recipe.user_id)
                        .map(|u| u.name.clone())
                        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
                },
                recipe: recipe.clone(),
            })
            .collect())
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        Ok(true)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn ensure_user(&self, identity: &ExternalIdentity) -> DatabaseResult<User> {
        let mut users = self.users.write().await;

        let user = users.entry(identity.user_id()).or_insert_with(|| {
            let now = Utc::now();
            User {
                id: identity.user_id(),
                external_id: identity.subject.clone(),
                name: identity.name.clone(),
                email: identity.email.clone(),
                created_at: now,
                updated_at: now,
            }
        });

        Ok(user.clone())
    }
}
