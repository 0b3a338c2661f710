//! Storage for recipes and users
//!
//! Handlers and the generation pipeline only see the [`RecipeStore`] and
//! [`UserStore`] traits. PostgreSQL backs them in production; the in-memory
//! store serves tests and local runs without a database.

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{ExternalIdentity, NewRecipe, Recipe, RecipeListItem, RecipeQuery, User};

pub mod memory;
pub mod recipe;
pub mod user;

pub use memory::InMemoryStore;
pub use recipe::RecipeRepository;
pub use user::UserRepository;

/// Durable recipe storage
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Insert a recipe; the id and timestamps are assigned by storage
    async fn create(&self, recipe: &NewRecipe) -> DatabaseResult<Recipe>;

    /// Get a recipe by ID
    async fn get_by_id(&self, id: Uuid) -> DatabaseResult<Option<Recipe>>;

    /// Overwrite the editable fields of an existing recipe.
    ///
    /// Returns `None` when the recipe no longer exists.
    async fn update(&self, recipe: &Recipe) -> DatabaseResult<Option<Recipe>>;

    /// Delete a recipe, returning whether it existed
    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;

    /// Recipes matching the query with their author, newest first
    async fn list(&self, query: &RecipeQuery) -> DatabaseResult<Vec<RecipeListItem>>;

    /// Whether the backend is reachable
    async fn health_check(&self) -> DatabaseResult<bool>;

    /// Backend name reported by the health endpoint
    fn backend_name(&self) -> &'static str;
}

/// Durable user storage
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Return the user for an identity, creating it on first sight.
    ///
    /// Idempotent: every call for the same subject yields the same record.
    async fn ensure_user(&self, identity: &ExternalIdentity) -> DatabaseResult<User>;
}

/// Author name used when a recipe's owner has no user record
pub(crate) const UNKNOWN_AUTHOR: &str = "Unknown";
