//! API models for request and response payloads

pub mod recipe;
pub mod suggestion;
pub mod user;

pub use recipe::{
    CreateRecipeRequest, Difficulty, NewRecipe, Recipe, RecipeAuthor, RecipeListItem, RecipeQuery,
    UpdateRecipeRequest,
};
pub use suggestion::{
    GeneratedRecipe, GeneratedRecipeResponse, NutritionalInfo, Preferences, SuggestionRequest,
};
pub use user::{ExternalIdentity, User};
