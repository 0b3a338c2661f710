//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    auth::JwtVerifier,
    generation::RecipeGenerator,
    llm::LlmProvider,
    repositories::{RecipeStore, UserStore},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub recipes: Arc<dyn RecipeStore>,
    pub users: Arc<dyn UserStore>,
    pub generator: RecipeGenerator,
    pub jwt: JwtVerifier,
}

impl AppState {
    pub fn new(
        recipes: Arc<dyn RecipeStore>,
        users: Arc<dyn UserStore>,
        llm: Arc<dyn LlmProvider>,
        jwt: JwtVerifier,
    ) -> Self {
        let generator = RecipeGenerator::new(llm, recipes.clone());
        Self {
            recipes,
            users,
            generator,
            jwt,
        }
    }
}
