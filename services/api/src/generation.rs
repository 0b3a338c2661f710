//! AI recipe generation and persistence pipeline
//!
//! A suggestion request is rendered into a prompt, sent to the configured
//! model, and the reply is parsed and validated into a [`GeneratedRecipe`].
//! Only a valid recipe reaches storage. Failures before storage are
//! [`GenerationError`]s; a failed insert is a distinct
//! [`PipelineError::Persistence`] so callers can tell "the model produced
//! nothing usable" apart from "we could not save a good recipe".

pub mod adapter;
pub mod parser;
pub mod prompt;

use common::error::DatabaseError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    llm::{LlmError, LlmProvider},
    models::{GeneratedRecipe, GeneratedRecipeResponse, SuggestionRequest},
    repositories::RecipeStore,
};

/// The model did not produce a usable recipe
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The model call itself failed
    #[error("Model call failed: {0}")]
    Model(#[from] LlmError),

    /// No JSON object in the response, or the JSON does not have the recipe shape
    #[error("Failed to parse recipe from model response: {0}")]
    Parse(String),

    /// The recipe parsed but lacks a mandatory field
    #[error("Generated recipe is invalid: {0}")]
    Validation(String),
}

/// Failure of the full generate-and-save pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Failed to save generated recipe: {0}")]
    Persistence(#[source] DatabaseError),
}

/// Generates recipes with a model and stores them
#[derive(Clone)]
pub struct RecipeGenerator {
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn RecipeStore>,
}

impl RecipeGenerator {
    /// Create a new generator
    pub fn new(llm: Arc<dyn LlmProvider>, store: Arc<dyn RecipeStore>) -> Self {
        Self { llm, store }
    }

    /// Ask the model for a recipe and validate its answer.
    ///
    /// The request's ingredients must already have been validated.
    pub async fn generate(
        &self,
        request: &SuggestionRequest,
    ) -> Result<GeneratedRecipe, GenerationError> {
        let prompt = prompt::build_prompt(request);

        info!(
            "Requesting recipe from {} ({}) for {} ingredients",
            self.llm.provider_name(),
            self.llm.model_name(),
            request.ingredients.len()
        );

        let response = self.llm.complete(&prompt).await?;
        let recipe = parser::parse_recipe(&response)?;

        info!("Model produced recipe: {}", recipe.title);
        Ok(recipe)
    }

    /// Generate a recipe and store it for `user_id`.
    ///
    /// Exactly one insert happens, and only after validation succeeded.
    pub async fn generate_and_save(
        &self,
        user_id: Uuid,
        request: &SuggestionRequest,
    ) -> Result<GeneratedRecipeResponse, PipelineError> {
        let generated = self.generate(request).await.map_err(|e| {
            warn!("Recipe generation failed for user {}: {}", user_id, e);
            e
        })?;

        let new_recipe = adapter::to_new_recipe(&generated, user_id);

        let recipe = self.store.create(&new_recipe).await.map_err(|e| {
            error!("Failed to save generated recipe for user {}: {}", user_id, e);
            PipelineError::Persistence(e)
        })?;

        info!("Generated recipe saved: {}", recipe.id);

        Ok(GeneratedRecipeResponse {
            recipe,
            nutritional_info: generated.nutritional_info,
        })
    }
}
