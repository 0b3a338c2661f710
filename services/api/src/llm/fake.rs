//! Fake model provider for tests and offline development.
//!
//! Responses are matched by checking whether the prompt contains a registered
//! substring. The most recent prompts are recorded so tests can inspect them.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{LlmError, LlmProvider};

/// Canned recipe returned by [`FakeProvider::with_sample_recipe`]
pub const SAMPLE_RECIPE_RESPONSE: &str = r#"Here is a recipe you can make with what you have:
```json
{
  "title": "One-Pan Chicken and Rice",
  "description": "Juicy chicken thighs baked over fluffy seasoned rice.",
  "ingredients": ["2 chicken thighs", "1 cup long-grain rice", "2 cups chicken stock", "1 tsp paprika"],
  "instructions": ["Season the chicken with paprika.", "Brown the chicken in an oven-safe pan.", "Add rice and stock, cover and bake for 25 minutes."],
  "prepTime": 10,
  "cookTime": 35,
  "servings": 2,
  "difficulty": "Easy",
  "cuisine": "American",
  "tags": ["dinner", "one-pan"],
  "nutritionalInfo": {"calories": 520, "protein": 34, "carbs": 58, "fat": 14}
}
```
Enjoy!"#;

/// Number of prompts kept by [`FakeProvider::prompts`]
pub const PROMPT_LOG_CAPACITY: usize = 64;

/// A fake model provider.
#[derive(Debug, Default)]
pub struct FakeProvider {
    /// Prompt substring -> response, checked in insertion order
    responses: Vec<(String, Result<String, String>)>,
    /// Response when no pattern matches
    default_response: Option<String>,
    /// Latest prompts received, oldest first
    prompts: Mutex<VecDeque<String>>,
}

impl FakeProvider {
    /// Create a provider with no registered responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that answers every prompt with the same text
    pub fn always(response: &str) -> Self {
        Self::new().with_default_response(response)
    }

    /// Provider that answers every prompt with [`SAMPLE_RECIPE_RESPONSE`]
    pub fn with_sample_recipe() -> Self {
        Self::always(SAMPLE_RECIPE_RESPONSE)
    }

    /// Answer prompts containing `prompt_contains` (case-insensitive) with `response`
    pub fn with_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses
            .push((prompt_contains.to_lowercase(), Ok(response.to_string())));
        self
    }

    /// Fail prompts containing `prompt_contains` with a request error
    pub fn with_failure(mut self, prompt_contains: &str, message: &str) -> Self {
        self.responses
            .push((prompt_contains.to_lowercase(), Err(message.to_string())));
        self
    }

    /// Set the response used when no pattern matches
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Prompts received so far, capped at [`PROMPT_LOG_CAPACITY`]
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.iter().cloned().collect()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        {
            let mut prompts = self.prompts.lock().await;
            if prompts.len() == PROMPT_LOG_CAPACITY {
                prompts.pop_front();
            }
            prompts.push_back(prompt.to_string());
        }

        let prompt_lower = prompt.to_lowercase();
        let matched = self
            .responses
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()));

        match matched {
            Some((_, Ok(response))) => Ok(response.clone()),
            Some((_, Err(message))) => Err(LlmError::RequestFailed(message.clone())),
            None => self.default_response.clone().ok_or_else(|| {
                LlmError::RequestFailed(format!(
                    "FakeProvider: no response configured for prompt: {}",
                    prompt.chars().take(100).collect::<String>()
                ))
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
