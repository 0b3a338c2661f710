//! Recipe models and the rules for deriving stored fields

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::validation::clean_lines;

/// Recipe difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Get the difficulty as it is stored and serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

/// Stored recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<String>,
    pub calories: Option<f64>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub is_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Recipe insert payload; id and timestamps are assigned by storage
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<String>,
    pub calories: Option<f64>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub is_generated: bool,
}

/// Total time is only known when both parts are known.
///
/// A recipe with only a cook time has no total time; it is not the cook time.
pub fn total_time(prep_time: Option<i32>, cook_time: Option<i32>) -> Option<i32> {
    match (prep_time, cook_time) {
        (Some(prep), Some(cook)) => prep.checked_add(cook),
        _ => None,
    }
}

/// Request for manual recipe creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<String>,
    pub calories: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_generated: bool,
}

impl CreateRecipeRequest {
    /// Normalize the request into an insert payload owned by `user_id`
    pub fn into_new_recipe(self, user_id: Uuid) -> NewRecipe {
        NewRecipe {
            user_id,
            title: self.title.trim().to_string(),
            description: self.description.unwrap_or_default(),
            ingredients: clean_lines(self.ingredients),
            instructions: clean_lines(self.instructions),
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            total_time: total_time(self.prep_time, self.cook_time),
            servings: self.servings,
            difficulty: self.difficulty,
            cuisine: non_blank(self.cuisine),
            calories: self.calories,
            tags: clean_lines(self.tags),
            image_url: non_blank(self.image_url),
            is_generated: self.is_generated,
        }
    }
}

/// Partial recipe update.
///
/// Nullable columns use `Option<Option<_>>`: an absent field leaves the value
/// alone, an explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub prep_time: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub cook_time: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub servings: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub difficulty: Option<Option<Difficulty>>,
    #[serde(default, deserialize_with = "nullable")]
    pub cuisine: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub calories: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub is_generated: Option<bool>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateRecipeRequest {
    /// Merge the update into an existing recipe and recompute derived fields
    pub fn apply(self, recipe: &mut Recipe) {
        if let Some(title) = self.title {
            recipe.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            recipe.description = description;
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = clean_lines(ingredients);
        }
        if let Some(instructions) = self.instructions {
            recipe.instructions = clean_lines(instructions);
        }
        if let Some(prep_time) = self.prep_time {
            recipe.prep_time = prep_time;
        }
        if let Some(cook_time) = self.cook_time {
            recipe.cook_time = cook_time;
        }
        if let Some(servings) = self.servings {
            recipe.servings = servings;
        }
        if let Some(difficulty) = self.difficulty {
            recipe.difficulty = difficulty;
        }
        if let Some(cuisine) = self.cuisine {
            recipe.cuisine = non_blank(cuisine);
        }
        if let Some(calories) = self.calories {
            recipe.calories = calories;
        }
        if let Some(image_url) = self.image_url {
            recipe.image_url = non_blank(image_url);
        }
        if let Some(tags) = self.tags {
            recipe.tags = clean_lines(tags);
        }
        if let Some(is_generated) = self.is_generated {
            recipe.is_generated = is_generated;
        }

        recipe.total_time = total_time(recipe.prep_time, recipe.cook_time);
    }
}

/// Treat empty or whitespace-only strings as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Author summary attached to listed recipes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeAuthor {
    pub id: Uuid,
    pub name: String,
}

/// Recipe as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeListItem {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub user: RecipeAuthor,
}

/// Query parameters for recipe listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeQuery {
    /// Only recipes owned by this user
    pub user_id: Option<Uuid>,
    /// Only recipes carrying this tag
    pub tag: Option<String>,
}
