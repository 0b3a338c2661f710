//! Models for AI recipe suggestions

use serde::{Deserialize, Deserializer, Serialize};

use super::{Difficulty, Recipe};

/// Ingredients and preferences driving recipe generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

/// Optional generation preferences; every field can be omitted independently.
///
/// Numbers are signed so that non-positive values reach validation and are
/// reported by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Upper bound on total time, in minutes
    pub max_total_time: Option<i64>,
    #[serde(default, deserialize_with = "difficulty_from_str")]
    pub difficulty: Option<Difficulty>,
    pub dietary_restrictions: Option<Vec<String>>,
    pub cuisine: Option<String>,
    /// Calorie ceiling per serving
    pub max_calories: Option<i64>,
    pub servings: Option<i64>,
    /// Breakfast, lunch, dinner, snack...
    pub meal_type: Option<String>,
}

/// Difficulty through `FromStr`, so `"easy"` and `"Easy"` both match
fn difficulty_from_str<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| s.parse().map_err(serde::de::Error::custom))
        .transpose()
}

/// Nutrition estimate per serving, as reported by the model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    /// Grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    /// Grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    /// Milligrams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
}

/// Recipe parsed and validated from a model response, not yet stored.
///
/// Title, ingredients and instructions are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<String>,
    pub tags: Vec<String>,
    pub nutritional_info: Option<NutritionalInfo>,
}

/// Response envelope for a generated recipe.
///
/// Nutrition beyond calories is not stored, so it travels next to the record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipeResponse {
    pub recipe: Recipe,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
}
