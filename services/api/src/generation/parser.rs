//! Parsing and validation of model responses
//!
//! Models wrap their JSON in prose or code fences, so the parser takes the
//! widest `{ ... }` span of the reply and decodes that. Numeric fields are
//! decoded leniently: a model that writes `"15"` or `14.6` for a minute count
//! still yields a recipe, while nonsense such as `"about an hour"` or a
//! negative count is dropped to null rather than failing the whole recipe.

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::OnceLock;

use super::GenerationError;
use crate::{
    models::{recipe::non_blank, Difficulty, GeneratedRecipe, NutritionalInfo},
    validation::{clean_lines, validate_recipe_content},
};

fn json_object_regex() -> &'static Regex {
    static JSON_OBJECT: OnceLock<Regex> = OnceLock::new();
    JSON_OBJECT.get_or_init(|| {
        Regex::new(r"(?s)\{.*\}").expect("Failed to compile JSON object regex")
    })
}

/// Recipe as the model wrote it, before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecipe {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    ingredients: Option<Vec<String>>,
    #[serde(default)]
    instructions: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_count")]
    prep_time: Option<i32>,
    #[serde(default, deserialize_with = "lenient_count")]
    cook_time: Option<i32>,
    #[serde(default, deserialize_with = "lenient_count")]
    servings: Option<i32>,
    #[serde(default, deserialize_with = "lenient_difficulty")]
    difficulty: Option<Difficulty>,
    #[serde(default)]
    cuisine: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    nutritional_info: Option<RawNutrition>,
}

#[derive(Debug, Deserialize)]
struct RawNutrition {
    #[serde(default, deserialize_with = "lenient_amount")]
    calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    protein: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    carbs: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    fat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    fiber: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    sugar: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    sodium: Option<f64>,
}

impl From<RawNutrition> for NutritionalInfo {
    fn from(raw: RawNutrition) -> Self {
        NutritionalInfo {
            calories: raw.calories,
            protein: raw.protein,
            carbs: raw.carbs,
            fat: raw.fat,
            fiber: raw.fiber,
            sugar: raw.sugar,
            sodium: raw.sodium,
        }
    }
}

/// Non-negative number from a JSON number or numeric string
fn amount(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    (number.is_finite() && number >= 0.0).then_some(number)
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount(&value))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount(&value)
        .map(f64::round)
        .filter(|n| *n <= i32::MAX as f64)
        .map(|n| n as i32))
}

fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|s| s.parse().ok()))
}

/// Extract, decode and validate a recipe from free-form model output
pub fn parse_recipe(response: &str) -> Result<GeneratedRecipe, GenerationError> {
    let json = json_object_regex()
        .find(response)
        .ok_or_else(|| GenerationError::Parse("no JSON object in model response".to_string()))?;

    let raw: RawRecipe = serde_json::from_str(json.as_str())
        .map_err(|e| GenerationError::Parse(e.to_string()))?;

    let title = raw.title.unwrap_or_default().trim().to_string();
    let ingredients = clean_lines(raw.ingredients.unwrap_or_default());
    let instructions = clean_lines(raw.instructions.unwrap_or_default());

    validate_recipe_content(&title, &ingredients, &instructions)
        .map_err(GenerationError::Validation)?;

    Ok(GeneratedRecipe {
        title,
        description: non_blank(raw.description),
        ingredients,
        instructions,
        prep_time: raw.prep_time,
        cook_time: raw.cook_time,
        servings: raw.servings,
        difficulty: raw.difficulty,
        cuisine: non_blank(raw.cuisine),
        tags: clean_lines(raw.tags.unwrap_or_default()),
        nutritional_info: raw.nutritional_info.map(NutritionalInfo::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "title": "Lemon Garlic Chicken",
        "description": "Bright and quick.",
        "ingredients": ["2 chicken breasts", "1 lemon", "3 cloves garlic"],
        "instructions": ["Marinate", "Sear", "Rest"],
        "prepTime": 10,
        "cookTime": 20,
        "servings": 2,
        "difficulty": "Medium",
        "cuisine": "Mediterranean",
        "tags": ["dinner", "quick"],
        "nutritionalInfo": {"calories": 380, "protein": 42, "carbs": 6, "fat": 18}
    }"#;

    #[test]
    fn test_parse_full_recipe() {
        let recipe = parse_recipe(FULL).unwrap();

        assert_eq!(recipe.title, "Lemon Garlic Chicken");
        assert_eq!(recipe.description.as_deref(), Some("Bright and quick."));
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.instructions, vec!["Marinate", "Sear", "Rest"]);
        assert_eq!(recipe.prep_time, Some(10));
        assert_eq!(recipe.cook_time, Some(20));
        assert_eq!(recipe.servings, Some(2));
        assert_eq!(recipe.difficulty, Some(Difficulty::Medium));
        assert_eq!(recipe.cuisine.as_deref(), Some("Mediterranean"));
        assert_eq!(recipe.tags, vec!["dinner", "quick"]);

        let nutrition = recipe.nutritional_info.unwrap();
        assert_eq!(nutrition.calories, Some(380.0));
        assert_eq!(nutrition.protein, Some(42.0));
        assert_eq!(nutrition.fiber, None);
    }

    #[test]
    fn test_parse_recipe_wrapped_in_prose_and_fences() {
        let response = format!("Here you go!\n```json\n{}\n```\nLet me know if you want changes.", FULL);
        let recipe = parse_recipe(&response).unwrap();
        assert_eq!(recipe.title, "Lemon Garlic Chicken");
    }

    #[test]
    fn test_parse_recipe_without_json() {
        let err = parse_recipe("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn test_parse_recipe_with_broken_json() {
        let err = parse_recipe(r#"{"title": "Soup", "ingredients": ["water",]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn test_parse_recipe_with_wrong_shape() {
        let err = parse_recipe(r#"{"title": "Soup", "ingredients": "water, salt"}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn test_missing_mandatory_fields_are_validation_errors() {
        let missing_title = r#"{"ingredients": ["rice"], "instructions": ["Boil"]}"#;
        let blank_title = r#"{"title": "  ", "ingredients": ["rice"], "instructions": ["Boil"]}"#;
        let missing_ingredients = r#"{"title": "Rice", "instructions": ["Boil"]}"#;
        let empty_instructions = r#"{"title": "Rice", "ingredients": ["rice"], "instructions": []}"#;
        let blank_instructions = r#"{"title": "Rice", "ingredients": ["rice"], "instructions": [" "]}"#;

        for response in [
            missing_title,
            blank_title,
            missing_ingredients,
            empty_instructions,
            blank_instructions,
        ] {
            let err = parse_recipe(response).unwrap_err();
            assert!(
                matches!(err, GenerationError::Validation(_)),
                "expected validation error for {}",
                response
            );
        }
    }

    #[test]
    fn test_long_titles_are_accepted() {
        for title in ["A".repeat(201), "é".repeat(101)] {
            let response = format!(
                r#"{{"title": "{}", "ingredients": ["rice"], "instructions": ["Boil"]}}"#,
                title
            );
            let recipe = parse_recipe(&response).unwrap();
            assert_eq!(recipe.title, title);
        }
    }

    #[test]
    fn test_lenient_numbers() {
        let recipe = parse_recipe(
            r#"{"title": "Rice", "ingredients": ["rice"], "instructions": ["Boil"],
                "prepTime": "15", "cookTime": 14.6, "servings": "a few",
                "nutritionalInfo": {"calories": "250", "protein": -3}}"#,
        )
        .unwrap();

        assert_eq!(recipe.prep_time, Some(15));
        assert_eq!(recipe.cook_time, Some(15));
        assert_eq!(recipe.servings, None);

        let nutrition = recipe.nutritional_info.unwrap();
        assert_eq!(nutrition.calories, Some(250.0));
        assert_eq!(nutrition.protein, None);
    }

    #[test]
    fn test_negative_minutes_become_null() {
        let recipe = parse_recipe(
            r#"{"title": "Rice", "ingredients": ["rice"], "instructions": ["Boil"], "prepTime": -5}"#,
        )
        .unwrap();
        assert_eq!(recipe.prep_time, None);
    }

    #[test]
    fn test_lenient_difficulty_and_nulls() {
        let recipe = parse_recipe(
            r#"{"title": "Rice", "ingredients": ["rice"], "instructions": ["Boil"],
                "difficulty": "EASY", "tags": null, "cuisine": "", "nutritionalInfo": null}"#,
        )
        .unwrap();
        assert_eq!(recipe.difficulty, Some(Difficulty::Easy));
        assert!(recipe.tags.is_empty());
        assert_eq!(recipe.cuisine, None);
        assert_eq!(recipe.nutritional_info, None);

        let recipe = parse_recipe(
            r#"{"title": "Rice", "ingredients": ["rice"], "instructions": ["Boil"], "difficulty": "Beginner"}"#,
        )
        .unwrap();
        assert_eq!(recipe.difficulty, None);
    }
}
