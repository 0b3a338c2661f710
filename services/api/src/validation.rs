//! Input validation utilities

use crate::models::SuggestionRequest;

/// Trim every entry and drop the blank ones
pub fn clean_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Validate the fields every recipe must carry before it is stored
pub fn validate_recipe_content(
    title: &str,
    ingredients: &[String],
    instructions: &[String],
) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title is required".to_string());
    }

    if ingredients.iter().all(|i| i.trim().is_empty()) {
        return Err("At least one ingredient is required".to_string());
    }

    if instructions.iter().all(|i| i.trim().is_empty()) {
        return Err("At least one instruction is required".to_string());
    }

    Ok(())
}

/// Validate optional numeric recipe fields
pub fn validate_recipe_numbers(
    prep_time: Option<i32>,
    cook_time: Option<i32>,
    servings: Option<i32>,
    calories: Option<f64>,
) -> Result<(), String> {
    if prep_time.is_some_and(|t| t < 0) {
        return Err("Prep time cannot be negative".to_string());
    }

    if cook_time.is_some_and(|t| t < 0) {
        return Err("Cook time cannot be negative".to_string());
    }

    if servings.is_some_and(|s| s <= 0) {
        return Err("Servings must be a positive number".to_string());
    }

    if calories.is_some_and(|c| !c.is_finite() || c < 0.0) {
        return Err("Calories must be a non-negative number".to_string());
    }

    Ok(())
}

/// Validate a suggestion request after its ingredient list was cleaned
pub fn validate_suggestion_request(request: &SuggestionRequest) -> Result<(), String> {
    if request.ingredients.is_empty() {
        return Err("Ingredients are required and must be an array".to_string());
    }

    if let Some(preferences) = &request.preferences {
        let positive = [
            ("maxTotalTime", preferences.max_total_time),
            ("maxCalories", preferences.max_calories),
            ("servings", preferences.servings),
        ];

        for (field, value) in positive {
            if value.is_some_and(|v| v <= 0) {
                return Err(format!("{} must be a positive integer", field));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Preferences;

    fn request(ingredients: &[&str]) -> SuggestionRequest {
        SuggestionRequest {
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            preferences: None,
        }
    }

    #[test]
    fn test_clean_lines() {
        let lines = vec![" a ".to_string(), "".to_string(), "   ".to_string(), "b".to_string()];
        assert_eq!(clean_lines(lines), vec!["a", "b"]);
    }

    #[test]
    fn test_validate_recipe_content() {
        let items = vec!["x".to_string()];
        assert!(validate_recipe_content("Soup", &items, &items).is_ok());
        assert_eq!(
            validate_recipe_content("  ", &items, &items),
            Err("Title is required".to_string())
        );
        assert!(validate_recipe_content("Soup", &[], &items).is_err());
        assert!(validate_recipe_content("Soup", &items, &["  ".to_string()]).is_err());
        assert!(validate_recipe_content(&"é".repeat(250), &items, &items).is_ok());
    }

    #[test]
    fn test_validate_recipe_numbers() {
        assert!(validate_recipe_numbers(Some(0), Some(10), Some(2), Some(0.0)).is_ok());
        assert!(validate_recipe_numbers(None, None, None, None).is_ok());
        assert!(validate_recipe_numbers(Some(-1), None, None, None).is_err());
        assert!(validate_recipe_numbers(None, Some(-5), None, None).is_err());
        assert!(validate_recipe_numbers(None, None, Some(0), None).is_err());
        assert!(validate_recipe_numbers(None, None, None, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_validate_suggestion_request() {
        assert!(validate_suggestion_request(&request(&["chicken"])).is_ok());
        assert!(validate_suggestion_request(&request(&[])).is_err());

        let many: Vec<String> = (0..200).map(|i| format!("ingredient {}", i)).collect();
        let many = SuggestionRequest {
            ingredients: many,
            preferences: None,
        };
        assert!(validate_suggestion_request(&many).is_ok());
    }

    #[test]
    fn test_validate_suggestion_preferences_must_be_positive() {
        let mut req = request(&["rice"]);
        req.preferences = Some(Preferences {
            max_total_time: Some(0),
            ..Default::default()
        });
        assert_eq!(
            validate_suggestion_request(&req),
            Err("maxTotalTime must be a positive integer".to_string())
        );

        req.preferences = Some(Preferences {
            servings: Some(-2),
            ..Default::default()
        });
        assert_eq!(
            validate_suggestion_request(&req),
            Err("servings must be a positive integer".to_string())
        );

        req.preferences = Some(Preferences {
            max_total_time: Some(30),
            servings: Some(4),
            ..Default::default()
        });
        assert!(validate_suggestion_request(&req).is_ok());
    }
}
