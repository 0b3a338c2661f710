//! Prompt construction for recipe generation

use crate::models::SuggestionRequest;

/// Closing block telling the model which JSON shape to answer with
const RESPONSE_FORMAT: &str = r#"
Return the response in the following JSON format:
{
  "title": "Recipe Title",
  "description": "Brief description of the dish",
  "ingredients": ["Ingredient 1 with quantity", "Ingredient 2 with quantity", ...],
  "instructions": ["Step 1", "Step 2", ...],
  "prepTime": preparation time in minutes (number),
  "cookTime": cooking time in minutes (number),
  "servings": number of servings (number),
  "difficulty": "Easy"/"Medium"/"Hard",
  "cuisine": "The cuisine type (e.g., Italian, Mexican, etc.)",
  "tags": ["tag1", "tag2", ...],
  "nutritionalInfo": {
    "calories": estimated calories per serving (number),
    "protein": grams of protein per serving (number),
    "carbs": grams of carbohydrates per serving (number),
    "fat": grams of fat per serving (number)
  }
}"#;

/// Render a suggestion request into the model prompt.
///
/// One line per present preference, always in the same order. Empty lists
/// and blank strings count as absent.
pub fn build_prompt(request: &SuggestionRequest) -> String {
    let mut prompt = format!(
        "Generate a detailed recipe using these ingredients: {}.\n",
        request.ingredients.join(", ")
    );

    if let Some(preferences) = &request.preferences {
        if let Some(minutes) = preferences.max_total_time {
            prompt.push_str(&format!(
                "The total cooking time should not exceed {} minutes.\n",
                minutes
            ));
        }

        if let Some(difficulty) = preferences.difficulty {
            prompt.push_str(&format!(
                "The recipe should be {} difficulty level.\n",
                difficulty.as_str().to_lowercase()
            ));
        }

        if let Some(restrictions) = preferences
            .dietary_restrictions
            .as_ref()
            .filter(|r| !r.is_empty())
        {
            prompt.push_str(&format!(
                "Follow these dietary restrictions: {}.\n",
                restrictions.join(", ")
            ));
        }

        if let Some(cuisine) = present(&preferences.cuisine) {
            prompt.push_str(&format!("The recipe should be {} cuisine.\n", cuisine));
        }

        if let Some(calories) = preferences.max_calories {
            prompt.push_str(&format!(
                "Each serving should not exceed {} calories.\n",
                calories
            ));
        }

        if let Some(servings) = preferences.servings {
            prompt.push_str(&format!("The recipe should serve {} people.\n", servings));
        }

        if let Some(meal_type) = present(&preferences.meal_type) {
            prompt.push_str(&format!("This should be a recipe for {}.\n", meal_type));
        }
    }

    prompt.push_str(RESPONSE_FORMAT);
    prompt
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
