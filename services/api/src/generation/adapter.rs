//! Mapping of generated recipes onto stored records

use uuid::Uuid;

use crate::models::{recipe::total_time, GeneratedRecipe, NewRecipe};

/// Build the insert payload for a validated generated recipe.
///
/// Only calories survive from the nutrition estimate; the rest is returned
/// to the caller but never stored.
pub fn to_new_recipe(generated: &GeneratedRecipe, user_id: Uuid) -> NewRecipe {
    NewRecipe {
        user_id,
        title: generated.title.clone(),
        description: generated.description.clone().unwrap_or_default(),
        ingredients: generated.ingredients.clone(),
        instructions: generated.instructions.clone(),
        prep_time: generated.prep_time,
        cook_time: generated.cook_time,
        total_time: total_time(generated.prep_time, generated.cook_time),
        servings: generated.servings,
        difficulty: generated.difficulty,
        cuisine: generated.cuisine.clone(),
        calories: generated
            .nutritional_info
            .as_ref()
            .and_then(|n| n.calories),
        tags: generated.tags.clone(),
        image_url: None,
        is_generated: true,
    }
}
