//! API service routes

use axum::{
    Extension, Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::auth_middleware,
    models::{
        CreateRecipeRequest, Preferences, Recipe, RecipeQuery, SuggestionRequest,
        UpdateRecipeRequest, User,
    },
    state::AppState,
    validation::{
        clean_lines, validate_recipe_content, validate_recipe_numbers, validate_suggestion_request,
    },
};

const INGREDIENTS_REQUIRED: &str = "Ingredients are required and must be an array";

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/users/me", get(get_current_user))
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/generate", post(generate_recipe))
        .route(
            "/recipes/:id",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let healthy = state.recipes.health_check().await.unwrap_or_else(|e| {
        error!("Storage health check failed: {}", e);
        false
    });

    Json(json!({
        "status": "ok",
        "service": "recipe-api",
        "storage": {
            "backend": state.recipes.backend_name(),
            "healthy": healthy,
        }
    }))
}

/// The authenticated caller's user record
pub async fn get_current_user(Extension(user): Extension<User>) -> impl IntoResponse {
    Json(user)
}

/// List recipes, optionally filtered by owner and tag
pub async fn list_recipes(
    State(state): State<AppState>,
    query: Result<Query<RecipeQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(mut query) = query.map_err(|e| {
        warn!("Rejected recipe list query: {}", e);
        ApiError::BadRequest("Invalid query parameters".to_string())
    })?;
    query.tag = query.tag.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());

    let recipes = state.recipes.list(&query).await.map_err(|e| {
        error!("Failed to list recipes: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(recipes))
}

/// Create a recipe from user-supplied fields
pub async fn create_recipe(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let new_recipe = payload.into_new_recipe(user.id);
    validate_recipe_content(
        &new_recipe.title,
        &new_recipe.ingredients,
        &new_recipe.instructions,
    )
    .map_err(ApiError::BadRequest)?;
    validate_recipe_numbers(
        new_recipe.prep_time,
        new_recipe.cook_time,
        new_recipe.servings,
        new_recipe.calories,
    )
    .map_err(ApiError::BadRequest)?;

    let recipe = state.recipes.create(&new_recipe).await.map_err(|e| {
        error!("Failed to create recipe: {}", e);
        ApiError::InternalServerError
    })?;

    info!("Recipe {} created by user {}", recipe.id, user.id);
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Generate a recipe from ingredients and preferences, then store it
pub async fn generate_recipe(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = payload.map_err(|e| {
        warn!("Rejected suggestion request: {}", e.body_text());
        ApiError::BadRequest(e.body_text())
    })?;
    let mut request = suggestion_request(body)?;

    request.ingredients = clean_lines(request.ingredients);
    validate_suggestion_request(&request).map_err(ApiError::BadRequest)?;

    let response = state.generator.generate_and_save(user.id, &request).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Decode ingredients and preferences separately so each reports its own error
fn suggestion_request(mut body: Value) -> ApiResult<SuggestionRequest> {
    let ingredients: Vec<String> = body
        .get_mut("ingredients")
        .map(Value::take)
        .and_then(|v| serde_json::from_value(v).ok())
        .ok_or_else(|| ApiError::BadRequest(INGREDIENTS_REQUIRED.to_string()))?;

    let preferences = match body.get_mut("preferences").map(Value::take) {
        None | Some(Value::Null) => None,
        Some(value) => Some(serde_json::from_value::<Preferences>(value).map_err(|e| {
            warn!("Rejected suggestion preferences: {}", e);
            ApiError::BadRequest(format!("Invalid preferences: {}", e))
        })?),
    };

    Ok(SuggestionRequest {
        ingredients,
        preferences,
    })
}

/// Load a recipe and check that `user` owns it
async fn owned_recipe(
    state: &AppState,
    id: Uuid,
    user: &User,
    action: &str,
) -> ApiResult<Recipe> {
    let recipe = state
        .recipes
        .get_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get recipe: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

    if recipe.user_id != user.id {
        warn!("User {} tried to {} recipe {}", user.id, action, id);
        return Err(ApiError::Forbidden(format!(
            "You can only {} your own recipes",
            action
        )));
    }

    Ok(recipe)
}

/// Get one of the caller's recipes; other users' recipes are reported as missing
pub async fn get_recipe(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let recipe = state
        .recipes
        .get_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get recipe: {}", e);
            ApiError::InternalServerError
        })?
        .filter(|r| r.user_id == user.id)
        .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

    Ok(Json(recipe))
}

/// Partially update one of the caller's recipes
pub async fn update_recipe(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateRecipeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(update) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut recipe = owned_recipe(&state, id, &user, "edit").await?;
    update.apply(&mut recipe);

    validate_recipe_content(&recipe.title, &recipe.ingredients, &recipe.instructions)
        .map_err(ApiError::BadRequest)?;
    validate_recipe_numbers(
        recipe.prep_time,
        recipe.cook_time,
        recipe.servings,
        recipe.calories,
    )
    .map_err(ApiError::BadRequest)?;

    let updated = state
        .recipes
        .update(&recipe)
        .await
        .map_err(|e| {
            error!("Failed to update recipe: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

    info!("Recipe {} updated by user {}", id, user.id);
    Ok(Json(updated))
}

/// Delete one of the caller's recipes
pub async fn delete_recipe(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    owned_recipe(&state, id, &user, "delete").await?;

    let deleted = state.recipes.delete(id).await.map_err(|e| {
        error!("Failed to delete recipe: {}", e);
        ApiError::InternalServerError
    })?;

    if deleted {
        info!("Recipe {} deleted by user {}", id, user.id);
        Ok(Json(json!({"success": true})))
    } else {
        Err(ApiError::NotFound("Recipe not found".to_string()))
    }
}
