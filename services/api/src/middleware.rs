//! Authentication middleware for bearer token validation

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use tracing::{error, warn};

use crate::{error::ApiError, state::AppState};

/// Authentication middleware.
///
/// Verifies the bearer token, makes sure the caller has a user record and
/// inserts that [`crate::models::User`] into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(ApiError::Unauthorized)?;

    let identity = state.jwt.verify(bearer.token()).map_err(|e| {
        warn!("Failed to validate token: {}", e);
        ApiError::Unauthorized
    })?;

    let user = state.users.ensure_user(&identity).await.map_err(|e| {
        error!("Failed to ensure user {}: {}", identity.subject, e);
        ApiError::InternalServerError
    })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
