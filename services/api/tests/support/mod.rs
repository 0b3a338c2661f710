//! Shared helpers for the HTTP integration tests.
//!
//! Every app built here runs on the in-memory store and the fake model
//! provider, with tokens signed by the RSA key pair in `tests/fixtures/`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

use recipe_api::auth::{JwtConfig, JwtVerifier};
use recipe_api::llm::FakeProvider;
use recipe_api::repositories::{InMemoryStore, RecipeStore, UserStore};
use recipe_api::{AppState, create_router};

const PRIVATE_KEY: &str = include_str!("../fixtures/jwt_private.pem");
const PUBLIC_KEY: &str = include_str!("../fixtures/jwt_public.pem");

/// Router plus handles on its collaborators for assertions
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub llm: Arc<FakeProvider>,
}

fn verifier() -> JwtVerifier {
    JwtVerifier::new(&JwtConfig {
        public_key: PUBLIC_KEY.to_string(),
        issuer: None,
    })
    .expect("fixture public key is valid")
}

/// Build the app on a fresh in-memory store
pub fn build_test_app(llm: FakeProvider) -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let llm = Arc::new(llm);

    let state = AppState::new(store.clone(), store.clone(), llm.clone(), verifier());

    TestApp {
        router: create_router(state),
        store,
        llm,
    }
}

/// Build the app on arbitrary stores
pub fn build_app_with_stores(
    recipes: Arc<dyn RecipeStore>,
    users: Arc<dyn UserStore>,
    llm: FakeProvider,
) -> Router {
    create_router(AppState::new(recipes, users, Arc::new(llm), verifier()))
}

/// Sign a token for `subject` valid for an hour
pub fn token_for(subject: &str, name: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let claims = json!({
        "sub": subject,
        "name": name,
        "email": format!("{}@example.com", subject),
        "iat": now,
        "exp": now + 3600,
    });

    let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key).unwrap()
}

/// Send one request through the router
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

/// Send a raw JSON string body
pub async fn send_raw(router: &Router, method: Method, uri: &str, token: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

/// Collect a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Minimal valid manual recipe payload
pub fn recipe_payload(title: &str, tags: &[&str]) -> Value {
    json!({
        "title": title,
        "ingredients": ["2 cups rice", "1 egg"],
        "instructions": ["Cook the rice", "Fry with the egg"],
        "prepTime": 5,
        "cookTime": 10,
        "difficulty": "Easy",
        "tags": tags,
    })
}
