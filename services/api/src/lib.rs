//! Recipe API service
//!
//! HTTP service for storing recipes and generating new ones from a list of
//! ingredients with a generative model.

pub mod auth;
pub mod config;
pub mod error;
pub mod generation;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;
