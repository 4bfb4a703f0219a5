//! Powder Compare Server Library
//!
//! Upload an initial reference image for a material batch, later upload
//! comparison images for the same batch, and read back a prediction score
//! per comparison. This module exports the core types and the router for
//! testing and reuse.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod predict;
pub mod routes;
pub mod security;
pub mod session;
pub mod storage;

pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use predict::{PlaceholderPredictor, Predictor};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
    pub predictor: Arc<dyn Predictor>,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    ///
    /// Uses the placeholder predictor; swap the field for a real model.
    pub fn new(db: Db, config: Config) -> Self {
        Self {
            db,
            config,
            predictor: Arc::new(PlaceholderPredictor),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    use routes::*;

    Router::new()
        .route("/", get(index_form).post(upload_initial))
        .route(
            "/upload_new/:initial_image_id",
            get(comparison_form).post(upload_comparison),
        )
        .route("/results/:initial_image_id", get(results))
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", get(logout))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(constants::MAX_UPLOAD_SIZE_BYTES))
        .with_state(state)
}
