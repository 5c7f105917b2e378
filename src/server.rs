// src/server.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::handlers::{health, lines, stations};
use crate::middleware::RequestLogging;
use crate::repository::SubwayRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: SubwayRepository,
    pub logging: RequestLogging,
}

impl AppState {
    pub fn new(repository: SubwayRepository, logging: RequestLogging) -> Self {
        Self { repository, logging }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SubwayRepository::new(),
            RequestLogging::new(config.logging.error_policy()),
        )
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/stations",
            post(stations::create_station).get(stations::list_stations),
        )
        .route("/stations/:station_id", axum::routing::delete(stations::delete_station))
        .route("/lines", post(lines::create_line).get(lines::list_lines))
        .route(
            "/lines/:line_id",
            get(lines::get_line)
                .put(lines::update_line)
                .delete(lines::delete_line),
        )
        .route("/lines/:line_id/sections", post(lines::add_section))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
}
