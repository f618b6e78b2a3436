use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::statistics::handlers::statistics_handler;
use crate::features::statistics::services::StatisticsService;

/// Protected statistics routes (auth middleware applied by the caller)
pub fn routes(service: Arc<StatisticsService>) -> Router {
    Router::new()
        .route("/api/statistics", get(statistics_handler::get_statistics))
        .with_state(service)
}
