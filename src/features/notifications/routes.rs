use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::notifications::handlers::notification_handler;
use crate::features::notifications::services::NotificationService;

/// Protected notification routes (auth middleware applied by the caller)
pub fn routes(service: Arc<NotificationService>) -> Router {
    Router::new()
        .route(
            "/api/notifications",
            get(notification_handler::list_notifications),
        )
        .route(
            "/api/notifications/read-all",
            patch(notification_handler::mark_all_read),
        )
        .route(
            "/api/notifications/{id}/read",
            patch(notification_handler::mark_read),
        )
        .with_state(service)
}
