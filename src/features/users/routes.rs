use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::users::handlers::user_handler;
use crate::features::users::services::UserService;

/// Protected user directory routes (auth middleware applied by the caller)
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/users", get(user_handler::list_users))
        .with_state(service)
}
