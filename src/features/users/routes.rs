use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Create routes for the users feature
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/users", post(handlers::create_user))
        .with_state(service)
}
