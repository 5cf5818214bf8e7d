use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let service = Arc::new(CategoryService::new(lazy_pool()));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_create_with_empty_name_is_rejected() {
        let response = server()
            .post("/api/categories")
            .json(&json!({ "name": "" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn test_create_with_wrong_field_type_is_bad_request() {
        let response = server()
            .post("/api/categories")
            .json(&json!({ "name": 42 }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON data"));
    }

    #[tokio::test]
    async fn test_update_with_self_as_parent_is_rejected() {
        let id = uuid::Uuid::new_v4();
        let response = server()
            .put(&format!("/api/categories/{}", id))
            .json(&json!({ "name": "Chatbots", "parent_id": id }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "A category cannot be its own parent");
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected() {
        let response = server().get("/api/categories/not-a-uuid").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}
