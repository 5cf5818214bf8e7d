use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::ai_services::handlers::{self, AiServiceState};
use crate::features::ai_services::services::{AiServiceService, ServiceContentService};

/// Create routes for the AI services feature
pub fn routes(
    service_service: Arc<AiServiceService>,
    content_service: Arc<ServiceContentService>,
) -> Router {
    let state = AiServiceState {
        service_service,
        content_service,
    };

    Router::new()
        .route(
            "/api/ai-services",
            get(handlers::list_ai_services).post(handlers::create_ai_service),
        )
        .route(
            "/api/ai-services/{id}",
            get(handlers::get_ai_service)
                .put(handlers::update_ai_service)
                .delete(handlers::delete_ai_service),
        )
        .route(
            "/api/ai-services/{id}/contents",
            get(handlers::list_service_contents).post(handlers::create_service_content),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ai_services::dtos::CategoryAssignmentDto;
    use crate::shared::test_helpers::{lazy_pool, sample_upsert_dto};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app() -> Router {
        routes(
            Arc::new(AiServiceService::new(lazy_pool())),
            Arc::new(ServiceContentService::new(lazy_pool())),
        )
    }

    fn post_json(uri: &str, body: &impl serde::Serialize) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_with_two_main_categories_is_rejected() {
        let mut dto = sample_upsert_dto();
        dto.categories = vec![
            CategoryAssignmentDto {
                category_id: Uuid::new_v4(),
                is_main_category: true,
            },
            CategoryAssignmentDto {
                category_id: Uuid::new_v4(),
                is_main_category: true,
            },
        ];

        let response = app()
            .oneshot(post_json("/api/ai-services", &dto))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_with_invalid_nationality_is_rejected() {
        let mut dto = sample_upsert_dto();
        dto.nationality = "usa".to_string();

        let response = app()
            .oneshot(post_json("/api/ai-services", &dto))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_content_with_unknown_type_is_rejected() {
        let uri = format!("/api/ai-services/{}/contents", Uuid::new_v4());
        let body = serde_json::json!({
            "content_type": "pricing",
            "title": "Pricing",
            "body": "Free"
        });

        let response = app().oneshot(post_json(&uri, &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
