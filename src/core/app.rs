use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{AppConfig, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::ai_services::{self, AiServiceService, ServiceContentService};
use crate::features::categories::{self, CategoryService};
use crate::features::dashboard::{self, DashboardService};
use crate::features::users::{self, UserService};

/// Feature services shared by the HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub categories: Arc<CategoryService>,
    pub ai_services: Arc<AiServiceService>,
    pub service_contents: Arc<ServiceContentService>,
    pub dashboard: Arc<DashboardService>,
    pub users: Arc<UserService>,
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Full application router: API routes, Swagger UI, health check and the HTTP layers
pub fn build_router(services: AppServices, app: &AppConfig, swagger: &SwaggerConfig) -> Router {
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier {
        title: swagger.title.clone(),
        version: swagger.version.clone(),
        description: swagger.description.clone(),
    }
    .modify(&mut openapi);

    let api_routes = Router::new()
        .merge(categories::routes(services.categories))
        .merge(ai_services::routes(
            services.ai_services,
            services.service_contents,
        ))
        .merge(dashboard::routes(services.dashboard))
        .merge(users::routes(services.users));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(api_routes)
        .route("/health", get(health_check))
        .layer(RequestBodyLimitLayer::new(app.max_request_body_size))
        .layer(middleware::cors_layer(&app.cors_allowed_origins))
        // Echo the request id on responses
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Keeps a client-provided id, generates one otherwise
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{WebhookConfig, WebhookEnvironment};
    use crate::core::middleware::REQUEST_ID_HEADER;
    use crate::modules::webhook::WebhookNotifier;
    use crate::shared::test_helpers::lazy_pool;
    use axum_test::TestServer;
    use serde_json::Value;
    use std::time::Duration;

    fn server(max_request_body_size: usize) -> TestServer {
        let pool = lazy_pool();
        let notifier = WebhookNotifier::new(&WebhookConfig {
            environment: WebhookEnvironment::Test,
            test_url: None,
            production_url: None,
            token: String::new(),
            timeout: Duration::from_secs(10),
        })
        .unwrap();

        let services = AppServices {
            categories: Arc::new(CategoryService::new(pool.clone())),
            ai_services: Arc::new(AiServiceService::new(pool.clone())),
            service_contents: Arc::new(ServiceContentService::new(pool.clone())),
            dashboard: Arc::new(DashboardService::new(pool.clone())),
            users: Arc::new(UserService::new(pool, Arc::new(notifier))),
        };
        let app = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
            max_request_body_size,
        };
        let swagger = SwaggerConfig {
            title: "Directory Test".to_string(),
            version: "0.0.1".to_string(),
            description: "test".to_string(),
        };

        TestServer::new(build_router(services, &app, &swagger)).unwrap()
    }

    #[tokio::test]
    async fn test_health_sets_request_id() {
        let response = server(1024).get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let request_id = response.header(REQUEST_ID_HEADER);
        assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_client_request_id_is_kept() {
        let response = server(1024)
            .get("/health")
            .add_header(REQUEST_ID_HEADER, "console-42")
            .await;

        assert_eq!(response.header(REQUEST_ID_HEADER), "console-42");
    }

    #[tokio::test]
    async fn test_openapi_document_uses_configured_info() {
        let response = server(1024).get("/api-docs/openapi.json").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let doc: Value = response.json();
        assert_eq!(doc["info"]["title"], "Directory Test");
        assert!(doc["paths"]["/api/ai-services/{id}/contents"].is_object());
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let name = "x".repeat(4096);
        let response = server(256)
            .post("/api/users")
            .json(&serde_json::json!({ "name": name, "email": "a@example.com" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
