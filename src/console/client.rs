use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::console::error::{ConsoleError, ConsoleResult};
use crate::core::config::ConsoleConfig;
use crate::features::ai_services::dtos::{
    AiServiceResponseDto, CreateServiceContentDto, ServiceContentResponseDto, UpsertAiServiceDto,
};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::dashboard::dtos::DashboardStatsDto;
use crate::shared::types::ApiResponse;

/// Operations the admin console performs against the directory API
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Flat list of every category
    async fn list_categories(&self) -> ConsoleResult<Vec<CategoryResponseDto>>;

    /// Every service with its category assignments embedded
    async fn list_services(&self) -> ConsoleResult<Vec<AiServiceResponseDto>>;

    async fn create_service(&self, dto: &UpsertAiServiceDto)
        -> ConsoleResult<AiServiceResponseDto>;

    async fn update_service(
        &self,
        id: Uuid,
        dto: &UpsertAiServiceDto,
    ) -> ConsoleResult<AiServiceResponseDto>;

    async fn delete_service(&self, id: Uuid) -> ConsoleResult<()>;

    async fn list_contents(&self, service_id: Uuid)
        -> ConsoleResult<Vec<ServiceContentResponseDto>>;

    async fn create_content(
        &self,
        service_id: Uuid,
        dto: &CreateServiceContentDto,
    ) -> ConsoleResult<ServiceContentResponseDto>;

    async fn dashboard_stats(&self) -> ConsoleResult<DashboardStatsDto>;
}

/// `AdminApi` over HTTP, unwrapping the standard response envelope
pub struct HttpAdminApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAdminApi {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the envelope's `data`
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ConsoleResult<Option<T>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            // Prefer the envelope message, fall back to the raw body
            let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            return Err(ConsoleError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> =
            serde_json::from_slice(&body).map_err(|e| ConsoleError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ConsoleResult<T> {
        self.send(request)
            .await?
            .ok_or_else(|| ConsoleError::Decode("response envelope has no data".to_string()))
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn list_categories(&self) -> ConsoleResult<Vec<CategoryResponseDto>> {
        self.fetch(self.client.get(self.url("/api/categories"))).await
    }

    async fn list_services(&self) -> ConsoleResult<Vec<AiServiceResponseDto>> {
        let request = self
            .client
            .get(self.url("/api/ai-services"))
            .query(&[("include_categories", "true")]);
        self.fetch(request).await
    }

    async fn create_service(
        &self,
        dto: &UpsertAiServiceDto,
    ) -> ConsoleResult<AiServiceResponseDto> {
        self.fetch(self.client.post(self.url("/api/ai-services")).json(dto))
            .await
    }

    async fn update_service(
        &self,
        id: Uuid,
        dto: &UpsertAiServiceDto,
    ) -> ConsoleResult<AiServiceResponseDto> {
        let url = self.url(&format!("/api/ai-services/{}", id));
        self.fetch(self.client.put(url).json(dto)).await
    }

    async fn delete_service(&self, id: Uuid) -> ConsoleResult<()> {
        let url = self.url(&format!("/api/ai-services/{}", id));
        self.send::<serde_json::Value>(self.client.delete(url))
            .await
            .map(|_| ())
    }

    async fn list_contents(
        &self,
        service_id: Uuid,
    ) -> ConsoleResult<Vec<ServiceContentResponseDto>> {
        let url = self.url(&format!("/api/ai-services/{}/contents", service_id));
        self.fetch(self.client.get(url)).await
    }

    async fn create_content(
        &self,
        service_id: Uuid,
        dto: &CreateServiceContentDto,
    ) -> ConsoleResult<ServiceContentResponseDto> {
        let url = self.url(&format!("/api/ai-services/{}/contents", service_id));
        self.fetch(self.client.post(url).json(dto)).await
    }

    async fn dashboard_stats(&self) -> ConsoleResult<DashboardStatsDto> {
        // A missing `data` renders as all zeroes
        let stats = self
            .send(self.client.get(self.url("/api/dashboard/stats")))
            .await?;
        Ok(stats.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{sample_category, sample_service, sample_upsert_dto};
    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<String>>>;

    /// Stand-in API serving canned envelopes and recording what it was asked
    async fn spawn_api() -> (HttpAdminApi, Seen) {
        let seen: Seen = Arc::default();

        let app = Router::new()
            .route(
                "/api/categories",
                get(|| async {
                    Json(json!({
                        "success": true,
                        "data": [sample_category("Chatbots", None, 1)],
                        "message": null, "meta": {"total": 1}, "errors": null
                    }))
                }),
            )
            .route(
                "/api/ai-services",
                get(
                    |State(seen): State<Seen>, Query(q): Query<HashMap<String, String>>| async move {
                        let flag = q.get("include_categories").cloned().unwrap_or_default();
                        seen.lock().unwrap().push(format!("list include_categories={}", flag));
                        Json(json!({
                            "success": true,
                            "data": [sample_service(Uuid::nil())],
                            "message": null, "meta": null, "errors": null
                        }))
                    },
                )
                .post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push(format!("create {}", body["type"]));
                    (
                        StatusCode::CREATED,
                        Json(json!({
                            "success": true,
                            "data": sample_service(Uuid::nil()),
                            "message": null, "meta": null, "errors": null
                        })),
                    )
                }),
            )
            .route(
                "/api/ai-services/{id}",
                get(|| async { StatusCode::NOT_FOUND }).delete(
                    |State(seen): State<Seen>, Path(id): Path<Uuid>| async move {
                        seen.lock().unwrap().push(format!("delete {}", id));
                        (
                            StatusCode::NOT_FOUND,
                            Json(json!({
                                "success": false, "data": null,
                                "message": "AI service not found", "meta": null, "errors": null
                            })),
                        )
                    },
                ),
            )
            .route(
                "/api/dashboard/stats",
                get(|| async {
                    Json(json!({
                        "success": true,
                        "data": {"totalUsers": 5, "totalServices": 9},
                        "message": null, "meta": null, "errors": null
                    }))
                }),
            )
            .with_state(Arc::clone(&seen));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = ConsoleConfig::new(format!("http://{}/", addr));
        (HttpAdminApi::new(&config), seen)
    }

    #[tokio::test]
    async fn test_lists_unwrap_envelope_data() {
        let (api, seen) = spawn_api().await;

        let categories = api.list_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Chatbots");

        let services = api.list_services().await.unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            ["list include_categories=true"]
        );
    }

    #[tokio::test]
    async fn test_create_sends_payload_with_type_key() {
        let (api, seen) = spawn_api().await;

        let created = api.create_service(&sample_upsert_dto()).await.unwrap();
        assert_eq!(created.id, Uuid::nil());
        assert_eq!(seen.lock().unwrap().as_slice(), ["create \"LLM\""]);
    }

    #[tokio::test]
    async fn test_error_status_carries_envelope_message() {
        let (api, _) = spawn_api().await;

        let err = api.delete_service(Uuid::nil()).await.unwrap_err();
        match err {
            ConsoleError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "AI service not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dashboard_stats_missing_fields_are_zero() {
        let (api, _) = spawn_api().await;

        let stats = api.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_users, 5);
        assert_eq!(stats.total_services, 9);
        assert_eq!(stats.total_views, 0);
    }

    #[tokio::test]
    async fn test_unreachable_api_is_transport_error() {
        let api = HttpAdminApi::new(&ConsoleConfig::new("http://127.0.0.1:9"));

        let err = api.dashboard_stats().await.unwrap_err();
        assert!(matches!(err, ConsoleError::Transport(_)));
    }
}
