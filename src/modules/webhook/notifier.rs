use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::config::WebhookConfig;

/// One event as delivered to the automation endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent<'a, T: Serialize> {
    pub event_type: &'a str,
    pub event_timestamp: DateTime<Utc>,
    pub user_data: &'a T,
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Webhook request failed: {0}")]
    RequestError(String),

    #[error("Webhook rejected with HTTP {status}: {body}")]
    StatusError { status: u16, body: String },
}

/// Posts user lifecycle events to the configured automation endpoint
pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: Option<String>,
    token: String,
}

impl WebhookNotifier {
    pub fn new(config: &WebhookConfig) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WebhookError::RequestError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint().map(str::to_string),
            token: config.token.clone(),
        })
    }

    /// Endpoint events are posted to; `None` when the notifier is disabled
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Deliver an event. Never fails: errors are logged and dropped.
    pub async fn notify<T: Serialize + Sync>(&self, event_type: &str, user_data: &T) {
        let Some(endpoint) = self.endpoint.as_deref() else {
            tracing::debug!(
                "Webhook disabled (no endpoint configured), skipping {}",
                event_type
            );
            return;
        };

        match self.send(endpoint, event_type, user_data).await {
            Ok(()) => tracing::info!("Webhook delivered: event_type={}", event_type),
            Err(e) => tracing::warn!("Webhook delivery failed: event_type={}, {}", event_type, e),
        }
    }

    async fn send<T: Serialize + Sync>(
        &self,
        endpoint: &str,
        event_type: &str,
        user_data: &T,
    ) -> Result<(), WebhookError> {
        let payload = [WebhookEvent {
            event_type,
            event_timestamp: Utc::now(),
            user_data,
        }];

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| WebhookError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WebhookError::StatusError { status, body });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WebhookEnvironment;
    use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    type Captured = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    async fn capture(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> StatusCode {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        captured.lock().unwrap().push((auth, body));
        StatusCode::OK
    }

    /// Starts an automation endpoint stand-in on an ephemeral port
    async fn spawn_endpoint(status_ok: bool) -> (String, Captured) {
        let captured: Captured = Arc::default();
        let app = if status_ok {
            Router::new()
                .route("/hook", post(capture))
                .with_state(Arc::clone(&captured))
        } else {
            Router::new().route("/hook", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/hook", addr), captured)
    }

    fn config(test_url: Option<String>) -> WebhookConfig {
        WebhookConfig {
            environment: WebhookEnvironment::Test,
            test_url,
            production_url: Some("http://127.0.0.1:9/never-used".to_string()),
            token: "test-token".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    #[tokio::test]
    async fn test_notify_posts_single_event_array_with_bearer_token() {
        let (url, captured) = spawn_endpoint(true).await;
        let notifier = WebhookNotifier::new(&config(Some(url))).unwrap();

        let name: String = Name().fake();
        let email: String = SafeEmail().fake();
        let user = serde_json::json!({ "name": name, "email": email });
        notifier.notify("user.created", &user).await;

        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        let (auth, body) = &captured[0];
        assert_eq!(auth.as_deref(), Some("Bearer test-token"));

        let events = body.as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["eventType"], "user.created");
        assert_eq!(events[0]["userData"]["email"], email.as_str());
        let timestamp = events[0]["eventTimestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_send_reports_rejection_and_notify_swallows_it() {
        let (url, _) = spawn_endpoint(false).await;
        let notifier = WebhookNotifier::new(&config(Some(url.clone()))).unwrap();

        let err = notifier
            .send(&url, "user.created", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, WebhookError::StatusError { status: 500, .. }));

        // Must return normally
        notifier.notify("user.created", &serde_json::json!({})).await;
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_does_not_fail_caller() {
        let notifier =
            WebhookNotifier::new(&config(Some("http://127.0.0.1:9/hook".to_string()))).unwrap();

        notifier.notify("user.created", &serde_json::json!({})).await;
    }

    #[test]
    fn test_disabled_without_endpoint() {
        let notifier = WebhookNotifier::new(&config(None)).unwrap();
        assert!(notifier.endpoint().is_none());

        tokio_test::block_on(notifier.notify("user.created", &serde_json::json!({ "id": 1 })));
    }
}
