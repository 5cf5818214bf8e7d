use std::sync::Arc;

use sqlx::PgPool;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{CreateUserDto, UserResponseDto};
use crate::features::users::models::User;
use crate::modules::webhook::WebhookNotifier;
use crate::shared::constants::EVENT_USER_CREATED;

/// Service for user records
pub struct UserService {
    pool: PgPool,
    notifier: Arc<WebhookNotifier>,
}

impl UserService {
    pub fn new(pool: PgPool, notifier: Arc<WebhookNotifier>) -> Self {
        Self { pool, notifier }
    }

    /// Create a user and announce it to the automation webhook
    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(&dto.name)
        .bind(dto.email.trim().to_lowercase())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Conflict("A user with this email already exists".to_string());
            }
            tracing::error!("Failed to insert user: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("User created: id={}", user.id);

        let response = UserResponseDto::from(user);

        // Fire-and-forget: webhook delivery never affects the caller
        let notifier = Arc::clone(&self.notifier);
        let user_data = response.clone();
        tokio::spawn(async move {
            notifier.notify(EVENT_USER_CREATED, &user_data).await;
        });

        Ok(response)
    }
}
