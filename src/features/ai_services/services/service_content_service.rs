use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::is_foreign_key_violation;
use crate::core::error::{AppError, Result};
use crate::features::ai_services::dtos::{CreateServiceContentDto, ServiceContentResponseDto};
use crate::features::ai_services::models::ServiceContent;

/// Service for the per-service content blocks
pub struct ServiceContentService {
    pool: PgPool,
}

impl ServiceContentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List content blocks of a service in display order
    pub async fn list(&self, service_id: Uuid) -> Result<Vec<ServiceContentResponseDto>> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM ai_services WHERE id = $1)")
                .bind(service_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "AI service '{}' not found",
                service_id
            )));
        }

        let contents: Vec<ServiceContent> = sqlx::query_as(
            r#"
            SELECT id, service_id, content_type, title, body, display_order, created_at, updated_at
            FROM ai_service_contents
            WHERE service_id = $1
            ORDER BY display_order, content_type
            "#,
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list service contents: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(contents.into_iter().map(Into::into).collect())
    }

    /// Create a content block; an existing block of the same type is replaced
    pub async fn create(
        &self,
        service_id: Uuid,
        dto: CreateServiceContentDto,
    ) -> Result<ServiceContentResponseDto> {
        let content: ServiceContent = sqlx::query_as(
            r#"
            INSERT INTO ai_service_contents (service_id, content_type, title, body, display_order)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (service_id, content_type) DO UPDATE
            SET title = EXCLUDED.title,
                body = EXCLUDED.body,
                display_order = EXCLUDED.display_order,
                updated_at = NOW()
            RETURNING id, service_id, content_type, title, body, display_order, created_at, updated_at
            "#,
        )
        .bind(service_id)
        .bind(dto.content_type)
        .bind(&dto.title)
        .bind(&dto.body)
        .bind(dto.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return AppError::NotFound(format!("AI service '{}' not found", service_id));
            }
            tracing::error!("Failed to save service content: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Service content saved: service_id={}, content_type={}",
            service_id,
            content.content_type
        );

        Ok(content.into())
    }
}
