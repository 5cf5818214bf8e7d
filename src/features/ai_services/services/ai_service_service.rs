use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::core::database::is_foreign_key_violation;
use crate::core::error::{AppError, Result};
use crate::features::ai_services::dtos::{
    AiServiceResponseDto, CategoryAssignmentDto, ListAiServicesQuery, ServiceCategoryDto,
    UpsertAiServiceDto,
};
use crate::features::ai_services::models::{AiService, ServiceCategory};

const SERVICE_COLUMNS: &str = r#"
    id, name, description, service_type, website, logo, pricing_model, pricing_info,
    difficulty_level, status, is_visible, is_step_pick, nationality, view_count,
    created_at, updated_at
"#;

/// Service for AI service listings and their category assignments
pub struct AiServiceService {
    pool: PgPool,
}

impl AiServiceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List services, newest first, with optional filters
    pub async fn list(&self, query: &ListAiServicesQuery) -> Result<Vec<AiServiceResponseDto>> {
        let sql = format!(
            r#"
            SELECT {SERVICE_COLUMNS}
            FROM ai_services
            WHERE ($1::ai_service_type IS NULL OR service_type = $1)
              AND ($2::record_status IS NULL OR status = $2)
              AND ($3::BOOLEAN IS NULL OR is_visible = $3)
              AND ($4::BOOLEAN IS NULL OR is_step_pick = $4)
            ORDER BY created_at DESC
            "#
        );

        let services: Vec<AiService> = sqlx::query_as(&sql)
            .bind(query.service_type)
            .bind(query.status)
            .bind(query.is_visible)
            .bind(query.is_step_pick)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list AI services: {:?}", e);
                AppError::Database(e)
            })?;

        if !query.include_categories {
            return Ok(services.into_iter().map(Into::into).collect());
        }

        let ids: Vec<Uuid> = services.iter().map(|s| s.id).collect();
        let mut categories = self.categories_for(&ids).await?;

        Ok(services
            .into_iter()
            .map(|s| {
                let assigned = categories.remove(&s.id).unwrap_or_default();
                AiServiceResponseDto::from(s).with_categories(assigned)
            })
            .collect())
    }

    /// Get one service with its category assignments
    pub async fn get_by_id(&self, id: Uuid) -> Result<AiServiceResponseDto> {
        let sql = format!("SELECT {SERVICE_COLUMNS} FROM ai_services WHERE id = $1");

        let service: AiService = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get AI service: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("AI service '{}' not found", id)))?;

        let assigned = self
            .categories_for(&[id])
            .await?
            .remove(&id)
            .unwrap_or_default();

        Ok(AiServiceResponseDto::from(service).with_categories(assigned))
    }

    /// Create a service together with its category assignments
    pub async fn create(&self, dto: UpsertAiServiceDto) -> Result<AiServiceResponseDto> {
        dto.check_assignments().map_err(AppError::Validation)?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let sql = format!(
            r#"
            INSERT INTO ai_services (
                name, description, service_type, website, logo, pricing_model, pricing_info,
                difficulty_level, status, is_visible, is_step_pick, nationality
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {SERVICE_COLUMNS}
            "#
        );

        let service: AiService = sqlx::query_as(&sql)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.service_type)
            .bind(&dto.website)
            .bind(&dto.logo)
            .bind(dto.pricing_model)
            .bind(&dto.pricing_info)
            .bind(dto.difficulty_level)
            .bind(dto.status)
            .bind(dto.is_visible)
            .bind(dto.is_step_pick)
            .bind(&dto.nationality)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert AI service: {:?}", e);
                AppError::Database(e)
            })?;

        insert_assignments(&mut tx, service.id, &dto.categories).await?;
        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "AI service created: id={}, name={}, categories={}",
            service.id,
            service.name,
            dto.categories.len()
        );

        self.get_by_id(service.id).await
    }

    /// Update a service and replace its category assignments
    pub async fn update(&self, id: Uuid, dto: UpsertAiServiceDto) -> Result<AiServiceResponseDto> {
        dto.check_assignments().map_err(AppError::Validation)?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let sql = format!(
            r#"
            UPDATE ai_services
            SET name = $1,
                description = $2,
                service_type = $3,
                website = $4,
                logo = $5,
                pricing_model = $6,
                pricing_info = $7,
                difficulty_level = $8,
                status = $9,
                is_visible = $10,
                is_step_pick = $11,
                nationality = $12,
                updated_at = NOW()
            WHERE id = $13
            RETURNING {SERVICE_COLUMNS}
            "#
        );

        let service: AiService = sqlx::query_as(&sql)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.service_type)
            .bind(&dto.website)
            .bind(&dto.logo)
            .bind(dto.pricing_model)
            .bind(&dto.pricing_info)
            .bind(dto.difficulty_level)
            .bind(dto.status)
            .bind(dto.is_visible)
            .bind(dto.is_step_pick)
            .bind(&dto.nationality)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update AI service: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("AI service '{}' not found", id)))?;

        sqlx::query("DELETE FROM ai_service_categories WHERE service_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to clear category assignments: {:?}", e);
                AppError::Database(e)
            })?;

        insert_assignments(&mut tx, id, &dto.categories).await?;
        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "AI service updated: id={}, categories={}",
            service.id,
            dto.categories.len()
        );

        self.get_by_id(id).await
    }

    /// Delete a service; assignments and content blocks cascade
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM ai_services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete AI service: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("AI service '{}' not found", id)));
        }

        tracing::info!("AI service deleted: id={}", id);

        Ok(())
    }

    /// Category assignments for the given services, grouped by service id in stored order
    async fn categories_for(
        &self,
        service_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<ServiceCategoryDto>>> {
        if service_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<ServiceCategory> = sqlx::query_as(
            r#"
            SELECT sc.service_id, sc.category_id, c.name AS category_name, c.parent_id,
                   sc.is_main_category, sc.position
            FROM ai_service_categories sc
            JOIN categories c ON c.id = sc.category_id
            WHERE sc.service_id = ANY($1)
            ORDER BY sc.service_id, sc.position
            "#,
        )
        .bind(service_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load category assignments: {:?}", e);
            AppError::Database(e)
        })?;

        let mut grouped: HashMap<Uuid, Vec<ServiceCategoryDto>> = HashMap::new();
        for row in rows {
            grouped.entry(row.service_id).or_default().push(row.into());
        }
        Ok(grouped)
    }
}

async fn insert_assignments(
    tx: &mut Transaction<'_, Postgres>,
    service_id: Uuid,
    assignments: &[CategoryAssignmentDto],
) -> Result<()> {
    for (position, assignment) in assignments.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO ai_service_categories (service_id, category_id, is_main_category, position)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(service_id)
        .bind(assignment.category_id)
        .bind(assignment.is_main_category)
        .bind(position as i32)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return AppError::BadRequest(format!(
                    "Category '{}' does not exist",
                    assignment.category_id
                ));
            }
            tracing::error!("Failed to insert category assignment: {:?}", e);
            AppError::Database(e)
        })?;
    }
    Ok(())
}
