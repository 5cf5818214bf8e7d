use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{is_foreign_key_violation, is_unique_violation};
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::shared::types::RecordStatus;

const CATEGORY_COLUMNS: &str =
    "id, parent_id, name, description, icon, display_order, status, created_at, updated_at";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List categories (flat list), optionally filtered by status
    pub async fn list(&self, status: Option<RecordStatus>) -> Result<Vec<CategoryResponseDto>> {
        let query = format!(
            r#"
            SELECT {CATEGORY_COLUMNS}
            FROM categories
            WHERE ($1::record_status IS NULL OR status = $1)
            ORDER BY display_order, name
            "#
        );

        let categories: Vec<Category> = sqlx::query_as(&query)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// List categories as tree structure
    pub async fn list_tree(&self, status: Option<RecordStatus>) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.list(status).await?;
        Ok(CategoryTreeDto::build_tree(categories))
    }

    /// Get category by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");

        let category: Option<Category> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by id: {:?}", e);
                AppError::Database(e)
            })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))
    }

    /// Create a category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let query = format!(
            r#"
            INSERT INTO categories (parent_id, name, description, icon, display_order, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CATEGORY_COLUMNS}
            "#
        );

        let category: Category = sqlx::query_as(&query)
            .bind(dto.parent_id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(&dto.icon)
            .bind(dto.display_order)
            .bind(dto.status)
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)?;

        tracing::info!(
            "Category created: id={}, name={}, parent_id={:?}",
            category.id,
            category.name,
            category.parent_id
        );

        Ok(category.into())
    }

    /// Update a category
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        if dto.parent_id == Some(id) {
            return Err(AppError::BadRequest(
                "A category cannot be its own parent".to_string(),
            ));
        }
        if let Some(parent_id) = dto.parent_id {
            if self.is_descendant(parent_id, id).await? {
                return Err(AppError::BadRequest(
                    "A category cannot be moved under one of its descendants".to_string(),
                ));
            }
        }

        let query = format!(
            r#"
            UPDATE categories
            SET parent_id = $1,
                name = $2,
                description = $3,
                icon = $4,
                display_order = $5,
                status = $6,
                updated_at = NOW()
            WHERE id = $7
            RETURNING {CATEGORY_COLUMNS}
            "#
        );

        let category: Category = sqlx::query_as(&query)
            .bind(dto.parent_id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(&dto.icon)
            .bind(dto.display_order)
            .bind(dto.status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))?;

        tracing::info!("Category updated: id={}", category.id);

        Ok(category.into())
    }

    /// Whether `candidate` sits somewhere below `ancestor` in the stored parent chain
    async fn is_descendant(&self, candidate: Uuid, ancestor: Uuid) -> Result<bool> {
        sqlx::query_scalar(
            r#"
            WITH RECURSIVE chain AS (
                SELECT id, parent_id FROM categories WHERE id = $1
                UNION
                SELECT c.id, c.parent_id
                FROM categories c
                JOIN chain ON c.id = chain.parent_id
            )
            SELECT EXISTS (SELECT 1 FROM chain WHERE parent_id = $2)
            "#,
        )
        .bind(candidate)
        .bind(ancestor)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to walk category ancestors: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Delete a category. Refused while it still has children.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let child_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE parent_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count child categories: {:?}", e);
                    AppError::Database(e)
                })?;

        if child_count > 0 {
            return Err(AppError::Conflict(format!(
                "Category '{}' still has {} child categories",
                id, child_count
            )));
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category '{}' not found", id)));
        }

        tracing::info!("Category deleted: id={}", id);

        Ok(())
    }
}

/// Convert database error to more specific AppError
fn handle_db_error(e: sqlx::Error) -> AppError {
    if is_foreign_key_violation(&e) {
        return AppError::BadRequest("Parent category does not exist".to_string());
    }
    if is_unique_violation(&e) {
        return AppError::Conflict("Category already exists".to_string());
    }
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("categories_not_own_parent") {
            return AppError::BadRequest("A category cannot be its own parent".to_string());
        }
    }

    tracing::error!("Category query failed: {:?}", e);
    AppError::Database(e)
}
