use sqlx::{FromRow, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::DashboardStatsDto;
use crate::shared::constants::NEW_USERS_WINDOW_DAYS;

#[derive(Debug, FromRow)]
struct StatsRow {
    total_users: i64,
    new_users: i64,
    total_services: i64,
    total_videos: i64,
    total_categories: i64,
    step_pick_count: i64,
    active_services: i64,
    total_views: i64,
}

/// Service for admin dashboard aggregates
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all dashboard counts in one round trip
    pub async fn get_stats(&self) -> Result<DashboardStatsDto> {
        let row: StatsRow = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM users
                    WHERE created_at >= NOW() - make_interval(days => $1)) AS new_users,
                (SELECT COUNT(*) FROM ai_services) AS total_services,
                (SELECT COUNT(*) FROM videos) AS total_videos,
                (SELECT COUNT(*) FROM categories) AS total_categories,
                (SELECT COUNT(*) FROM ai_services WHERE is_step_pick) AS step_pick_count,
                (SELECT COUNT(*) FROM ai_services WHERE status = 'active') AS active_services,
                (
                    (SELECT COALESCE(SUM(view_count), 0) FROM ai_services)
                    + (SELECT COALESCE(SUM(view_count), 0) FROM videos)
                )::BIGINT AS total_views
            "#,
        )
        .bind(NEW_USERS_WINDOW_DAYS)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get dashboard stats: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(DashboardStatsDto {
            total_users: row.total_users,
            new_users: row.new_users,
            total_services: row.total_services,
            total_videos: row.total_videos,
            total_categories: row.total_categories,
            step_pick_count: row.step_pick_count,
            active_services: row.active_services,
            total_views: row.total_views,
        })
    }
}
