use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::dashboard::dtos::DashboardStatsDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Get dashboard aggregates
///
/// Users, services, videos, categories, step picks, active services and total views.
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Dashboard counts", body = ApiResponse<DashboardStatsDto>),
    ),
    tag = "dashboard"
)]
pub async fn get_stats(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardStatsDto>>> {
    let stats = service.get_stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
