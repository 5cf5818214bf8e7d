use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::ai_services::dtos::{CreateServiceContentDto, ServiceContentResponseDto};
use crate::features::ai_services::handlers::AiServiceState;
use crate::shared::types::ApiResponse;

/// List content blocks of an AI service
#[utoipa::path(
    get,
    path = "/api/ai-services/{id}/contents",
    params(
        ("id" = Uuid, Path, description = "AI service ID")
    ),
    responses(
        (status = 200, description = "Content blocks", body = ApiResponse<Vec<ServiceContentResponseDto>>),
        (status = 404, description = "AI service not found")
    ),
    tag = "ai-services"
)]
pub async fn list_service_contents(
    State(state): State<AiServiceState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ServiceContentResponseDto>>>> {
    let contents = state.content_service.list(id).await?;
    Ok(Json(ApiResponse::success(Some(contents), None, None)))
}

/// Create a content block for an AI service
///
/// A block with the same `content_type` is replaced.
#[utoipa::path(
    post,
    path = "/api/ai-services/{id}/contents",
    params(
        ("id" = Uuid, Path, description = "AI service ID")
    ),
    request_body = CreateServiceContentDto,
    responses(
        (status = 201, description = "Content block saved", body = ApiResponse<ServiceContentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "AI service not found")
    ),
    tag = "ai-services"
)]
pub async fn create_service_content(
    State(state): State<AiServiceState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateServiceContentDto>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceContentResponseDto>>)> {
    dto.validate()?;

    let content = state.content_service.create(id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(content), None, None)),
    ))
}
