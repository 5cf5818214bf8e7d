use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::ai_services::dtos::{
    AiServiceResponseDto, ListAiServicesQuery, UpsertAiServiceDto,
};
use crate::features::ai_services::handlers::AiServiceState;
use crate::shared::types::{ApiResponse, Meta};

/// List AI services
#[utoipa::path(
    get,
    path = "/api/ai-services",
    params(ListAiServicesQuery),
    responses(
        (status = 200, description = "List of AI services", body = ApiResponse<Vec<AiServiceResponseDto>>),
    ),
    tag = "ai-services"
)]
pub async fn list_ai_services(
    State(state): State<AiServiceState>,
    Query(query): Query<ListAiServicesQuery>,
) -> Result<Json<ApiResponse<Vec<AiServiceResponseDto>>>> {
    let services = state.service_service.list(&query).await?;
    let total = services.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(services),
        None,
        Some(Meta { total }),
    )))
}

/// Get an AI service with its category assignments
#[utoipa::path(
    get,
    path = "/api/ai-services/{id}",
    params(
        ("id" = Uuid, Path, description = "AI service ID")
    ),
    responses(
        (status = 200, description = "AI service found", body = ApiResponse<AiServiceResponseDto>),
        (status = 404, description = "AI service not found")
    ),
    tag = "ai-services"
)]
pub async fn get_ai_service(
    State(state): State<AiServiceState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AiServiceResponseDto>>> {
    let service = state.service_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(service), None, None)))
}

/// Create an AI service with its category assignments
#[utoipa::path(
    post,
    path = "/api/ai-services",
    request_body = UpsertAiServiceDto,
    responses(
        (status = 201, description = "AI service created", body = ApiResponse<AiServiceResponseDto>),
        (status = 400, description = "Validation error or unknown category")
    ),
    tag = "ai-services"
)]
pub async fn create_ai_service(
    State(state): State<AiServiceState>,
    AppJson(dto): AppJson<UpsertAiServiceDto>,
) -> Result<(StatusCode, Json<ApiResponse<AiServiceResponseDto>>)> {
    dto.validate()?;

    let service = state.service_service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(service), None, None)),
    ))
}

/// Update an AI service and replace its category assignments
#[utoipa::path(
    put,
    path = "/api/ai-services/{id}",
    params(
        ("id" = Uuid, Path, description = "AI service ID")
    ),
    request_body = UpsertAiServiceDto,
    responses(
        (status = 200, description = "AI service updated", body = ApiResponse<AiServiceResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 404, description = "AI service not found")
    ),
    tag = "ai-services"
)]
pub async fn update_ai_service(
    State(state): State<AiServiceState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpsertAiServiceDto>,
) -> Result<Json<ApiResponse<AiServiceResponseDto>>> {
    dto.validate()?;

    let service = state.service_service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(service), None, None)))
}

/// Delete an AI service
#[utoipa::path(
    delete,
    path = "/api/ai-services/{id}",
    params(
        ("id" = Uuid, Path, description = "AI service ID")
    ),
    responses(
        (status = 200, description = "AI service deleted"),
        (status = 404, description = "AI service not found")
    ),
    tag = "ai-services"
)]
pub async fn delete_ai_service(
    State(state): State<AiServiceState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.service_service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
