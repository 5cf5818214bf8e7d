use utoipa::{Modify, OpenApi};

use crate::features::ai_services::{
    dtos as ai_services_dtos, handlers as ai_services_handlers, models as ai_services_models,
};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta, RecordStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // AI services
        ai_services_handlers::list_ai_services,
        ai_services_handlers::get_ai_service,
        ai_services_handlers::create_ai_service,
        ai_services_handlers::update_ai_service,
        ai_services_handlers::delete_ai_service,
        ai_services_handlers::list_service_contents,
        ai_services_handlers::create_service_content,
        // Dashboard
        dashboard_handlers::dashboard_handler::get_stats,
        // Users
        users_handlers::create_user,
    ),
    components(
        schemas(
            // Shared
            Meta,
            RecordStatus,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // AI services
            ai_services_models::ServiceType,
            ai_services_models::PricingModel,
            ai_services_models::DifficultyLevel,
            ai_services_models::ContentType,
            ai_services_dtos::CategoryAssignmentDto,
            ai_services_dtos::ServiceCategoryDto,
            ai_services_dtos::UpsertAiServiceDto,
            ai_services_dtos::AiServiceResponseDto,
            ai_services_dtos::CreateServiceContentDto,
            ai_services_dtos::ServiceContentResponseDto,
            ApiResponse<Vec<ai_services_dtos::AiServiceResponseDto>>,
            ApiResponse<ai_services_dtos::AiServiceResponseDto>,
            ApiResponse<Vec<ai_services_dtos::ServiceContentResponseDto>>,
            ApiResponse<ai_services_dtos::ServiceContentResponseDto>,
            // Dashboard
            dashboard_dtos::DashboardStatsDto,
            ApiResponse<dashboard_dtos::DashboardStatsDto>,
            // Users
            users_dtos::CreateUserDto,
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
        )
    ),
    tags(
        (name = "categories", description = "Two-level service categories"),
        (name = "ai-services", description = "AI service listings, category assignments and content blocks"),
        (name = "dashboard", description = "Admin dashboard counts"),
        (name = "users", description = "User registration"),
    ),
    info(
        title = "AI Directory API",
        version = "0.1.0",
        description = "API documentation for the AI service directory",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/categories",
            "/api/categories/{id}",
            "/api/ai-services",
            "/api/ai-services/{id}",
            "/api/ai-services/{id}/contents",
            "/api/dashboard/stats",
            "/api/users",
        ] {
            assert!(paths.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_info_modifier_overrides_defaults() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Directory".to_string(),
            version: "9.9.9".to_string(),
            description: "Staging".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Directory");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("Staging"));
    }
}
