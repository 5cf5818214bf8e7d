use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::ai_services::models::{
    AiService, DifficultyLevel, PricingModel, ServiceCategory, ServiceType,
};
use crate::shared::types::RecordStatus;
use crate::shared::validation::{COUNTRY_CODE_REGEX, WEBSITE_REGEX};

fn default_true() -> bool {
    true
}

/// Query params for listing AI services
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct ListAiServicesQuery {
    /// Embed category assignments in each service
    #[serde(default)]
    pub include_categories: bool,

    /// Filter by service type
    #[serde(rename = "type")]
    pub service_type: Option<ServiceType>,

    /// Filter by status
    pub status: Option<RecordStatus>,

    /// Filter by visibility
    pub is_visible: Option<bool>,

    /// Filter by editorial "step pick" flag
    pub is_step_pick: Option<bool>,
}

/// One category attached to a service in a create/update payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryAssignmentDto {
    pub category_id: Uuid,
    #[serde(default)]
    pub is_main_category: bool,
}

/// Category assignment as returned with a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceCategoryDto {
    pub category_id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub is_main_category: bool,
}

impl From<ServiceCategory> for ServiceCategoryDto {
    fn from(c: ServiceCategory) -> Self {
        Self {
            category_id: c.category_id,
            name: c.category_name,
            parent_id: c.parent_id,
            is_main_category: c.is_main_category,
        }
    }
}

/// Request DTO for creating or updating a service (full replacement)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertAiServiceDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[serde(rename = "type")]
    pub service_type: ServiceType,

    #[validate(regex(path = *WEBSITE_REGEX, message = "website must be an http(s) URL"))]
    pub website: String,

    pub logo: Option<String>,

    #[serde(default)]
    pub pricing_model: PricingModel,

    pub pricing_info: Option<String>,

    #[serde(default)]
    pub difficulty_level: DifficultyLevel,

    #[serde(default)]
    pub status: RecordStatus,

    #[serde(default = "default_true")]
    pub is_visible: bool,

    #[serde(default)]
    pub is_step_pick: bool,

    /// ISO 3166-1 alpha-2 country code
    #[validate(regex(path = *COUNTRY_CODE_REGEX, message = "nationality must be a two-letter uppercase country code"))]
    pub nationality: String,

    /// Ordered category assignments; exactly one must be main when non-empty
    #[serde(default)]
    pub categories: Vec<CategoryAssignmentDto>,
}

impl UpsertAiServiceDto {
    /// Check the assignment set: no duplicates, exactly one main when non-empty
    pub fn check_assignments(&self) -> std::result::Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for assignment in &self.categories {
            if !seen.insert(assignment.category_id) {
                return Err(format!(
                    "category {} is assigned more than once",
                    assignment.category_id
                ));
            }
        }

        let main_count = self
            .categories
            .iter()
            .filter(|c| c.is_main_category)
            .count();
        match (self.categories.is_empty(), main_count) {
            (true, _) | (false, 1) => Ok(()),
            (false, 0) => Err("one category must be marked as main".to_string()),
            (false, n) => Err(format!(
                "only one category may be marked as main, got {}",
                n
            )),
        }
    }
}

/// Response DTO for AI service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AiServiceResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub website: String,
    pub logo: Option<String>,
    pub pricing_model: PricingModel,
    pub pricing_info: Option<String>,
    pub difficulty_level: DifficultyLevel,
    pub status: RecordStatus,
    pub is_visible: bool,
    pub is_step_pick: bool,
    pub nationality: String,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present when categories were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<ServiceCategoryDto>>,
}

impl From<AiService> for AiServiceResponseDto {
    fn from(s: AiService) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            service_type: s.service_type,
            website: s.website,
            logo: s.logo,
            pricing_model: s.pricing_model,
            pricing_info: s.pricing_info,
            difficulty_level: s.difficulty_level,
            status: s.status,
            is_visible: s.is_visible,
            is_step_pick: s.is_step_pick,
            nationality: s.nationality,
            view_count: s.view_count,
            created_at: s.created_at,
            updated_at: s.updated_at,
            categories: None,
        }
    }
}

impl AiServiceResponseDto {
    pub fn with_categories(mut self, categories: Vec<ServiceCategoryDto>) -> Self {
        self.categories = Some(categories);
        self
    }
}
