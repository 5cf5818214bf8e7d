use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::ai_services::models::{ContentType, ServiceContent};

/// Request DTO for creating (or replacing) a content block of a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateServiceContentDto {
    pub content_type: ContentType,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Rich-text body
    #[validate(length(min = 1))]
    pub body: String,

    #[serde(default)]
    pub display_order: i32,
}

/// Response DTO for a content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceContentResponseDto {
    pub id: Uuid,
    pub service_id: Uuid,
    pub content_type: ContentType,
    pub title: String,
    pub body: String,
    pub display_order: i32,
}

impl From<ServiceContent> for ServiceContentResponseDto {
    fn from(c: ServiceContent) -> Self {
        Self {
            id: c.id,
            service_id: c.service_id,
            content_type: c.content_type,
            title: c.title,
            body: c.body,
            display_order: c.display_order,
        }
    }
}
