use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Fixed set of free-text sections a service page carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "service_content_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    TargetUsers,
    MainFeatures,
    UseCases,
}

impl ContentType {
    /// Every content type in display order
    pub const ALL: [ContentType; 3] = [
        ContentType::TargetUsers,
        ContentType::MainFeatures,
        ContentType::UseCases,
    ];

    pub fn default_title(&self) -> &'static str {
        match self {
            ContentType::TargetUsers => "Target Users",
            ContentType::MainFeatures => "Main Features",
            ContentType::UseCases => "Use Cases",
        }
    }

    pub fn default_order(&self) -> i32 {
        match self {
            ContentType::TargetUsers => 1,
            ContentType::MainFeatures => 2,
            ContentType::UseCases => 3,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::TargetUsers => write!(f, "target_users"),
            ContentType::MainFeatures => write!(f, "main_features"),
            ContentType::UseCases => write!(f, "use_cases"),
        }
    }
}

/// Database model for a service content block
#[derive(Debug, Clone, FromRow)]
pub struct ServiceContent {
    pub id: Uuid,
    pub service_id: Uuid,
    pub content_type: ContentType,
    pub title: String,
    pub body: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
