use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::types::RecordStatus;

/// Kind of AI service, matching the `ai_service_type` database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "ai_service_type")]
pub enum ServiceType {
    #[sqlx(rename = "LLM")]
    #[serde(rename = "LLM")]
    Llm,
    #[sqlx(rename = "RAG")]
    #[serde(rename = "RAG")]
    Rag,
    #[sqlx(rename = "GPTs")]
    #[serde(rename = "GPTs")]
    Gpts,
    #[sqlx(rename = "Image_Generation")]
    #[serde(rename = "Image_Generation")]
    ImageGeneration,
    #[sqlx(rename = "Video_Generation")]
    #[serde(rename = "Video_Generation")]
    VideoGeneration,
    #[sqlx(rename = "Audio_Generation")]
    #[serde(rename = "Audio_Generation")]
    AudioGeneration,
    #[sqlx(rename = "Other")]
    #[serde(rename = "Other")]
    Other,
}

/// Pricing model enum matching database enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "pricing_model", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PricingModel {
    #[default]
    Free,
    Freemium,
    Paid,
    Subscription,
}

/// Difficulty level enum matching database enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "difficulty_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Database model for AI service
#[derive(Debug, Clone, FromRow)]
pub struct AiService {
    pub id: Uuid,
    pub name: String,
    pub description: String,
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
}
