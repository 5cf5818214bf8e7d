mod ai_service;
mod service_category;
mod service_content;

pub use ai_service::{AiService, DifficultyLevel, PricingModel, ServiceType};
pub use service_category::ServiceCategory;
pub use service_content::{ContentType, ServiceContent};
