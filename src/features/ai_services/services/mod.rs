mod ai_service_service;
mod service_content_service;

pub use ai_service_service::AiServiceService;
pub use service_content_service::ServiceContentService;
