mod ai_service_dto;
mod service_content_dto;

pub use ai_service_dto::*;
pub use service_content_dto::*;
