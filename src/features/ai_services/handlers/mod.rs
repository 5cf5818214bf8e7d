mod ai_service_handler;
mod service_content_handler;

use std::sync::Arc;

use crate::features::ai_services::services::{AiServiceService, ServiceContentService};

pub use ai_service_handler::*;
pub use service_content_handler::*;

/// State for AI service handlers
#[derive(Clone)]
pub struct AiServiceState {
    pub service_service: Arc<AiServiceService>,
    pub content_service: Arc<ServiceContentService>,
}
