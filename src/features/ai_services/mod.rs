//! AI service listings with category assignments and content blocks.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/ai-services` | List services (`?include_categories=true` embeds assignments) |
//! | POST | `/api/ai-services` | Create service with its category assignments |
//! | GET | `/api/ai-services/{id}` | Get service with assignments |
//! | PUT | `/api/ai-services/{id}` | Update service and replace its assignments |
//! | DELETE | `/api/ai-services/{id}` | Delete service |
//! | GET | `/api/ai-services/{id}/contents` | List content blocks |
//! | POST | `/api/ai-services/{id}/contents` | Create or replace a content block |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{AiServiceService, ServiceContentService};
