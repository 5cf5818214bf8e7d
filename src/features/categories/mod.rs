//! Category tree for the AI service directory.
//!
//! Categories are stored flat with a `parent_id` back-reference. Only two levels
//! are used in practice (top-level categories and their children).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | List categories (`?tree=true` for nested) |
//! | POST | `/api/categories` | Create category |
//! | GET | `/api/categories/{id}` | Get category |
//! | PUT | `/api/categories/{id}` | Update category |
//! | DELETE | `/api/categories/{id}` | Delete category without children |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::CategoryService;
