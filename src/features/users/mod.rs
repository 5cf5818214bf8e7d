//! User records. Creation emits a `user.created` webhook event.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::UserService;
