pub mod ai_services;
pub mod categories;
pub mod dashboard;
pub mod users;
