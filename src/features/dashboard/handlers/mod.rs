pub mod dashboard_handler;

pub use dashboard_handler::*;
