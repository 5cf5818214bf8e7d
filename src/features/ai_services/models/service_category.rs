use sqlx::FromRow;
use uuid::Uuid;

/// Category assignment joined with the category it points at
#[derive(Debug, Clone, FromRow)]
pub struct ServiceCategory {
    pub service_id: Uuid,
    pub category_id: Uuid,
    pub category_name: String,
    pub parent_id: Option<Uuid>,
    pub is_main_category: bool,
    pub position: i32,
}
