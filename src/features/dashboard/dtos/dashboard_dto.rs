use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Precomputed counts shown on the admin dashboard.
///
/// Every field defaults to zero when absent from a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStatsDto {
    pub total_users: i64,
    /// Users created within the last seven days
    pub new_users: i64,
    pub total_services: i64,
    pub total_videos: i64,
    pub total_categories: i64,
    pub step_pick_count: i64,
    pub active_services: i64,
    /// Sum of service and video view counts
    pub total_views: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let stats: DashboardStatsDto = serde_json::from_value(serde_json::json!({
            "totalUsers": 12,
            "totalServices": 40,
            "stepPickCount": 3
        }))
        .unwrap();

        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.total_services, 40);
        assert_eq!(stats.step_pick_count, 3);
        assert_eq!(stats.total_views, 0);
        assert_eq!(stats.new_users, 0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(DashboardStatsDto {
            total_views: 9,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(value["totalViews"], 9);
        assert_eq!(value["activeServices"], 0);
    }
}
