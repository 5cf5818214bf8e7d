/// Users created within this many days count as "new" on the dashboard
pub const NEW_USERS_WINDOW_DAYS: i32 = 7;

/// Webhook event type emitted after a user record is created
pub const EVENT_USER_CREATED: &str = "user.created";

/// File extensions tried, in order, when backfilling service logos
pub const LOGO_EXTENSIONS: [&str; 4] = ["png", "svg", "webp", "jpg"];

/// Public URL prefix for backfilled logo paths
pub const DEFAULT_LOGO_PREFIX: &str = "/images/logos";
