use sqlx::PgPool;

/// A column that legacy databases may lack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPatch {
    pub table: &'static str,
    pub column: &'static str,
    pub definition: &'static str,
}

impl ColumnPatch {
    pub fn statement(&self) -> String {
        format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            self.table, self.column, self.definition
        )
    }
}

/// Columns added after the first deployments, in application order
pub const LEGACY_COLUMN_PATCHES: &[ColumnPatch] = &[
    ColumnPatch {
        table: "categories",
        column: "icon",
        definition: "VARCHAR(100)",
    },
    ColumnPatch {
        table: "categories",
        column: "display_order",
        definition: "INTEGER NOT NULL DEFAULT 0",
    },
    ColumnPatch {
        table: "ai_services",
        column: "pricing_info",
        definition: "TEXT",
    },
    ColumnPatch {
        table: "ai_services",
        column: "difficulty_level",
        definition: "difficulty_level NOT NULL DEFAULT 'beginner'",
    },
    ColumnPatch {
        table: "ai_services",
        column: "is_visible",
        definition: "BOOLEAN NOT NULL DEFAULT TRUE",
    },
    ColumnPatch {
        table: "ai_services",
        column: "is_step_pick",
        definition: "BOOLEAN NOT NULL DEFAULT FALSE",
    },
    ColumnPatch {
        table: "ai_services",
        column: "view_count",
        definition: "BIGINT NOT NULL DEFAULT 0",
    },
    ColumnPatch {
        table: "ai_service_categories",
        column: "is_main_category",
        definition: "BOOLEAN NOT NULL DEFAULT FALSE",
    },
    ColumnPatch {
        table: "ai_service_categories",
        column: "position",
        definition: "INTEGER NOT NULL DEFAULT 0",
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    pub applied: Vec<String>,
    /// Patches whose statement failed, taken as already applied
    pub skipped: Vec<String>,
}

/// Run every patch; a failing `ALTER TABLE` is logged and counted as already applied
pub async fn apply_column_patches(pool: &PgPool, patches: &[ColumnPatch]) -> PatchReport {
    let mut report = PatchReport::default();

    for patch in patches {
        let label = format!("{}.{}", patch.table, patch.column);
        match sqlx::query(&patch.statement()).execute(pool).await {
            Ok(_) => {
                tracing::info!("Added column {}", label);
                report.applied.push(label);
            }
            Err(e) => {
                tracing::warn!("Skipping column {} (assumed present): {}", label, e);
                report.skipped.push(label);
            }
        }
    }

    report
}
