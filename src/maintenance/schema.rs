use std::collections::BTreeMap;
use std::fmt;

use sqlx::{FromRow, PgPool};

/// One column of a `public` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ColumnInfo {
    pub table_name: String,
    pub column_name: String,
    /// SQL type; enum columns report their enum type name
    pub data_type: String,
    pub is_nullable: bool,
    pub column_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct IndexInfo {
    pub index_name: String,
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub indexes: Vec<IndexInfo>,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.column_name == name)
    }

    pub fn has_index(&self, name: &str) -> bool {
        self.indexes.iter().any(|i| i.index_name == name)
    }
}

/// Tables of a database keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSnapshot {
    pub tables: BTreeMap<String, TableSchema>,
}

impl SchemaSnapshot {
    /// Group columns (already in ordinal order) into tables
    pub fn from_columns(columns: Vec<ColumnInfo>) -> Self {
        let mut tables: BTreeMap<String, TableSchema> = BTreeMap::new();
        for column in columns {
            tables
                .entry(column.table_name.clone())
                .or_insert_with(|| TableSchema {
                    name: column.table_name.clone(),
                    ..Default::default()
                })
                .columns
                .push(column);
        }
        Self { tables }
    }
}

/// Read columns and indexes of every table in the `public` schema.
///
/// A failed index query for one table is logged and leaves that table without indexes.
pub async fn introspect(pool: &PgPool) -> Result<SchemaSnapshot, sqlx::Error> {
    let columns: Vec<ColumnInfo> = sqlx::query_as(
        r#"
        SELECT table_name::text AS table_name,
               column_name::text AS column_name,
               CASE WHEN data_type = 'USER-DEFINED' THEN udt_name::text
                    ELSE data_type::text END AS data_type,
               (is_nullable = 'YES') AS is_nullable,
               column_default::text AS column_default
        FROM information_schema.columns
        WHERE table_schema = 'public'
          AND table_name <> '_sqlx_migrations'
        ORDER BY table_name, ordinal_position
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to read columns: {:?}", e);
        e
    })?;

    let mut snapshot = SchemaSnapshot::from_columns(columns);

    for (name, table) in snapshot.tables.iter_mut() {
        let indexes: Result<Vec<IndexInfo>, sqlx::Error> = sqlx::query_as(
            r#"
            SELECT indexname::text AS index_name, indexdef::text AS definition
            FROM pg_indexes
            WHERE schemaname = 'public' AND tablename = $1
            ORDER BY indexname
            "#,
        )
        .bind(name)
        .fetch_all(pool)
        .await;

        match indexes {
            Ok(indexes) => table.indexes = indexes,
            Err(e) => tracing::warn!("Failed to read indexes of {}: {}", name, e),
        }
    }

    tracing::info!("Introspected {} tables", snapshot.tables.len());

    Ok(snapshot)
}

/// Which database of a comparison lacks an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Current,
    Other,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Current => write!(f, "current"),
            Side::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaDifference {
    MissingTable {
        table: String,
        missing_in: Side,
    },
    MissingColumn {
        table: String,
        column: String,
        missing_in: Side,
    },
    TypeMismatch {
        table: String,
        column: String,
        current: String,
        other: String,
    },
    NullabilityMismatch {
        table: String,
        column: String,
        current: bool,
        other: bool,
    },
    MissingIndex {
        table: String,
        index: String,
        missing_in: Side,
    },
}

impl fmt::Display for SchemaDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTable { table, missing_in } => {
                write!(f, "table `{}` missing in {}", table, missing_in)
            }
            Self::MissingColumn {
                table,
                column,
                missing_in,
            } => write!(f, "column `{}.{}` missing in {}", table, column, missing_in),
            Self::TypeMismatch {
                table,
                column,
                current,
                other,
            } => write!(
                f,
                "column `{}.{}` type differs: current `{}`, other `{}`",
                table, column, current, other
            ),
            Self::NullabilityMismatch {
                table,
                column,
                current,
                other,
            } => write!(
                f,
                "column `{}.{}` nullability differs: current {}, other {}",
                table,
                column,
                nullability(*current),
                nullability(*other)
            ),
            Self::MissingIndex {
                table,
                index,
                missing_in,
            } => write!(f, "index `{}` on `{}` missing in {}", index, table, missing_in),
        }
    }
}

fn nullability(is_nullable: bool) -> &'static str {
    if is_nullable {
        "NULL"
    } else {
        "NOT NULL"
    }
}

/// Compare two snapshots table by table
pub fn diff(current: &SchemaSnapshot, other: &SchemaSnapshot) -> Vec<SchemaDifference> {
    let mut differences = Vec::new();

    for (name, table) in &current.tables {
        let Some(other_table) = other.tables.get(name) else {
            differences.push(SchemaDifference::MissingTable {
                table: name.clone(),
                missing_in: Side::Other,
            });
            continue;
        };

        for column in &table.columns {
            let Some(other_column) = other_table.column(&column.column_name) else {
                differences.push(SchemaDifference::MissingColumn {
                    table: name.clone(),
                    column: column.column_name.clone(),
                    missing_in: Side::Other,
                });
                continue;
            };

            if column.data_type != other_column.data_type {
                differences.push(SchemaDifference::TypeMismatch {
                    table: name.clone(),
                    column: column.column_name.clone(),
                    current: column.data_type.clone(),
                    other: other_column.data_type.clone(),
                });
            }
            if column.is_nullable != other_column.is_nullable {
                differences.push(SchemaDifference::NullabilityMismatch {
                    table: name.clone(),
                    column: column.column_name.clone(),
                    current: column.is_nullable,
                    other: other_column.is_nullable,
                });
            }
        }

        for column in &other_table.columns {
            if table.column(&column.column_name).is_none() {
                differences.push(SchemaDifference::MissingColumn {
                    table: name.clone(),
                    column: column.column_name.clone(),
                    missing_in: Side::Current,
                });
            }
        }

        for index in &table.indexes {
            if !other_table.has_index(&index.index_name) {
                differences.push(SchemaDifference::MissingIndex {
                    table: name.clone(),
                    index: index.index_name.clone(),
                    missing_in: Side::Other,
                });
            }
        }
        for index in &other_table.indexes {
            if !table.has_index(&index.index_name) {
                differences.push(SchemaDifference::MissingIndex {
                    table: name.clone(),
                    index: index.index_name.clone(),
                    missing_in: Side::Current,
                });
            }
        }
    }

    for name in other.tables.keys() {
        if !current.tables.contains_key(name) {
            differences.push(SchemaDifference::MissingTable {
                table: name.clone(),
                missing_in: Side::Current,
            });
        }
    }

    differences
}

/// Markdown document listing every table with its columns and indexes
pub fn render_markdown(snapshot: &SchemaSnapshot) -> String {
    let mut out = String::from("# Database Schema\n");

    for table in snapshot.tables.values() {
        out.push_str(&format!("\n## {}\n\n", table.name));
        out.push_str("| Column | Type | Nullable | Default |\n");
        out.push_str("|--------|------|----------|---------|\n");
        for column in &table.columns {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                column.column_name,
                column.data_type,
                if column.is_nullable { "YES" } else { "NO" },
                column.column_default.as_deref().unwrap_or("")
            ));
        }

        if !table.indexes.is_empty() {
            out.push_str("\n**Indexes**\n\n");
            for index in &table.indexes {
                out.push_str(&format!("- `{}`: `{}`\n", index.index_name, index.definition));
            }
        }
    }

    out
}

/// Approximate DDL for the snapshot (constraints other than indexes are not reproduced)
pub fn render_ddl(snapshot: &SchemaSnapshot) -> String {
    let mut out = String::new();

    for table in snapshot.tables.values() {
        out.push_str(&format!("CREATE TABLE {} (\n", table.name));
        let columns: Vec<String> = table
            .columns
            .iter()
            .map(|c| {
                let mut line = format!("    {} {}", c.column_name, c.data_type);
                if !c.is_nullable {
                    line.push_str(" NOT NULL");
                }
                if let Some(default) = &c.column_default {
                    line.push_str(&format!(" DEFAULT {}", default));
                }
                line
            })
            .collect();
        out.push_str(&columns.join(",\n"));
        out.push_str("\n);\n");

        for index in &table.indexes {
            out.push_str(&format!("{};\n", index.definition));
        }
        out.push('\n');
    }

    out
}

/// Markdown report of a schema comparison
pub fn render_diff_markdown(
    current_label: &str,
    other_label: &str,
    differences: &[SchemaDifference],
) -> String {
    let mut out = format!(
        "# Schema Diff\n\n- current: `{}`\n- other: `{}`\n\n",
        current_label, other_label
    );

    if differences.is_empty() {
        out.push_str("No differences found.\n");
        return out;
    }

    for difference in differences {
        out.push_str(&format!("- {}\n", difference));
    }
    out
}

/// Database URL with the password masked, for reports and logs
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };

    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
        None => url.to_string(),
    }
}
