use std::path::{Path, PathBuf};

use ai_directory_core::core::config::DatabaseConfig;
use ai_directory_core::core::database;
use ai_directory_core::maintenance::columns::{apply_column_patches, LEGACY_COLUMN_PATCHES};
use ai_directory_core::maintenance::logos::backfill_logos;
use ai_directory_core::maintenance::schema::{
    diff, introspect, redact_url, render_ddl, render_diff_markdown, render_markdown,
};
use ai_directory_core::shared::constants::DEFAULT_LOGO_PREFIX;
use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Database maintenance for the AI directory. The current database is read from DATABASE_URL.
#[derive(Parser, Debug)]
#[command(name = "maintenance")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Document the current schema as Markdown, optionally with a DDL dump
    SchemaDoc {
        out_md: PathBuf,
        out_sql: Option<PathBuf>,
    },
    /// Compare the current schema with another database
    SchemaDiff {
        other_database_url: String,
        /// Report file; printed to stdout when omitted
        out_md: Option<PathBuf>,
    },
    /// Add columns missing on legacy databases
    AddColumns,
    /// Set logos for services without one
    BackfillLogos {
        logo_dir: PathBuf,
        #[arg(default_value = DEFAULT_LOGO_PREFIX)]
        public_prefix: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DatabaseConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    match cli.command {
        Command::SchemaDoc { out_md, out_sql } => {
            let pool = connect(&config, &config.url).await?;
            schema_doc(&pool, &out_md, out_sql.as_deref()).await
        }
        Command::SchemaDiff {
            other_database_url,
            out_md,
        } => {
            let current = connect(&config, &config.url).await?;
            let other = connect(&config, &other_database_url).await?;
            schema_diff(
                &current,
                &other,
                &config.url,
                &other_database_url,
                out_md.as_deref(),
            )
            .await
        }
        Command::AddColumns => {
            let pool = connect(&config, &config.url).await?;
            let report = apply_column_patches(&pool, LEGACY_COLUMN_PATCHES).await;
            println!(
                "Columns added: {}, skipped (already present): {}",
                report.applied.len(),
                report.skipped.len()
            );
            Ok(())
        }
        Command::BackfillLogos {
            logo_dir,
            public_prefix,
        } => {
            let pool = connect(&config, &config.url).await?;

            let report = backfill_logos(&pool, &logo_dir, &public_prefix)
                .await
                .context("Logo backfill failed")?;
            println!(
                "Logos updated: {}, no file found: {}, failed: {}",
                report.updated,
                report.missing.len(),
                report.failed
            );
            for name in &report.missing {
                println!("  missing: {}", name);
            }
            Ok(())
        }
    }
}

async fn connect(config: &DatabaseConfig, url: &str) -> anyhow::Result<PgPool> {
    let pool = database::create_pool(&config.single_connection(url))
        .await
        .with_context(|| format!("Failed to connect to {}", redact_url(url)))?;
    tracing::info!("Connected to {}", redact_url(url));
    Ok(pool)
}

async fn schema_doc(
    pool: &PgPool,
    markdown_path: &Path,
    ddl_path: Option<&Path>,
) -> anyhow::Result<()> {
    let snapshot = introspect(pool).await.context("Schema introspection failed")?;

    std::fs::write(markdown_path, render_markdown(&snapshot))
        .with_context(|| format!("Failed to write {}", markdown_path.display()))?;
    println!("Schema document written to {}", markdown_path.display());

    if let Some(ddl_path) = ddl_path {
        std::fs::write(ddl_path, render_ddl(&snapshot))
            .with_context(|| format!("Failed to write {}", ddl_path.display()))?;
        println!("Schema DDL written to {}", ddl_path.display());
    }

    Ok(())
}

async fn schema_diff(
    current: &PgPool,
    other: &PgPool,
    current_url: &str,
    other_url: &str,
    out_path: Option<&Path>,
) -> anyhow::Result<()> {
    let current_schema = introspect(current)
        .await
        .context("Introspection of the current database failed")?;
    let other_schema = introspect(other)
        .await
        .context("Introspection of the other database failed")?;

    let differences = diff(&current_schema, &other_schema);
    let report = render_diff_markdown(
        &redact_url(current_url),
        &redact_url(other_url),
        &differences,
    );

    match out_path {
        Some(path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} difference(s) written to {}",
                differences.len(),
                path.display()
            );
        }
        None => print!("{}", report),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("maintenance").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    #[test]
    fn test_schema_doc_with_optional_ddl() {
        assert_eq!(
            parse(&["schema-doc", "schema.md"]).unwrap(),
            Command::SchemaDoc {
                out_md: PathBuf::from("schema.md"),
                out_sql: None,
            }
        );
        assert_eq!(
            parse(&["schema-doc", "schema.md", "schema.sql"]).unwrap(),
            Command::SchemaDoc {
                out_md: PathBuf::from("schema.md"),
                out_sql: Some(PathBuf::from("schema.sql")),
            }
        );
    }

    #[test]
    fn test_subcommand_help_is_not_taken_as_a_path() {
        let err = parse(&["schema-doc", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_missing_required_argument_is_rejected() {
        let err = parse(&["schema-diff"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        assert!(parse(&[]).is_err());
        assert!(parse(&["vacuum"]).is_err());
    }

    #[test]
    fn test_backfill_logos_defaults_prefix() {
        assert_eq!(
            parse(&["backfill-logos", "./logos"]).unwrap(),
            Command::BackfillLogos {
                logo_dir: PathBuf::from("./logos"),
                public_prefix: DEFAULT_LOGO_PREFIX.to_string(),
            }
        );
        assert_eq!(parse(&["add-columns"]).unwrap(), Command::AddColumns);
    }
}
