use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::shared::constants::LOGO_EXTENSIONS;

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Logo file stem for a service name: lowercase ASCII words joined by `-`
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// File name of the first `<slug>.<ext>` present in `dir`
pub fn find_logo(dir: &Path, service_name: &str) -> Option<String> {
    let slug = slugify(service_name);
    if slug.is_empty() {
        return None;
    }

    LOGO_EXTENSIONS
        .iter()
        .map(|ext| format!("{}.{}", slug, ext))
        .find(|file| dir.join(file).is_file())
}

pub fn public_logo_path(prefix: &str, file: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), file)
}

#[derive(Debug, FromRow)]
struct LogoCandidate {
    id: Uuid,
    name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub updated: usize,
    /// Services without a matching file
    pub missing: Vec<String>,
    pub failed: usize,
}

/// Set `logo` for services without one when a matching file exists in `logo_dir`
pub async fn backfill_logos(
    pool: &PgPool,
    logo_dir: &Path,
    public_prefix: &str,
) -> Result<BackfillReport, sqlx::Error> {
    let candidates: Vec<LogoCandidate> = sqlx::query_as(
        r#"
        SELECT id, name
        FROM ai_services
        WHERE logo IS NULL OR logo = ''
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list services without logo: {:?}", e);
        e
    })?;

    tracing::info!("{} services without logo", candidates.len());

    let mut report = BackfillReport::default();
    for candidate in candidates {
        let Some(file) = find_logo(logo_dir, &candidate.name) else {
            tracing::debug!("No logo file for {}", candidate.name);
            report.missing.push(candidate.name);
            continue;
        };

        let logo = public_logo_path(public_prefix, &file);
        let result =
            sqlx::query("UPDATE ai_services SET logo = $1, updated_at = NOW() WHERE id = $2")
                .bind(&logo)
                .bind(candidate.id)
                .execute(pool)
                .await;

        match result {
            Ok(_) => {
                tracing::info!("Logo set: {} -> {}", candidate.name, logo);
                report.updated += 1;
            }
            Err(e) => {
                tracing::warn!("Failed to set logo for {}: {}", candidate.name, e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
