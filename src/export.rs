//! Writes rendered CV documents into the export directory.
//!
//! File names carry the subject's identity, the language and a timestamp:
//! `<identity-slug>_cv-<lang>_<YYYYMMDD-HHMMSS>.<ext>`. Each file is written to a
//! temporary file in the target directory and persisted into place, so a
//! failed write never leaves a truncated document behind.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use folio_core::cv::{render_document, DocumentFormat, PdfOptions, RenderedDocument};
use folio_core::model::{CvData, Language};
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

/// Lowercase identity with every run of non-alphanumeric characters collapsed to `-`.
pub fn identity_slug(name: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let re = SEPARATORS.get_or_init(|| {
        Regex::new(r"[^\p{Alphabetic}\p{Nd}]+").expect("separator pattern is valid")
    });
    let lowered = name.to_lowercase();
    let replaced = re.replace_all(&lowered, "-");
    let slug = replaced.trim_matches('-');
    if slug.is_empty() {
        "cv".to_string()
    } else {
        slug.to_string()
    }
}

pub fn export_file_name(
    name: &str,
    language: Language,
    format: DocumentFormat,
    at: DateTime<Utc>,
) -> String {
    format!(
        "{}_cv-{}_{}.{}",
        identity_slug(name),
        language.code(),
        at.format("%Y%m%d-%H%M%S"),
        format.extension()
    )
}

/// Writes `bytes` to `dir/file_name` through a temporary file in `dir`.
pub fn write_document(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {dir:?}"))?;

    let target = dir.join(file_name);
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {dir:?}"))?;
    tmp.write_all(bytes)
        .with_context(|| format!("Failed to write {target:?}"))?;
    tmp.persist(&target).map_err(|e| {
        error!(error = ?e.error, path = ?target, "Failed to persist document");
        anyhow::anyhow!("Failed to persist {:?}: {}", target, e.error)
    })?;

    debug!(path = ?target, size = bytes.len(), "Document written");
    Ok(target)
}

/// Renders every requested `(language, format)` pair and writes it to `output_dir`.
///
/// Returns the written paths in language-major order. Stops at the first failure.
pub fn export_cv(
    data: &CvData,
    formats: &[DocumentFormat],
    languages: &[Language],
    output_dir: &Path,
    pdf_options: &PdfOptions,
    at: DateTime<Utc>,
) -> Result<Vec<PathBuf>> {
    info!(
        formats = formats.len(),
        languages = languages.len(),
        output_dir = ?output_dir,
        "Starting CV export"
    );
    let mut written = Vec::with_capacity(formats.len() * languages.len());
    for &language in languages {
        for &format in formats {
            let RenderedDocument { bytes, .. } =
                render_document(data, format, language, pdf_options).map_err(|e| {
                    error!(error = %e, ?format, %language, "Rendering failed");
                    anyhow::anyhow!("Failed to render {format:?} CV ({language}): {e}")
                })?;
            let file_name = export_file_name(&data.profile.name, language, format, at);
            written.push(write_document(output_dir, &file_name, &bytes)?);
        }
    }
    info!(files = written.len(), "CV export complete");
    Ok(written)
}
