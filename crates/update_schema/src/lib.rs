// crates/update_schema/src/lib.rs

pub mod config;
pub mod services;

use anyhow::{Context, Result};
use std::path::PathBuf;

use annotate_schema::{annotate_with_rule, AnnotationRule};
use fetch_schema::{source_for, SchemaSource};

use config::AppConfig;
use services::{FsSchemaWriter, SchemaWriter};

/// What a successful update did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateSummary {
    pub source: String,
    pub output: PathBuf,
    /// Number of `type` fields that received a marker.
    pub annotated: usize,
    pub bytes_written: usize,
}

/// Fetches the schema, annotates it and writes it to `config.output`.
///
/// A failed fetch returns before anything touches the output path. Errors
/// are returned, not logged; the caller reports them.
pub fn update_schema(
    config: &AppConfig,
    source: &dyn SchemaSource,
    writer: &dyn SchemaWriter,
) -> Result<UpdateSummary> {
    let location = source.describe();
    log::info!("Fetching schema from {}", location);

    let schema = source
        .fetch_text()
        .with_context(|| format!("Failed to fetch schema from {}", location))?;

    let annotated = annotate_with_rule(&schema, &AnnotationRule::default());
    log::info!("Annotated {} `type` field(s)", annotated.inserted.len());

    writer
        .write_schema(&config.output, &annotated.document)
        .with_context(|| format!("Failed to write schema to {}", config.output.display()))?;
    log::info!("Wrote {}", config.output.display());

    Ok(UpdateSummary {
        source: location,
        output: config.output.clone(),
        annotated: annotated.inserted.len(),
        bytes_written: annotated.document.len(),
    })
}

/// Runs an update with the real fetcher and filesystem writer.
pub fn run(config: &AppConfig) -> Result<UpdateSummary> {
    let source = source_for(&config.source, config.timeout);
    update_schema(config, source.as_ref(), &FsSchemaWriter)
}
