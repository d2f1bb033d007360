// crates/update_schema/src/services.rs

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Persists the annotated schema.
pub trait SchemaWriter {
    fn write_schema(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Writes to the filesystem through a sibling temp file that is renamed over
/// the destination, so readers never observe a half-written schema.
pub struct FsSchemaWriter;

impl SchemaWriter for FsSchemaWriter {
    fn write_schema(&self, path: &Path, contents: &str) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        temp.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write temp file for {}", path.display()))?;

        // Temp files are created owner-only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .with_context(|| format!("Failed to set permissions for {}", path.display()))?;
        }

        temp.persist(path)
            .map_err(|err| err.error)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}
