// crates/schema_marker/src/lib.rs

//! Literals shared by the annotator, the fetcher and the update tool.

/// The comment line inserted above every bare `type` field.
pub const RENAME_MARKER: &str = "/// @prs.rename = _type";

/// Any line starting with this prefix directly above a field counts as an
/// existing annotation.
pub const DOC_COMMENT_PREFIX: &str = "///";

/// Field name that collides with a reserved word in generated code.
pub const RESERVED_FIELD: &str = "type";

/// Upstream location of the schema.
pub const DEFAULT_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/freeCodeCamp/main/api/prisma/schema.prisma";

/// Where the annotated schema is written, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "./prisma/schema.prisma";

/// Request timeout for the upstream fetch, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
