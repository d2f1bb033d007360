// crates/update_schema/src/config.rs

use std::path::PathBuf;
use std::time::Duration;

use schema_marker::{DEFAULT_OUTPUT_PATH, DEFAULT_SCHEMA_URL, DEFAULT_TIMEOUT_SECS};

/// Environment variable overriding the schema location.
pub const SOURCE_ENV: &str = "SCHEMA_SOURCE";
/// Environment variable overriding the output path.
pub const OUTPUT_ENV: &str = "SCHEMA_OUTPUT";

/// Runtime configuration composed from CLI + environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// URL or local path of the upstream schema.
    pub source: String,
    /// Destination of the annotated schema; overwritten on every run.
    pub output: PathBuf,
    pub timeout: Duration,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SCHEMA_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verbose: false,
        }
    }
}

/// Values given on the command line; `None` means "not passed".
#[derive(Clone, Debug, Default)]
pub struct CliArgs {
    pub source: Option<String>,
    pub output: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub verbose: bool,
}

impl AppConfig {
    /// Flags win over environment overrides, which win over the defaults.
    pub fn resolve<F>(args: CliArgs, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let source = args
            .source
            .or_else(|| non_empty(SOURCE_ENV))
            .unwrap_or(defaults.source);
        let output = args
            .output
            .or_else(|| non_empty(OUTPUT_ENV).map(PathBuf::from))
            .unwrap_or(defaults.output);
        let timeout = args
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            source,
            output,
            timeout,
            verbose: args.verbose,
        }
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Resolves against the process environment.
    pub fn from_env(args: CliArgs) -> Self {
        Self::resolve(args, |key| std::env::var(key).ok())
    }
}
