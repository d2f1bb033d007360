// crates/fetch_schema/src/lib.rs

//! Obtains the raw schema text, either over HTTP or from a local file.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use schema_marker::DEFAULT_TIMEOUT_SECS;
use thiserror::Error;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Why a schema could not be obtained.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Somewhere a schema can be read from.
pub trait SchemaSource {
    /// Human readable location, for logs.
    fn describe(&self) -> String;

    /// Returns the full schema text.
    fn fetch_text(&self) -> Result<String, FetchError>;
}

/// Blocking HTTP GET of a schema URL.
#[derive(Clone, Debug)]
pub struct HttpSource {
    pub url: String,
    pub timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl SchemaSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch_text(&self) -> Result<String, FetchError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| FetchError::Request {
                url: self.url.clone(),
                source,
            })?;

        log::debug!("GET {} (timeout {:?})", self.url, self.timeout);
        let response = client
            .get(&self.url)
            .send()
            .map_err(|source| FetchError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let text = response.text().map_err(|source| FetchError::Body {
            url: self.url.clone(),
            source,
        })?;
        log::debug!("received {} bytes from {}", text.len(), self.url);
        Ok(text)
    }
}

/// A schema already on disk.
#[derive(Clone, Debug)]
pub struct FileSource {
    pub path: PathBuf,
}

impl SchemaSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_text(&self) -> Result<String, FetchError> {
        let text = fs::read_to_string(&self.path).map_err(|source| FetchError::Read {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("read {} bytes from {}", text.len(), self.path.display());
        Ok(text)
    }
}

/// Picks the source for a location string: `http://` and `https://` URLs are
/// fetched, anything else is treated as a local path.
pub fn source_for(location: &str, timeout: Duration) -> Box<dyn SchemaSource> {
    if is_remote(location) {
        Box::new(HttpSource::new(location).with_timeout(timeout))
    } else {
        Box::new(FileSource {
            path: PathBuf::from(location),
        })
    }
}

/// Fetches `url` with the default timeout.
pub fn fetch_text(url: &str) -> Result<String, FetchError> {
    HttpSource::new(url).fetch_text()
}

fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
