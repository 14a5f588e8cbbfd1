//! Sitegauge: a composite multi-signal website audit engine
//!
//! This crate crawls a site's structure, analyzes content quality, link and
//! anchor quality, and structured-data coverage, and folds all signals plus
//! an optional external performance score into a single comparable 0-100
//! composite score, for one site or a primary-vs-competitors comparison.

pub mod analyze;
pub mod audit;
pub mod config;
pub mod crawl;
pub mod fetch;
pub mod output;
pub mod pagespeed;
pub mod score;
pub mod url;

use thiserror::Error;

/// Main error type for Sitegauge operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Target unreachable: {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL validation errors
///
/// Validation is purely syntactic; no network access happens before a raw
/// address has passed through [`url::normalize_target`].
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("URL input is empty")]
    EmptyInput,

    #[error("Malformed URL: {0}")]
    InvalidFormat(String),

    #[error("Unsupported URL scheme: {0} (only http and https are audited)")]
    UnsupportedScheme(String),

    #[error("URL has no host component")]
    MissingHost,
}

/// Result type alias for Sitegauge operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use audit::{Auditor, ComparativeReport, Finding, Priority, SiteAudit};
pub use config::AuditConfig;
pub use crawl::{SiteGraph, SiteNode};
pub use fetch::{FetchOutcome, PageSnapshot};
pub use score::CompositeScore;
pub use url::{brand_term, normalize_target, AuditTarget};
