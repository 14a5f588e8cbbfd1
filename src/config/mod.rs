//! Configuration module
//!
//! Loads audit settings from a TOML file with built-in defaults, validates
//! bounds, and resolves external-service API keys from the environment.

mod parser;
mod types;
mod validation;

pub use parser::{default_config, load_config, LLM_KEY_ENV, PSI_KEY_ENV};
pub use types::{AuditConfig, CrawlConfig, FetchConfig, HeuristicsConfig, KeyConfig};
pub use validation::validate;
