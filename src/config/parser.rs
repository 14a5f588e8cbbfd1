use crate::config::types::AuditConfig;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Environment variable consulted when no performance API key is configured
pub const PSI_KEY_ENV: &str = "SITEGAUGE_PSI_API_KEY";

/// Environment variable consulted when no recommendation API key is configured
pub const LLM_KEY_ENV: &str = "SITEGAUGE_LLM_API_KEY";

/// Loads and parses a configuration file from the given path
///
/// Missing sections fall back to their defaults, and API keys absent from
/// the file are picked up from the environment.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(AuditConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<AuditConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut config: AuditConfig = toml::from_str(&content)?;
    apply_env_keys(&mut config);

    validate(&config)?;

    Ok(config)
}

/// Returns the built-in default configuration with environment keys applied
pub fn default_config() -> AuditConfig {
    let mut config = AuditConfig::default();
    apply_env_keys(&mut config);
    config
}

/// Fills in API keys from the environment when the config left them unset
fn apply_env_keys(config: &mut AuditConfig) {
    if config.keys.pagespeed_api_key.is_none() {
        if let Ok(key) = std::env::var(PSI_KEY_ENV) {
            if !key.trim().is_empty() {
                config.keys.pagespeed_api_key = Some(key);
            }
        }
    }
    if config.keys.llm_api_key.is_none() {
        if let Ok(key) = std::env::var(LLM_KEY_ENV) {
            if !key.trim().is_empty() {
                config.keys.llm_api_key = Some(key);
            }
        }
    }
}
