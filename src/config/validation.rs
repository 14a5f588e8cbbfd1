use crate::config::types::AuditConfig;
use crate::ConfigError;

/// Validates a loaded configuration
///
/// Checks that crawl bounds and timeouts are usable before any network
/// access happens.
pub fn validate(config: &AuditConfig) -> Result<(), ConfigError> {
    if config.crawl.max_pages == 0 {
        return Err(ConfigError::Validation(
            "crawl.max-pages must be at least 1".to_string(),
        ));
    }

    if config.crawl.max_depth == 0 {
        return Err(ConfigError::Validation(
            "crawl.max-depth must be at least 1".to_string(),
        ));
    }

    if config.fetch.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetch.timeout-secs must be greater than 0".to_string(),
        ));
    }

    if config.fetch.connect_timeout_secs > config.fetch.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "fetch.connect-timeout-secs ({}) exceeds fetch.timeout-secs ({})",
            config.fetch.connect_timeout_secs, config.fetch.timeout_secs
        )));
    }

    if config.fetch.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "fetch.user-agent must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&AuditConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut config = AuditConfig::default();
        config.crawl.max_pages = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_max_depth_rejected() {
        let mut config = AuditConfig::default();
        config.crawl.max_depth = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AuditConfig::default();
        config.fetch.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_connect_timeout_exceeding_total_rejected() {
        let mut config = AuditConfig::default();
        config.fetch.connect_timeout_secs = 60;
        config.fetch.timeout_secs = 30;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = AuditConfig::default();
        config.fetch.user_agent = "   ".to_string();
        assert!(validate(&config).is_err());
    }
}
