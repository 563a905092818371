//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Header name must be a legal HTTP header name
//! - Addresses must parse, timeouts must be non-zero
//! - Log level must be a level name or `off`
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<ValidatedConfig, Vec<ValidationError>>
//! - Values parsed during validation are handed back instead of re-parsed
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderName;
use tracing_subscriber::filter::LevelFilter;

use crate::config::schema::ServiceConfig;
use crate::trace::parse_header_name;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("tracing.header_name {0:?} is not a valid HTTP header name")]
    InvalidHeaderName(String),

    #[error("{field} {value:?} is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.log_level {0:?} is not a valid log level")]
    InvalidLogLevel(String),
}

/// Values parsed while validating a [`ServiceConfig`].
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub header_name: HeaderName,
}

pub fn validate_config(config: &ServiceConfig) -> Result<ValidatedConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let header_name = match parse_header_name(&config.tracing.header_name) {
        Ok(header_name) => Some(header_name),
        Err(_) => {
            errors.push(ValidationError::InvalidHeaderName(
                config.tracing.header_name.clone(),
            ));
            None
        }
    };

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.log_level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    match header_name {
        Some(header_name) if errors.is_empty() => Ok(ValidatedConfig { header_name }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let validated = validate_config(&ServiceConfig::default()).unwrap();
        assert_eq!(validated.header_name.as_str(), "x-trace-id");
    }

    #[test]
    fn test_returns_normalised_header_name() {
        let mut config = ServiceConfig::default();
        config.tracing.header_name = "X-Correlation-Id".into();

        let validated = validate_config(&config).unwrap();
        assert_eq!(validated.header_name.as_str(), "x-correlation-id");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServiceConfig::default();
        config.tracing.header_name = "bad header".into();
        config.listener.bind_address = "localhost".into();
        config.timeouts.request_secs = 0;
        config.observability.log_level = "verbose".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::InvalidHeaderName("bad header".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::InvalidLogLevel("verbose".into())));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidAddress {
                field: "observability.metrics_address",
                value: "nowhere".into(),
            }]
        );
    }

    #[test]
    fn test_log_level_names() {
        let mut config = ServiceConfig::default();
        for level in ["trace", "DEBUG", "info", "warn", "error", "off"] {
            config.observability.log_level = level.into();
            assert!(validate_config(&config).is_ok(), "{level} should be accepted");
        }

        config.observability.log_level = "verbose".into();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidLogLevel("verbose".into())]
        );
    }

    #[test]
    fn test_empty_header_name_is_invalid() {
        let mut config = ServiceConfig::default();
        config.tracing.header_name = "  ".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidHeaderName(_)));
    }
}
