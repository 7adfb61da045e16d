//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the upstream base URL
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("upstream.base_url '{0}' is not a valid URL")]
    BaseUrl(String),

    #[error("upstream.base_url '{0}' must use http or https")]
    BaseUrlScheme(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            errors.push(ValidationError::BaseUrlScheme(config.upstream.base_url.clone()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::BaseUrl(config.upstream.base_url.clone())),
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("upstream.timeout_secs"));
    }
    if config.upstream.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("upstream.connect_timeout_secs"));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
