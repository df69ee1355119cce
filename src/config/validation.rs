//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, statuses are 3xx)
//! - Check redirect rules resolve and do not collide
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ResponderConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ResponderConfig;
use crate::http::redirect::RedirectTarget;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("{field} = {status} is not a redirect status")]
    RedirectStatus { field: String, status: u16 },

    #[error("redirects[{index}].from {from:?} must be a literal path starting with '/'")]
    RuleFrom { index: usize, from: String },

    #[error("redirects[{index}].from {from:?} is defined more than once")]
    DuplicateRule { index: usize, from: String },

    #[error("redirects[{index}].to: {reason}")]
    RuleTarget { index: usize, reason: String },

    #[error("downloads.route_prefix {0:?} must be a literal path starting with '/' and not be '/'")]
    RoutePrefix(String),

    #[error("downloads.read_buffer_bytes must be greater than zero")]
    ZeroReadBuffer,
}

fn is_redirect_status(status: u16) -> bool {
    (300..400).contains(&status)
}

/// Route paths are registered as-is, so captures and wildcards are refused.
fn is_literal_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.contains(['{', '}', '*'])
        && !path.split('/').any(|segment| segment.starts_with(':'))
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ResponderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if !is_redirect_status(config.redirect.default_status) {
        errors.push(ValidationError::RedirectStatus {
            field: "redirect.default_status".into(),
            status: config.redirect.default_status,
        });
    }

    let mut seen = HashSet::new();
    for (index, rule) in config.redirects.iter().enumerate() {
        if !is_literal_path(&rule.from) {
            errors.push(ValidationError::RuleFrom {
                index,
                from: rule.from.clone(),
            });
        } else if !seen.insert(rule.from.as_str()) {
            errors.push(ValidationError::DuplicateRule {
                index,
                from: rule.from.clone(),
            });
        }

        if let Err(e) = RedirectTarget::classify(&rule.to) {
            errors.push(ValidationError::RuleTarget {
                index,
                reason: e.message().to_string(),
            });
        }

        if let Some(status) = rule.status {
            if !is_redirect_status(status) {
                errors.push(ValidationError::RedirectStatus {
                    field: format!("redirects[{index}].status"),
                    status,
                });
            }
        }
    }

    let prefix = &config.downloads.route_prefix;
    if config.downloads.enabled && (!is_literal_path(prefix) || prefix == "/") {
        errors.push(ValidationError::RoutePrefix(prefix.clone()));
    }

    if config.downloads.read_buffer_bytes == 0 {
        errors.push(ValidationError::ZeroReadBuffer);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RedirectRule;

    fn rule(from: &str, to: &str, status: Option<u16>) -> RedirectRule {
        RedirectRule {
            from: from.into(),
            to: to.into(),
            status,
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&ResponderConfig::default()), Ok(()));
    }

    #[test]
    fn collects_every_error() {
        let mut config = ResponderConfig::default();
        config.listener.bind_address = "not-an-addr".into();
        config.timeouts.request_secs = 0;
        config.redirect.default_status = 200;
        config.downloads.read_buffer_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::ZeroReadBuffer));
    }

    #[test]
    fn redirect_rules_are_checked() {
        let mut config = ResponderConfig::default();
        config.redirects = vec![
            rule("/old", "/new", Some(301)),
            rule("/old", "./again", None),
            rule("docs", "https://example.com/docs", None),
            rule("/bad", "foo/bar", Some(200)),
            rule("/users/{id}", "/profile", None),
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![
            ValidationError::DuplicateRule { index: 1, from: "/old".into() },
            ValidationError::RuleFrom { index: 2, from: "docs".into() },
            ValidationError::RuleTarget {
                index: 3,
                reason: "redirect path \"foo/bar\" is missing a leading slash".into(),
            },
            ValidationError::RedirectStatus {
                field: "redirects[3].status".into(),
                status: 200,
            },
            ValidationError::RuleFrom { index: 4, from: "/users/{id}".into() },
        ]);
    }

    #[test]
    fn download_prefix_only_checked_when_enabled() {
        let mut config = ResponderConfig::default();
        config.downloads.route_prefix = "/".into();
        assert!(validate_config(&config).is_ok());

        config.downloads.enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::RoutePrefix("/".into())])
        );
    }

    #[test]
    fn download_prefix_must_be_literal() {
        let mut config = ResponderConfig::default();
        config.downloads.enabled = true;

        for prefix in ["/dl{x", "/files/*rest", "/files/:id", "downloads"] {
            config.downloads.route_prefix = prefix.into();
            assert_eq!(
                validate_config(&config),
                Err(vec![ValidationError::RoutePrefix(prefix.into())]),
                "{prefix}"
            );
        }

        config.downloads.route_prefix = "/files/v1/".into();
        assert!(validate_config(&config).is_ok());
    }
}
