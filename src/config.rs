//! Runtime configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `FIELDCART_CART_BUFFER` - Cart actor channel capacity (default: 32)
//! - `FIELDCART_PAGE_LIMIT` - Default page size for list screens (default: 50)
//! - `FIELDCART_GUEST_CUSTOMER` - Customer id that collects products while no customer
//!   is selected (default: `guest`)
//!
//! Logging is configured separately through `RUST_LOG`.

use crate::cart::{CartConfig, CustomerId, GUEST_CUSTOMER_ID};
use crate::pagination::DEFAULT_PAGE_LIMIT;
use std::str::FromStr;
use thiserror::Error;

const CART_BUFFER_VAR: &str = "FIELDCART_CART_BUFFER";
const PAGE_LIMIT_VAR: &str = "FIELDCART_PAGE_LIMIT";
const GUEST_CUSTOMER_VAR: &str = "FIELDCART_GUEST_CUSTOMER";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Capacity of the cart actor's request channel
    pub cart_buffer: usize,
    /// Page size used when a screen does not pass one
    pub page_limit: usize,
    /// Customer used while none is active
    pub guest_customer: CustomerId,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cart_buffer: 32,
            page_limit: DEFAULT_PAGE_LIMIT,
            guest_customer: CustomerId::new(GUEST_CUSTOMER_ID),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup, e.g. a map in tests.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let cart_buffer = parse_positive(&lookup, CART_BUFFER_VAR)?.unwrap_or(defaults.cart_buffer);
        let page_limit = parse_positive(&lookup, PAGE_LIMIT_VAR)?.unwrap_or(defaults.page_limit);
        let guest_customer = match lookup(GUEST_CUSTOMER_VAR) {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    GUEST_CUSTOMER_VAR.to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(value) => CustomerId::new(value.trim()),
            None => defaults.guest_customer,
        };

        Ok(Self {
            cart_buffer,
            page_limit,
            guest_customer,
        })
    }

    /// Settings for the cart actor.
    pub fn cart(&self) -> CartConfig {
        CartConfig {
            buffer_size: self.cart_buffer,
            fallback_customer: self.guest_customer.clone(),
        }
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<usize>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match usize::from_str(raw.trim()) {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_limit, 50);
        assert_eq!(config.guest_customer.as_str(), "guest");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("FIELDCART_CART_BUFFER", "8"),
            ("FIELDCART_PAGE_LIMIT", " 20 "),
            ("FIELDCART_GUEST_CUSTOMER", "walk-in"),
        ]))
        .unwrap();
        assert_eq!(config.cart_buffer, 8);
        assert_eq!(config.page_limit, 20);
        assert_eq!(config.cart().fallback_customer.as_str(), "walk-in");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("FIELDCART_PAGE_LIMIT", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "FIELDCART_PAGE_LIMIT"));

        let err = AppConfig::from_lookup(lookup(&[("FIELDCART_CART_BUFFER", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "FIELDCART_CART_BUFFER"));

        assert!(AppConfig::from_lookup(lookup(&[("FIELDCART_GUEST_CUSTOMER", "  ")])).is_err());
    }
}
