//! Pricing client configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// How requests to the pricing API authenticate.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthStrategy {
    #[default]
    None,
    Bearer { token: String },
    Basic { username: String, password: String },
}

impl core::fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AuthStrategy::None => f.write_str("None"),
            AuthStrategy::Bearer { .. } => f.write_str("Bearer { token: <redacted> }"),
            AuthStrategy::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    pub currency: String,
    pub country: String,
    pub language: String,
    pub include_fleet_pricing: bool,
    pub include_subscription_pricing: bool,
    /// Primary-path attempts before falling back to the catalog.
    pub max_attempts: u32,
    /// Delay unit for exponential backoff; the wait after attempt `n` is `2^n` units.
    pub base_backoff_ms: u64,
    pub timeout_secs: u64,
    pub auth: AuthStrategy,
    /// Sent verbatim with every request (user agent, origin, API keys the vendor expects).
    pub extra_headers: BTreeMap<String, String>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            currency: "USD".to_string(),
            country: "US".to_string(),
            language: "en".to_string(),
            include_fleet_pricing: true,
            include_subscription_pricing: true,
            max_attempts: 2,
            base_backoff_ms: 1000,
            timeout_secs: 30,
            auth: AuthStrategy::None,
            extra_headers: BTreeMap::new(),
        }
    }
}

impl PricingConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `PRICING_API_ENDPOINT`, `PRICING_API_TOKEN` and
    /// `PRICING_MAX_ATTEMPTS`.
    pub fn from_env() -> Result<Self, PricingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `PRICING_*` keys.
    ///
    /// The endpoint is not required here; [`PricingConfig::validate`] checks it
    /// when a transport is built.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PricingError> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("PRICING_API_ENDPOINT") {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(token) = lookup("PRICING_API_TOKEN") {
            config.auth = AuthStrategy::Bearer { token };
        }
        if let Some(attempts) = lookup("PRICING_MAX_ATTEMPTS") {
            config.max_attempts = attempts.trim().parse().map_err(|_| {
                PricingError::Config(format!("invalid PRICING_MAX_ATTEMPTS: {attempts}"))
            })?;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        if self.endpoint.trim().is_empty() {
            return Err(PricingError::Config("pricing endpoint not configured".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(PricingError::Config("max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Wait after failed attempt `attempt` (1-based): `2^attempt × base_backoff`.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.min(16);
        Duration::from_millis(self.base_backoff_ms.saturating_mul(factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_attempt() {
        let config = PricingConfig::default();
        assert_eq!(config.backoff_after(1), Duration::from_secs(2));
        assert_eq!(config.backoff_after(2), Duration::from_secs(4));
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        assert!(PricingConfig::default().validate().is_err());
        assert!(PricingConfig::new("https://pricing.test/graphql").validate().is_ok());
    }

    #[test]
    fn auth_debug_redacts_secrets() {
        let auth = AuthStrategy::Basic {
            username: "svc".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{auth:?}");
        assert!(rendered.contains("svc"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn auth_deserializes_tagged() {
        let config: PricingConfig = serde_json::from_str(
            r#"{"endpoint":"https://pricing.test/graphql","auth":{"type":"bearer","token":"abc"}}"#,
        )
        .unwrap();
        assert_eq!(config.auth, AuthStrategy::Bearer { token: "abc".to_string() });
        assert_eq!(config.max_attempts, 2);
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn lookup_applies_overrides() {
        let config = PricingConfig::from_lookup(vars(&[
            ("PRICING_API_ENDPOINT", " https://pricing.test/graphql "),
            ("PRICING_API_TOKEN", "secret"),
            ("PRICING_MAX_ATTEMPTS", "4"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "https://pricing.test/graphql");
        assert_eq!(config.auth, AuthStrategy::Bearer { token: "secret".to_string() });
        assert_eq!(config.max_attempts, 4);
        assert_eq!(config.currency, "USD");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn lookup_without_overrides_yields_defaults() {
        let config = PricingConfig::from_lookup(vars(&[])).unwrap();
        assert_eq!(config, PricingConfig::default());
        assert!(config.validate().is_err());
    }

    #[test]
    fn lookup_rejects_non_numeric_attempts() {
        let err = PricingConfig::from_lookup(vars(&[("PRICING_MAX_ATTEMPTS", "two")])).unwrap_err();
        assert!(matches!(err, PricingError::Config(_)));
        assert_eq!(err.to_string(), "pricing client misconfigured: invalid PRICING_MAX_ATTEMPTS: two");
    }

    #[test]
    fn zero_attempts_parse_but_fail_validation() {
        let config = PricingConfig::from_lookup(vars(&[
            ("PRICING_API_ENDPOINT", "https://pricing.test/graphql"),
            ("PRICING_MAX_ATTEMPTS", "0"),
        ]))
        .unwrap();
        assert!(config.validate().is_err());
    }
}
