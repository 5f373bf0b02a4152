//! Invoicing configuration.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use toolfleet_core::{DomainError, DomainResult};

/// Strategy used to assign rental costs to billing entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMethod {
    #[default]
    Project,
    CostCenter,
    Crew,
    Mixed,
}

impl AllocationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationMethod::Project => "project",
            AllocationMethod::CostCenter => "cost_center",
            AllocationMethod::Crew => "crew",
            AllocationMethod::Mixed => "mixed",
        }
    }
}

impl core::fmt::Display for AllocationMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "project" => Ok(Self::Project),
            "cost_center" | "cost-center" | "costcenter" => Ok(Self::CostCenter),
            "crew" => Ok(Self::Crew),
            "mixed" => Ok(Self::Mixed),
            other => Err(DomainError::validation(format!(
                "unknown allocation method: {other}"
            ))),
        }
    }
}

/// Settings for [`crate::AllocationEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoicingConfig {
    pub allocation_method: AllocationMethod,
    pub include_taxes: bool,
    /// Fraction of the subtotal, e.g. `0.08` for 8%.
    pub tax_rate: f64,
    pub invoice_prefix: String,
    pub payment_terms_days: u32,
}

impl Default for InvoicingConfig {
    fn default() -> Self {
        Self {
            allocation_method: AllocationMethod::Project,
            include_taxes: true,
            tax_rate: 0.08,
            invoice_prefix: "INV".to_string(),
            payment_terms_days: 30,
        }
    }
}

impl InvoicingConfig {
    pub fn with_method(mut self, method: AllocationMethod) -> Self {
        self.allocation_method = method;
        self
    }

    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    pub fn without_taxes(mut self) -> Self {
        self.include_taxes = false;
        self
    }

    /// Defaults overridden by `TOOLFLEET_*` environment variables.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `TOOLFLEET_*` keys.
    ///
    /// Unparseable values are rejected rather than silently ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();

        if let Some(method) = lookup("TOOLFLEET_ALLOCATION_METHOD") {
            config.allocation_method = method.parse()?;
        }
        if let Some(rate) = lookup("TOOLFLEET_TAX_RATE") {
            config.tax_rate = rate
                .trim()
                .parse()
                .map_err(|_| DomainError::validation(format!("invalid TOOLFLEET_TAX_RATE: {rate}")))?;
        }
        if let Some(flag) = lookup("TOOLFLEET_INCLUDE_TAXES") {
            config.include_taxes = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(DomainError::validation(format!(
                        "invalid TOOLFLEET_INCLUDE_TAXES: {flag}"
                    )));
                }
            };
        }
        if let Some(prefix) = lookup("TOOLFLEET_INVOICE_PREFIX") {
            config.invoice_prefix = prefix.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !(self.tax_rate.is_finite() && self.tax_rate >= 0.0) {
            return Err(DomainError::validation(
                "tax_rate must be a finite non-negative number",
            ));
        }
        if self.invoice_prefix.trim().is_empty() {
            return Err(DomainError::validation("invoice_prefix must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_method_parses_wire_names() {
        assert_eq!("cost_center".parse::<AllocationMethod>().unwrap(), AllocationMethod::CostCenter);
        assert_eq!(" Mixed ".parse::<AllocationMethod>().unwrap(), AllocationMethod::Mixed);
        assert!("by_region".parse::<AllocationMethod>().is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: InvoicingConfig =
            serde_json::from_str(r#"{"allocationMethod":"crew","taxRate":0.1}"#).unwrap();
        assert_eq!(config.allocation_method, AllocationMethod::Crew);
        assert_eq!(config.tax_rate, 0.1);
        assert!(config.include_taxes);
        assert_eq!(config.invoice_prefix, "INV");
        assert_eq!(config.payment_terms_days, 30);
    }

    #[test]
    fn negative_tax_rate_is_invalid() {
        let config = InvoicingConfig::default().with_tax_rate(-0.1);
        assert!(config.validate().is_err());
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: std::collections::HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn lookup_without_overrides_yields_defaults() {
        let config = InvoicingConfig::from_lookup(vars(&[])).unwrap();
        assert_eq!(config, InvoicingConfig::default());
    }

    #[test]
    fn lookup_applies_every_override() {
        let config = InvoicingConfig::from_lookup(vars(&[
            ("TOOLFLEET_ALLOCATION_METHOD", "mixed"),
            ("TOOLFLEET_TAX_RATE", " 0.2 "),
            ("TOOLFLEET_INCLUDE_TAXES", "no"),
            ("TOOLFLEET_INVOICE_PREFIX", " RENT "),
        ]))
        .unwrap();

        assert_eq!(config.allocation_method, AllocationMethod::Mixed);
        assert_eq!(config.tax_rate, 0.2);
        assert!(!config.include_taxes);
        assert_eq!(config.invoice_prefix, "RENT");
        assert_eq!(config.payment_terms_days, 30);
    }

    #[test]
    fn lookup_rejects_unknown_method() {
        let err = InvoicingConfig::from_lookup(vars(&[("TOOLFLEET_ALLOCATION_METHOD", "by_region")])).unwrap_err();
        assert_eq!(err, DomainError::validation("unknown allocation method: by_region"));
    }

    #[test]
    fn lookup_rejects_non_numeric_tax_rate() {
        let err = InvoicingConfig::from_lookup(vars(&[("TOOLFLEET_TAX_RATE", "eight")])).unwrap_err();
        assert_eq!(err, DomainError::validation("invalid TOOLFLEET_TAX_RATE: eight"));
    }

    #[test]
    fn lookup_rejects_unrecognized_tax_flag() {
        let err = InvoicingConfig::from_lookup(vars(&[("TOOLFLEET_INCLUDE_TAXES", "maybe")])).unwrap_err();
        assert_eq!(err, DomainError::validation("invalid TOOLFLEET_INCLUDE_TAXES: maybe"));
    }

    #[test]
    fn lookup_validates_the_result() {
        assert!(InvoicingConfig::from_lookup(vars(&[("TOOLFLEET_TAX_RATE", "-0.1")])).is_err());
        assert!(InvoicingConfig::from_lookup(vars(&[("TOOLFLEET_INVOICE_PREFIX", "  ")])).is_err());
    }

    #[test]
    fn empty_prefix_is_invalid() {
        let config = InvoicingConfig {
            invoice_prefix: " ".to_string(),
            ..InvoicingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
