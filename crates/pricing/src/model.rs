use serde::{Deserialize, Serialize};

/// One product to price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    pub product_id: String,
    pub quantity: u32,
}

impl PriceRequest {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Where a pricing result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingSource {
    Api,
    Catalog,
    /// No source produced a price.
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub product_id: String,
    pub standard_price: Option<f64>,
    pub fleet_monthly_price: Option<f64>,
    pub fleet_upfront_cost: Option<f64>,
    pub currency: String,
    pub success: bool,
    pub error: Option<String>,
    pub source: PricingSource,
}

impl PricingResult {
    pub fn failure(
        product_id: impl Into<String>,
        currency: impl Into<String>,
        source: PricingSource,
        error: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            standard_price: None,
            fleet_monthly_price: None,
            fleet_upfront_cost: None,
            currency: currency.into(),
            success: false,
            error: Some(error.into()),
            source,
        }
    }

    pub fn has_price(&self) -> bool {
        self.standard_price.is_some() || self.fleet_monthly_price.is_some()
    }
}

pub(crate) fn any_success(results: &[PricingResult]) -> bool {
    results.iter().any(|r| r.success)
}
