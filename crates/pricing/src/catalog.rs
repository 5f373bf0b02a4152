//! Local product catalog used as the pricing fallback.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPricing {
    #[serde(default)]
    pub standard_price: Option<f64>,
    #[serde(default)]
    pub fleet_monthly_price: Option<f64>,
    #[serde(default)]
    pub fleet_upfront_cost: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    /// Ids the pricing API knows this product by.
    #[serde(default)]
    pub api_product_ids: Vec<String>,
    #[serde(default)]
    pub pricing: CatalogPricing,
}

impl CatalogProduct {
    pub fn matches(&self, product_id: &str) -> bool {
        self.api_product_ids.iter().any(|id| id == product_id)
            || self.sku.as_deref() == Some(product_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCategory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<CatalogCategory>,
}

impl Catalog {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn products(&self) -> impl Iterator<Item = &CatalogProduct> {
        self.categories.iter().flat_map(|c| c.products.iter())
    }

    /// First product whose alias list or SKU equals `product_id`.
    pub fn find(&self, product_id: &str) -> Option<&CatalogProduct> {
        self.products().find(|p| p.matches(product_id))
    }
}
