//! Client for the external product pricing API.
//!
//! Failures never escape as errors from the batch operations: every requested
//! product gets a [`PricingResult`] and callers inspect its `success` flag.

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod graphql;
pub mod model;
pub mod transport;

pub use catalog::{Catalog, CatalogCategory, CatalogPricing, CatalogProduct};
pub use client::PricingClient;
pub use config::{AuthStrategy, PricingConfig};
pub use error::{CatalogError, PricingError};
pub use model::{PriceRequest, PricingResult, PricingSource};
pub use transport::{HttpPricingTransport, PricingTransport};
