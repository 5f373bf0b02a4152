//! Wire types for the batched product-price GraphQL query.

use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;
use crate::error::PricingError;
use crate::model::{PriceRequest, PricingResult, PricingSource};

pub const PRODUCT_PRICES_QUERY: &str = r#"query ProductPrices($input: ProductPricesInput!) {
  productPrices(input: $input) {
    productId
    currency
    standardPrice { amount }
    fleetPrice { monthlyPrice upfrontCost }
  }
}"#;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub operation_name: &'static str,
    pub query: &'static str,
    pub variables: Variables,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variables {
    pub input: ProductPricesInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricesInput {
    pub products: Vec<PriceRequest>,
    pub currency: String,
    pub country: String,
    pub language: String,
    pub include_fleet_pricing: bool,
    pub include_subscription_pricing: bool,
}

impl GraphqlRequest {
    pub fn product_prices(config: &PricingConfig, requests: &[PriceRequest]) -> Self {
        Self {
            operation_name: "ProductPrices",
            query: PRODUCT_PRICES_QUERY,
            variables: Variables {
                input: ProductPricesInput {
                    products: requests.to_vec(),
                    currency: config.currency.clone(),
                    country: config.country.clone(),
                    language: config.language.clone(),
                    include_fleet_pricing: config.include_fleet_pricing,
                    include_subscription_pricing: config.include_subscription_pricing,
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<ProductPricesData>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricesData {
    #[serde(default)]
    pub product_prices: Vec<ProductPriceNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPriceNode {
    pub product_id: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub standard_price: Option<Money>,
    #[serde(default)]
    pub fleet_price: Option<FleetPrice>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Money {
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetPrice {
    #[serde(default)]
    pub monthly_price: Option<f64>,
    #[serde(default)]
    pub upfront_cost: Option<f64>,
}

impl GraphqlResponse {
    /// One result per request, in request order.
    ///
    /// A response with errors and no data fails the whole batch; products missing
    /// from the data fail individually.
    pub fn into_results(
        self,
        requests: &[PriceRequest],
        default_currency: &str,
    ) -> Result<Vec<PricingResult>, PricingError> {
        let Some(data) = self.data else {
            let message = if self.errors.is_empty() {
                "response contained no data".to_string()
            } else {
                self.errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            return Err(PricingError::Graphql(message));
        };

        Ok(requests
            .iter()
            .map(|request| {
                let Some(node) = data
                    .product_prices
                    .iter()
                    .find(|n| n.product_id == request.product_id)
                else {
                    return PricingResult::failure(
                        &request.product_id,
                        default_currency,
                        PricingSource::Api,
                        "product not returned by pricing API",
                    );
                };
                node_to_result(node, default_currency)
            })
            .collect())
    }
}

fn node_to_result(node: &ProductPriceNode, default_currency: &str) -> PricingResult {
    let currency = node
        .currency
        .clone()
        .unwrap_or_else(|| default_currency.to_string());

    let mut result = PricingResult {
        product_id: node.product_id.clone(),
        standard_price: node.standard_price.as_ref().map(|m| m.amount),
        fleet_monthly_price: node.fleet_price.as_ref().and_then(|f| f.monthly_price),
        fleet_upfront_cost: node.fleet_price.as_ref().and_then(|f| f.upfront_cost),
        currency,
        success: true,
        error: None,
        source: PricingSource::Api,
    };

    if !result.has_price() {
        result.success = false;
        result.error = Some("pricing API returned no price".to_string());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requests() -> Vec<PriceRequest> {
        vec![PriceRequest::new("r-1", 2), PriceRequest::new("r-2", 1), PriceRequest::new("r-3", 1)]
    }

    #[test]
    fn request_carries_localization_and_flags() {
        let config = PricingConfig::new("https://pricing.test/graphql");
        let body = serde_json::to_value(GraphqlRequest::product_prices(&config, &requests())).unwrap();

        assert_eq!(body["operationName"], "ProductPrices");
        let input = &body["variables"]["input"];
        assert_eq!(input["products"][0]["productId"], "r-1");
        assert_eq!(input["products"][0]["quantity"], 2);
        assert_eq!(input["currency"], "USD");
        assert_eq!(input["country"], "US");
        assert_eq!(input["includeFleetPricing"], true);
    }

    #[test]
    fn response_maps_each_request() {
        let response: GraphqlResponse = serde_json::from_str(
            r#"{"data":{"productPrices":[
                {"productId":"r-2","currency":"EUR","standardPrice":{"amount":120.0},"fleetPrice":{"monthlyPrice":9.5,"upfrontCost":0}},
                {"productId":"r-1","standardPrice":null,"fleetPrice":null}
            ]}}"#,
        )
        .unwrap();

        let results = response.into_results(&requests(), "USD").unwrap();
        assert_eq!(results.len(), 3);

        assert!(!results[0].success);
        assert_eq!(results[0].error.as_deref(), Some("pricing API returned no price"));

        assert!(results[1].success);
        assert_eq!(results[1].currency, "EUR");
        assert_eq!(results[1].standard_price, Some(120.0));
        assert_eq!(results[1].fleet_monthly_price, Some(9.5));
        assert_eq!(results[1].fleet_upfront_cost, Some(0.0));

        assert!(!results[2].success);
        assert_eq!(results[2].error.as_deref(), Some("product not returned by pricing API"));
    }

    #[test]
    fn errors_without_data_fail_the_batch() {
        let response: GraphqlResponse =
            serde_json::from_str(r#"{"errors":[{"message":"unauthorized"},{"message":"try later"}]}"#).unwrap();
        let err = response.into_results(&requests(), "USD").unwrap_err();
        assert_eq!(err.to_string(), "graphql error: unauthorized; try later");
    }
}
