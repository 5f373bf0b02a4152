//! Best-effort product pricing: API first, local catalog as fallback.

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::PricingConfig;
use crate::error::PricingError;
use crate::graphql::GraphqlRequest;
use crate::model::{PriceRequest, PricingResult, PricingSource, any_success};
use crate::transport::{HttpPricingTransport, PricingTransport};

#[derive(Debug, Clone)]
pub struct PricingClient<T> {
    transport: T,
    config: PricingConfig,
}

impl PricingClient<HttpPricingTransport> {
    /// Client talking HTTP to `config.endpoint`.
    pub fn http(config: PricingConfig) -> Result<Self, PricingError> {
        let transport = HttpPricingTransport::new(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: PricingTransport> PricingClient<T> {
    pub fn new(transport: T, config: PricingConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// One batched API call. Any call-level failure fails every product with the
    /// same message; there is no partial success for transport errors.
    pub async fn fetch_prices(&self, requests: &[PriceRequest]) -> Vec<PricingResult> {
        if requests.is_empty() {
            return Vec::new();
        }

        let request = GraphqlRequest::product_prices(&self.config, requests);
        let outcome = match self.transport.execute(&request).await {
            Ok(response) => response.into_results(requests, &self.config.currency),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(results) => results,
            Err(e) => {
                warn!(products = requests.len(), error = %e, "pricing API call failed");
                self.uniform_failure(requests, PricingSource::Api, &e.to_string())
            }
        }
    }

    /// Resolve prices from `catalog` by API alias or SKU.
    pub fn fetch_from_catalog(&self, requests: &[PriceRequest], catalog: &Catalog) -> Vec<PricingResult> {
        requests
            .iter()
            .map(|request| {
                let Some(product) = catalog.find(&request.product_id) else {
                    return PricingResult::failure(
                        &request.product_id,
                        &self.config.currency,
                        PricingSource::Catalog,
                        format!("product {} not found in catalog", request.product_id),
                    );
                };

                let pricing = &product.pricing;
                let mut result = PricingResult {
                    product_id: request.product_id.clone(),
                    standard_price: pricing.standard_price,
                    fleet_monthly_price: pricing.fleet_monthly_price,
                    fleet_upfront_cost: pricing.fleet_upfront_cost,
                    currency: pricing
                        .currency
                        .clone()
                        .unwrap_or_else(|| self.config.currency.clone()),
                    success: true,
                    error: None,
                    source: PricingSource::Catalog,
                };
                if !result.has_price() {
                    result.success = false;
                    result.error = Some(format!("catalog has no pricing for product {}", request.product_id));
                }
                result
            })
            .collect()
    }

    /// Retry the API with exponential backoff, then fall back to `catalog`.
    ///
    /// An attempt counts as successful when at least one product was priced.
    pub async fn fetch_prices_with_retry(
        &self,
        requests: &[PriceRequest],
        catalog: Option<&Catalog>,
    ) -> Vec<PricingResult> {
        if requests.is_empty() {
            return Vec::new();
        }

        let max_attempts = self.config.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            let results = self.fetch_prices(requests).await;
            if any_success(&results) {
                debug!(attempt, "pricing API attempt succeeded");
                return results;
            }

            if attempt < max_attempts {
                let delay = self.config.backoff_after(attempt);
                warn!(attempt, ?delay, "pricing API attempt priced nothing; retrying");
                tokio::time::sleep(delay).await;
            }
        }

        if let Some(catalog) = catalog {
            let results = self.fetch_from_catalog(requests, catalog);
            if any_success(&results) {
                info!(products = requests.len(), "pricing served from catalog fallback");
                return results;
            }
        }

        warn!(products = requests.len(), "no pricing source succeeded");
        self.uniform_failure(
            requests,
            PricingSource::None,
            &format!("pricing unavailable after {max_attempts} attempt(s) and catalog fallback"),
        )
    }

    fn uniform_failure(&self, requests: &[PriceRequest], source: PricingSource, message: &str) -> Vec<PricingResult> {
        requests
            .iter()
            .map(|r| PricingResult::failure(&r.product_id, &self.config.currency, source, message))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::GraphqlResponse;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays canned responses in order; errors once the script runs out.
    #[derive(Default)]
    struct ScriptedTransport {
        script: Mutex<VecDeque<Result<GraphqlResponse, PricingError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Result<GraphqlResponse, PricingError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PricingTransport for ScriptedTransport {
        async fn execute(&self, _request: &GraphqlRequest) -> Result<GraphqlResponse, PricingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(PricingError::Transport("script exhausted".to_string())))
        }
    }

    fn fast_config() -> PricingConfig {
        PricingConfig {
            base_backoff_ms: 0,
            ..PricingConfig::new("https://pricing.test/graphql")
        }
    }

    fn client(script: Vec<Result<GraphqlResponse, PricingError>>) -> PricingClient<ScriptedTransport> {
        PricingClient::new(ScriptedTransport::new(script), fast_config())
    }

    fn requests() -> Vec<PriceRequest> {
        vec![PriceRequest::new("r-1", 1), PriceRequest::new("2083668", 3)]
    }

    fn priced(ids: &[&str]) -> GraphqlResponse {
        let nodes: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"productId":"{id}","standardPrice":{{"amount":100.0}},"fleetPrice":{{"monthlyPrice":5.0}}}}"#))
            .collect();
        serde_json::from_str(&format!(r#"{{"data":{{"productPrices":[{}]}}}}"#, nodes.join(","))).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::from_json_str(
            r#"{"categories":[{"name":"Tools","products":[
                {"name":"Combihammer","sku":"2207386","apiProductIds":["r-1"],"pricing":{"standardPrice":899.0,"fleetMonthlyPrice":39.5,"currency":"USD"}},
                {"name":"Range meter","sku":"2083668","pricing":{"standardPrice":459.0}}
            ]}]}"#,
        )
        .unwrap()
    }

    fn server_error() -> Result<GraphqlResponse, PricingError> {
        Err(PricingError::Api {
            status: 503,
            body: "unavailable".to_string(),
        })
    }

    #[tokio::test]
    async fn transport_failure_fails_every_product() {
        let client = client(vec![server_error()]);
        let results = client.fetch_prices(&requests()).await;

        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(!result.success);
            assert_eq!(result.error.as_deref(), Some("pricing API error (503): unavailable"));
            assert_eq!(result.source, PricingSource::Api);
        }
    }

    #[tokio::test]
    async fn partial_api_response_is_returned_as_is() {
        let client = client(vec![Ok(priced(&["r-1"]))]);
        let results = client.fetch_prices(&requests()).await;

        assert!(results[0].success);
        assert_eq!(results[0].standard_price, Some(100.0));
        assert!(!results[1].success);
    }

    #[tokio::test]
    async fn empty_batch_makes_no_call() {
        let client = client(vec![]);
        assert!(client.fetch_prices(&[]).await.is_empty());
        assert!(client.fetch_prices_with_retry(&[], None).await.is_empty());
        assert_eq!(client.transport.calls(), 0);
    }

    #[test]
    fn catalog_lookup_by_alias_and_sku() {
        let client = client(vec![]);
        let mut reqs = requests();
        reqs.push(PriceRequest::new("missing", 1));

        let results = client.fetch_from_catalog(&reqs, &catalog());
        assert!(results[0].success);
        assert_eq!(results[0].standard_price, Some(899.0));
        assert_eq!(results[0].fleet_monthly_price, Some(39.5));
        assert!(results[1].success);
        assert_eq!(results[1].standard_price, Some(459.0));
        assert!(!results[2].success);
        assert_eq!(results[2].error.as_deref(), Some("product missing not found in catalog"));
        assert!(results.iter().all(|r| r.source == PricingSource::Catalog));
    }

    #[tokio::test]
    async fn retry_returns_first_successful_attempt() {
        let client = client(vec![server_error(), Ok(priced(&["r-1", "2083668"]))]);
        let results = client.fetch_prices_with_retry(&requests(), Some(&catalog())).await;

        assert_eq!(client.transport.calls(), 2);
        assert!(results.iter().all(|r| r.success && r.source == PricingSource::Api));
    }

    #[tokio::test]
    async fn exhausted_retries_fall_back_to_catalog() {
        let client = client(vec![server_error(), server_error()]);
        let results = client.fetch_prices_with_retry(&requests(), Some(&catalog())).await;

        assert_eq!(client.transport.calls(), 2);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.success && r.source == PricingSource::Catalog));
    }

    #[tokio::test]
    async fn attempt_pricing_nothing_counts_as_failure() {
        let client = client(vec![Ok(priced(&[])), Ok(priced(&[]))]);
        let results = client.fetch_prices_with_retry(&requests(), Some(&catalog())).await;

        assert_eq!(client.transport.calls(), 2);
        assert!(results.iter().all(|r| r.source == PricingSource::Catalog));
    }

    #[tokio::test]
    async fn no_source_yields_uniform_failure() {
        let client = client(vec![server_error(), server_error()]);
        let empty_catalog = Catalog::default();
        let results = client.fetch_prices_with_retry(&requests(), Some(&empty_catalog)).await;

        assert_eq!(results.len(), 2);
        let first_error = results[0].error.clone();
        assert!(first_error.as_deref().unwrap().starts_with("pricing unavailable after 2 attempt(s)"));
        for result in &results {
            assert!(!result.success);
            assert_eq!(result.source, PricingSource::None);
            assert_eq!(result.error, first_error);
        }
    }

    #[tokio::test]
    async fn without_catalog_failure_is_uniform() {
        let client = client(vec![server_error(), server_error()]);
        let results = client.fetch_prices_with_retry(&requests(), None).await;
        assert!(results.iter().all(|r| !r.success && r.source == PricingSource::None));
    }

    #[tokio::test]
    async fn max_attempts_is_configurable() {
        let config = PricingConfig {
            max_attempts: 3,
            ..fast_config()
        };
        let client = PricingClient::new(
            ScriptedTransport::new(vec![server_error(), server_error(), Ok(priced(&["r-1"]))]),
            config,
        );

        let results = client.fetch_prices_with_retry(&requests(), None).await;
        assert_eq!(client.transport.calls(), 3);
        assert!(results[0].success);
    }
}
