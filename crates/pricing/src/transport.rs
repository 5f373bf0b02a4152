//! Transport seam for the pricing API.

use async_trait::async_trait;
use tracing::debug;

use crate::config::{AuthStrategy, PricingConfig};
use crate::error::PricingError;
use crate::graphql::{GraphqlRequest, GraphqlResponse};

/// Sends one GraphQL request and returns the decoded response.
///
/// Non-2xx statuses must be reported as [`PricingError::Api`].
#[async_trait]
pub trait PricingTransport: Send + Sync {
    async fn execute(&self, request: &GraphqlRequest) -> Result<GraphqlResponse, PricingError>;
}

/// HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpPricingTransport {
    client: reqwest::Client,
    endpoint: String,
    auth: AuthStrategy,
    headers: Vec<(String, String)>,
}

impl HttpPricingTransport {
    pub fn new(config: &PricingConfig) -> Result<Self, PricingError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PricingError::Config(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            auth: config.auth.clone(),
            headers: config
                .extra_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }
}

#[async_trait]
impl PricingTransport for HttpPricingTransport {
    async fn execute(&self, request: &GraphqlRequest) -> Result<GraphqlResponse, PricingError> {
        let mut req = self.client.post(&self.endpoint).json(request);

        for (name, value) in &self.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        req = match &self.auth {
            AuthStrategy::None => req,
            AuthStrategy::Bearer { token } => req.bearer_auth(token),
            AuthStrategy::Basic { username, password } => req.basic_auth(username, Some(password)),
        };

        let resp = req
            .send()
            .await
            .map_err(|e| PricingError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PricingError::Api {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        debug!(status = status.as_u16(), "pricing API responded");
        resp.json::<GraphqlResponse>()
            .await
            .map_err(|e| PricingError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_transport_requires_endpoint() {
        let err = HttpPricingTransport::new(&PricingConfig::default()).unwrap_err();
        assert!(matches!(err, PricingError::Config(_)));
    }

    #[test]
    fn http_transport_builds_from_valid_config() {
        let mut config = PricingConfig::new("https://pricing.test/graphql");
        config.extra_headers.insert("User-Agent".to_string(), "toolfleet".to_string());
        let transport = HttpPricingTransport::new(&config).unwrap();
        assert_eq!(transport.headers.len(), 1);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let mut config = PricingConfig::new("http://127.0.0.1:9/graphql");
        config.timeout_secs = 2;
        let transport = HttpPricingTransport::new(&config).unwrap();
        let request = GraphqlRequest::product_prices(&config, &[]);

        let err = transport.execute(&request).await.unwrap_err();
        assert!(matches!(err, PricingError::Transport(_)));
    }
}
