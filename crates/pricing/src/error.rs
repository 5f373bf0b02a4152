use thiserror::Error;

/// Failure of one call to the pricing API.
///
/// Batch operations turn these into per-product failure results; they are only
/// surfaced directly by the transport layer.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("pricing client misconfigured: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Transport(String),

    #[error("pricing API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("graphql error: {0}")]
    Graphql(String),

    #[error("failed to decode pricing response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
