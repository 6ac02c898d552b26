use crate::model::RateTable;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),
    #[error("failed to read upstream response: {0}")]
    Body(#[source] reqwest::Error),
    #[error("failed to decode upstream response: {0}")]
    Decode(String),
}

#[rocket::async_trait]
pub trait RateProvider: Send + Sync {
    fn name(&self) -> String;

    /// Latest rates of every currency the provider knows, against `base`.
    async fn latest(&self, base: &str) -> Result<RateTable, UpstreamError>;
}
