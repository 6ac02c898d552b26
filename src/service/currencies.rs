use crate::provider::{RateProvider, UpstreamError};

pub async fn list(base: &str, provider: &dyn RateProvider) -> Result<Vec<String>, UpstreamError> {
    Ok(provider.latest(base).await?.currencies())
}
