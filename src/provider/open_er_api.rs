use crate::{
    conf::UpstreamConf,
    model::RateTable,
    provider::{RateProvider, UpstreamError},
};
use anyhow::{bail, Result};
use reqwest::{Client, Url};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Client of the open.er-api.com `latest` endpoint.
pub struct OpenErApi {
    url: Url,
    timeout: Duration,
    client: Client,
}

impl OpenErApi {
    pub fn new(url: &str, timeout: Duration) -> Result<OpenErApi> {
        let url = Url::parse(url)?;

        if url.cannot_be_a_base() {
            bail!("Upstream URL {} can't be used as a base", url);
        }

        let client = Client::builder()
            .user_agent(concat!("fxgate/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout)
            .build()?;

        Ok(OpenErApi {
            url: url,
            timeout: timeout,
            client: client,
        })
    }

    pub fn from_conf(conf: &UpstreamConf) -> Result<OpenErApi> {
        OpenErApi::new(&conf.url, conf.timeout())
    }

    fn url(&self, base: &str) -> Url {
        let mut url = self.url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(base);
        }
        url
    }

    async fn fetch(&self, base: &str) -> Result<RateTable, UpstreamError> {
        let url = self.url(base);
        debug!(%url, "Requesting rates");

        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| match e.is_timeout() {
                true => UpstreamError::Timeout(self.timeout),
                false => UpstreamError::Transport(e),
            })?;

        let body = res.bytes().await.map_err(UpstreamError::Body)?;
        decode(&body)
    }
}

/// The upstream status code is not consulted: any JSON object decodes, and
/// one without `rates` yields an empty table.
fn decode(body: &[u8]) -> Result<RateTable, UpstreamError> {
    serde_json::from_slice::<RateTable>(body).map_err(|e| UpstreamError::Decode(e.to_string()))
}

#[rocket::async_trait]
impl RateProvider for OpenErApi {
    fn name(&self) -> String {
        "open.er-api.com".into()
    }

    async fn latest(&self, base: &str) -> Result<RateTable, UpstreamError> {
        match timeout(self.timeout, self.fetch(base)).await {
            Ok(res) => res,
            Err(_) => Err(UpstreamError::Timeout(self.timeout)),
        }
    }
}
