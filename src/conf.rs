use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::{env, net::IpAddr, time::Duration};

#[derive(Clone, Debug, Deserialize)]
pub struct Conf {
    pub server: ServerConf,
    pub upstream: UpstreamConf,
    pub currencies: CurrenciesConf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConf {
    pub address: IpAddr,
    pub port: u16,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpstreamConf {
    pub url: String,
    pub timeout_secs: u64,
}

impl UpstreamConf {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings of the currency list endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct CurrenciesConf {
    /// Base currency the list is fetched against.
    pub base: String,
}

impl Conf {
    pub fn new() -> Result<Conf> {
        let conf: Conf = Conf::figment().extract()?;
        Ok(conf)
    }

    /// Embedded defaults, then the file named by `FXGATE_CONF`, then
    /// `FXGATE_*` variables (`__` separates nested keys).
    pub fn figment() -> Figment {
        let default_conf = include_str!("../fxgate.conf");
        let mut figment = Figment::new().merge(Toml::string(default_conf));

        if let Ok(custom_conf_path) = env::var("FXGATE_CONF") {
            figment = figment.merge(Toml::file(custom_conf_path));
        }

        figment.merge(Env::prefixed("FXGATE_").split("__"))
    }
}
