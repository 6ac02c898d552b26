mod conf;
mod controller;
mod diagnostics;
mod model;
mod provider;
mod service;

use anyhow::{anyhow, Result};
use conf::{Conf, CurrenciesConf};
use diagnostics::{Diagnostics, TracingDiagnostics};
use provider::{OpenErApi, RateProvider};
use rocket::{Build, Rocket};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<()> {
    init_tracing();

    let conf = Conf::new()?;
    info!(?conf, "Loaded configuration");

    let provider = OpenErApi::from_conf(&conf.upstream)?;

    let figment = rocket::Config::figment()
        .merge(("address", conf.server.address))
        .merge(("port", conf.server.port));

    prepare(
        rocket::custom(figment),
        conf.currencies.clone(),
        Arc::new(provider),
        Arc::new(TracingDiagnostics),
    )
    .launch()
    .await
    .map_err(|e| anyhow!("Failed to launch the server: {}", e))?;

    Ok(())
}

pub fn prepare(
    rocket: Rocket<Build>,
    currencies: CurrenciesConf,
    provider: Arc<dyn RateProvider>,
    diagnostics: Arc<dyn Diagnostics>,
) -> Rocket<Build> {
    rocket
        .mount("/api", controller::routes())
        .register("/", controller::catchers())
        .manage(currencies)
        .manage(provider)
        .manage(diagnostics)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
