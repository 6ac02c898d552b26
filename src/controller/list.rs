use crate::{
    conf::CurrenciesConf,
    diagnostics::{Diagnostic, Diagnostics, Kind},
    model::{ApiError, ApiResult},
    provider::RateProvider,
    service::currencies,
};
use rocket::{delete, get, http::Status, options, patch, post, put, State};
use std::sync::Arc;

const ROUTE: &str = "/api/list";

type Currencies = ApiResult<Vec<String>>;

async fn list(
    conf: &CurrenciesConf,
    provider: &dyn RateProvider,
    diagnostics: &dyn Diagnostics,
) -> Currencies {
    match currencies::list(&conf.base, provider).await {
        Ok(codes) => ApiResult::ok(codes),
        Err(e) => {
            let detail = format!("{} (provider {}, base {})", e, provider.name(), conf.base);
            diagnostics.report(&Diagnostic::new(ROUTE, Kind::Upstream, detail));
            ApiError::new(
                Status::InternalServerError,
                "Failed to get the list of currencies from the exchange rate provider",
            )
            .into()
        }
    }
}

#[get("/list")]
pub async fn get(
    conf: &State<CurrenciesConf>,
    provider: &State<Arc<dyn RateProvider>>,
    diagnostics: &State<Arc<dyn Diagnostics>>,
) -> Currencies {
    list(conf, provider.inner().as_ref(), diagnostics.inner().as_ref()).await
}

#[post("/list")]
pub async fn post(
    conf: &State<CurrenciesConf>,
    provider: &State<Arc<dyn RateProvider>>,
    diagnostics: &State<Arc<dyn Diagnostics>>,
) -> Currencies {
    list(conf, provider.inner().as_ref(), diagnostics.inner().as_ref()).await
}

#[put("/list")]
pub async fn put(
    conf: &State<CurrenciesConf>,
    provider: &State<Arc<dyn RateProvider>>,
    diagnostics: &State<Arc<dyn Diagnostics>>,
) -> Currencies {
    list(conf, provider.inner().as_ref(), diagnostics.inner().as_ref()).await
}

#[delete("/list")]
pub async fn delete(
    conf: &State<CurrenciesConf>,
    provider: &State<Arc<dyn RateProvider>>,
    diagnostics: &State<Arc<dyn Diagnostics>>,
) -> Currencies {
    list(conf, provider.inner().as_ref(), diagnostics.inner().as_ref()).await
}

#[patch("/list")]
pub async fn patch(
    conf: &State<CurrenciesConf>,
    provider: &State<Arc<dyn RateProvider>>,
    diagnostics: &State<Arc<dyn Diagnostics>>,
) -> Currencies {
    list(conf, provider.inner().as_ref(), diagnostics.inner().as_ref()).await
}

#[options("/list")]
pub async fn options(
    conf: &State<CurrenciesConf>,
    provider: &State<Arc<dyn RateProvider>>,
    diagnostics: &State<Arc<dyn Diagnostics>>,
) -> Currencies {
    list(conf, provider.inner().as_ref(), diagnostics.inner().as_ref()).await
}
