use crate::{
    diagnostics::{Diagnostic, Diagnostics, Kind},
    model::{ApiError, ApiResult, ConversionRequest, ConversionResult},
    provider::RateProvider,
    service::{conversion, ConvertError},
};
use rocket::{
    delete, get,
    http::{Method, Status},
    options, patch, post, put,
    serde::json::{self, Json, Value},
    State,
};
use std::sync::Arc;

const ROUTE: &str = "/api/convert";

#[post("/convert", data = "<body>")]
pub async fn post(
    body: Result<Json<Value>, json::Error<'_>>,
    provider: &State<Arc<dyn RateProvider>>,
    diagnostics: &State<Arc<dyn Diagnostics>>,
) -> ApiResult<ConversionResult> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(e) => {
            diagnostics.report(&Diagnostic::new(ROUTE, Kind::MalformedBody, &e));
            return ApiError::new(Status::BadRequest, "Bad request: body is not valid JSON").into();
        }
    };

    let req = match ConversionRequest::from_json(&body) {
        Ok(req) => req,
        Err(e) => {
            diagnostics.report(&Diagnostic::new(ROUTE, Kind::InvalidRequest, &e));
            return ApiError::new(Status::BadRequest, e.to_string()).into();
        }
    };

    match conversion::convert(&req, provider.inner().as_ref()).await {
        Ok(res) => ApiResult::ok(res),
        Err(e @ ConvertError::UnknownCurrency { .. }) => {
            diagnostics.report(&Diagnostic::new(ROUTE, Kind::UnknownCurrency, &e));
            ApiError::new(Status::BadRequest, "Invalid currency pair").into()
        }
        Err(e @ ConvertError::NotFinite { .. }) => {
            diagnostics.report(&Diagnostic::new(ROUTE, Kind::Internal, &e));
            ApiError::new(
                Status::InternalServerError,
                "Converted amount is out of range",
            )
            .into()
        }
        Err(ConvertError::Upstream(e)) => {
            let detail = format!("{} (provider {}, base {})", e, provider.name(), req.from);
            diagnostics.report(&Diagnostic::new(ROUTE, Kind::Upstream, detail));
            ApiError::new(
                Status::InternalServerError,
                "Exchange rate provider is unavailable",
            )
            .into()
        }
    }
}

fn not_allowed(method: Method, diagnostics: &State<Arc<dyn Diagnostics>>) -> ApiError {
    diagnostics.report(&Diagnostic::new(ROUTE, Kind::MethodNotAllowed, method));
    ApiError::new(
        Status::MethodNotAllowed,
        format!("Method {} is not allowed, use POST", method),
    )
}

#[get("/convert")]
pub fn get(method: Method, diagnostics: &State<Arc<dyn Diagnostics>>) -> ApiError {
    not_allowed(method, diagnostics)
}

#[put("/convert")]
pub fn put(method: Method, diagnostics: &State<Arc<dyn Diagnostics>>) -> ApiError {
    not_allowed(method, diagnostics)
}

#[delete("/convert")]
pub fn delete(method: Method, diagnostics: &State<Arc<dyn Diagnostics>>) -> ApiError {
    not_allowed(method, diagnostics)
}

#[patch("/convert")]
pub fn patch(method: Method, diagnostics: &State<Arc<dyn Diagnostics>>) -> ApiError {
    not_allowed(method, diagnostics)
}

#[options("/convert")]
pub fn options(method: Method, diagnostics: &State<Arc<dyn Diagnostics>>) -> ApiError {
    not_allowed(method, diagnostics)
}

#[cfg(test)]
mod test {
    use crate::{
        diagnostics::Kind,
        model::{ApiError, ConversionResult},
        test::{setup, setup_unreachable, upstream},
    };
    use rocket::http::{ContentType, Status};
    use std::time::Duration;
    use wiremock::ResponseTemplate;

    const RATES: &str = r#"{"result": "success", "base_code": "USD", "rates": {"USD": 1, "EUR": 0.921, "JPY": 149.37}}"#;

    #[rocket::async_test]
    async fn post() {
        let server = upstream("USD", ResponseTemplate::new(200).set_body_string(RATES)).await;
        let (client, diagnostics) = setup(&server).await;

        let res = client
            .post("/api/convert")
            .header(ContentType::JSON)
            .body(r#"{"from": "USD", "to": "EUR", "amount": 10.5}"#)
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::Ok);
        let body = res.into_json::<ConversionResult>().await.unwrap();
        assert_eq!(body.converted_amount, 10.5 * 0.921);
        assert!(diagnostics.all().is_empty());
    }

    #[rocket::async_test]
    async fn post_integer_amount() {
        let server = upstream("USD", ResponseTemplate::new(200).set_body_string(RATES)).await;
        let (client, _) = setup(&server).await;

        let res = client
            .post("/api/convert")
            .body(r#"{"from": "USD", "to": "JPY", "amount": 3}"#)
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::Ok);
        let body = res.into_string().await.unwrap();
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body, serde_json::json!({ "converted_amount": 3.0 * 149.37 }));
    }

    #[rocket::async_test]
    async fn get_not_allowed() {
        let server = upstream("USD", ResponseTemplate::new(200).set_body_string(RATES)).await;
        let (client, diagnostics) = setup(&server).await;

        let res = client.get("/api/convert").dispatch().await;
        assert_eq!(res.status(), Status::MethodNotAllowed);
        let body = res.into_json::<ApiError>().await.unwrap();
        assert_eq!(body.code, 405);
        assert_eq!(body.message, "Method GET is not allowed, use POST");

        for res in vec![
            client.put("/api/convert").dispatch().await,
            client.delete("/api/convert").dispatch().await,
            client.patch("/api/convert").dispatch().await,
            client.options("/api/convert").dispatch().await,
        ] {
            assert_eq!(res.status(), Status::MethodNotAllowed);
        }

        assert_eq!(diagnostics.kinds(), vec![Kind::MethodNotAllowed; 5]);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[rocket::async_test]
    async fn post_not_json() {
        let server = upstream("USD", ResponseTemplate::new(200).set_body_string(RATES)).await;
        let (client, diagnostics) = setup(&server).await;

        let res = client.post("/api/convert").body("from=USD&to=EUR").dispatch().await;
        assert_eq!(res.status(), Status::BadRequest);

        let res = client.post("/api/convert").dispatch().await;
        assert_eq!(res.status(), Status::BadRequest);

        assert_eq!(diagnostics.kinds(), vec![Kind::MalformedBody; 2]);
    }

    #[rocket::async_test]
    async fn post_not_an_object() {
        let server = upstream("USD", ResponseTemplate::new(200).set_body_string(RATES)).await;
        let (client, diagnostics) = setup(&server).await;

        let res = client.post("/api/convert").body(r#"["USD", "EUR", 10]"#).dispatch().await;
        assert_eq!(res.status(), Status::BadRequest);
        let body = res.into_json::<ApiError>().await.unwrap();
        assert_eq!(body.message, "request body must be a JSON object");
        assert_eq!(diagnostics.kinds(), vec![Kind::InvalidRequest]);
    }

    #[rocket::async_test]
    async fn post_missing_field() {
        let server = upstream("USD", ResponseTemplate::new(200).set_body_string(RATES)).await;
        let (client, diagnostics) = setup(&server).await;

        let res = client
            .post("/api/convert")
            .body(r#"{"from": "USD", "amount": 10}"#)
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);
        let body = res.into_json::<ApiError>().await.unwrap();
        assert_eq!(body.message, "invalid request body: `to` is missing");
        assert_eq!(diagnostics.kinds(), vec![Kind::InvalidRequest]);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[rocket::async_test]
    async fn post_mistyped_fields() {
        let server = upstream("USD", ResponseTemplate::new(200).set_body_string(RATES)).await;
        let (client, _) = setup(&server).await;

        let res = client
            .post("/api/convert")
            .body(r#"{"from": "USD", "to": 978, "amount": "10"}"#)
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);
        let body = res.into_json::<ApiError>().await.unwrap();
        assert_eq!(
            body.message,
            "invalid request body: `to` must be a string; `amount` must be a number"
        );
    }

    #[rocket::async_test]
    async fn post_unknown_currency() {
        let server = upstream("USD", ResponseTemplate::new(200).set_body_string(RATES)).await;
        let (client, diagnostics) = setup(&server).await;

        let res = client
            .post("/api/convert")
            .body(r#"{"from": "USD", "to": "ZZZ", "amount": 10}"#)
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);
        let body = res.into_json::<ApiError>().await.unwrap();
        assert_eq!(body.message, "Invalid currency pair");
        assert_eq!(diagnostics.kinds(), vec![Kind::UnknownCurrency]);
    }

    #[rocket::async_test]
    async fn post_unknown_base() {
        let body = r#"{"result": "error", "error-type": "unsupported-code"}"#;
        let server = upstream("ZZZ", ResponseTemplate::new(404).set_body_string(body)).await;
        let (client, diagnostics) = setup(&server).await;

        let res = client
            .post("/api/convert")
            .body(r#"{"from": "ZZZ", "to": "EUR", "amount": 10}"#)
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);
        let body = res.into_json::<ApiError>().await.unwrap();
        assert_eq!(body.message, "Invalid currency pair");
        assert_eq!(diagnostics.kinds(), vec![Kind::UnknownCurrency]);
    }

    #[rocket::async_test]
    async fn post_result_not_finite() {
        let rates = r#"{"rates": {"USD": 1, "EUR": 10}}"#;
        let server = upstream("USD", ResponseTemplate::new(200).set_body_string(rates)).await;
        let (client, diagnostics) = setup(&server).await;

        let res = client
            .post("/api/convert")
            .body(r#"{"from": "USD", "to": "EUR", "amount": 1e308}"#)
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::InternalServerError);
        let body = res.into_json::<ApiError>().await.unwrap();
        assert_eq!(body.code, 500);
        assert_eq!(body.message, "Converted amount is out of range");
        assert_eq!(diagnostics.kinds(), vec![Kind::Internal]);
    }

    #[rocket::async_test]
    async fn post_upstream_not_json() {
        let server = upstream("USD", ResponseTemplate::new(200).set_body_string("<html></html>")).await;
        let (client, diagnostics) = setup(&server).await;

        let res = client
            .post("/api/convert")
            .body(r#"{"from": "USD", "to": "EUR", "amount": 10}"#)
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::InternalServerError);
        assert_eq!(diagnostics.kinds(), vec![Kind::Upstream]);
    }

    #[rocket::async_test]
    async fn post_upstream_timeout() {
        let rates = ResponseTemplate::new(200)
            .set_body_string(RATES)
            .set_delay(Duration::from_secs(3));
        let server = upstream("USD", rates).await;
        let (client, diagnostics) = setup(&server).await;

        let res = client
            .post("/api/convert")
            .body(r#"{"from": "USD", "to": "EUR", "amount": 10}"#)
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::InternalServerError);
        let body = res.into_json::<ApiError>().await.unwrap();
        assert_eq!(body.message, "Exchange rate provider is unavailable");
        assert_eq!(diagnostics.kinds(), vec![Kind::Upstream]);
    }

    #[rocket::async_test]
    async fn post_upstream_unreachable() {
        let (client, diagnostics) = setup_unreachable().await;

        let res = client
            .post("/api/convert")
            .body(r#"{"from": "USD", "to": "EUR", "amount": 10}"#)
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::InternalServerError);
        assert_eq!(diagnostics.kinds(), vec![Kind::Upstream]);
    }
}
