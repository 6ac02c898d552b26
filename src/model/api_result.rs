use super::ApiError;
use rocket::{serde::json::Json, Responder};

#[derive(Responder)]
#[response(bound = "T: rocket::serde::Serialize")]
pub enum ApiResult<T> {
    Ok(Json<T>),
    Err(ApiError),
}

impl<T> ApiResult<T> {
    pub fn ok(val: T) -> ApiResult<T> {
        ApiResult::Ok(Json(val))
    }
}

impl<T> From<ApiError> for ApiResult<T> {
    fn from(e: ApiError) -> Self {
        ApiResult::Err(e)
    }
}
