use rocket::{
    http::{ContentType, Status},
    request::Request,
    response::{self, Responder, Response},
};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Error response body: `{"code": 400, "message": "..."}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Status, message: impl Into<String>) -> ApiError {
        ApiError {
            code: status.code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Status {
        Status::new(self.code)
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let body = serde_json::to_string(&self).map_err(|_| Status::InternalServerError)?;

        Response::build()
            .header(ContentType::JSON)
            .status(self.status())
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
