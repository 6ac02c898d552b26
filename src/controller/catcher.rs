use crate::{
    diagnostics::{Diagnostic, Diagnostics, Kind},
    model::ApiError,
};
use rocket::{catch, http::Status, Request};
use std::sync::Arc;

#[catch(default)]
pub fn default(status: Status, req: &Request) -> ApiError {
    let message = format!("Failed to handle {} {}", req.method(), req.uri());

    if status.code >= 500 {
        if let Some(diagnostics) = req.rocket().state::<Arc<dyn Diagnostics>>() {
            diagnostics.report(&Diagnostic::new("catcher", Kind::Internal, &message));
        }
    }

    ApiError::new(status, message)
}
