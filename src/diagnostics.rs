use tracing::{error, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    MethodNotAllowed,
    MalformedBody,
    InvalidRequest,
    UnknownCurrency,
    Upstream,
    Internal,
}

impl Kind {
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Kind::MethodNotAllowed | Kind::MalformedBody | Kind::InvalidRequest | Kind::UnknownCurrency
        )
    }
}

/// A failed request, as seen by the handler that rejected it.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub route: &'static str,
    pub kind: Kind,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(route: &'static str, kind: Kind, detail: impl ToString) -> Diagnostic {
        Diagnostic {
            route,
            kind,
            detail: detail.to_string(),
        }
    }
}

/// Sink for request failures. Handlers get it from managed state.
pub trait Diagnostics: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, diagnostic: &Diagnostic) {
        let Diagnostic {
            route,
            kind,
            detail,
        } = diagnostic;

        if kind.is_client_error() {
            warn!(route, ?kind, %detail, "Rejected request");
        } else {
            error!(route, ?kind, %detail, "Request failed");
        }
    }
}
