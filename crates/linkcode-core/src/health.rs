use std::fmt::Display;

use axum::http::StatusCode;

/// Handler for `GET /healthz`: the process is up and serving.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map the outcome of a dependency probe to a readiness status.
///
/// Services call this from their own `GET /readyz` handler after pinging
/// whatever they depend on. Failures are logged and reported as 503.
pub fn readiness<E: Display>(probe: Result<(), E>) -> StatusCode {
    match probe {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            ::tracing::warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
