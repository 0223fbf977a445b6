use axum::http::StatusCode;

/// `GET /healthz`: process liveness.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz`: readiness to serve. Plain 200 here; a service with
/// startup dependencies mounts its own handler instead.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
