//! Stub sub-routers standing in for real endpoint modules.

use axum::http::StatusCode;
use axum::routing::get;
use isogames_core::SubRouter;

/// A sub-router answering `GET /` with `label` and `GET /ping` with
/// `"<label>:pong"`. Lets tests tell which mount served a request.
#[must_use]
pub fn labelled_sub_router<S>(label: &'static str) -> SubRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    SubRouter::new()
        .route("/", get(move || async move { label }))
        .route("/ping", get(move || async move { format!("{label}:pong") }))
}

/// A sub-router answering `GET /` with an empty body and `status`.
#[must_use]
pub fn status_sub_router<S>(status: StatusCode) -> SubRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    SubRouter::new().route("/", get(move || async move { status }))
}
