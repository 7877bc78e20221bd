//! Request helpers driving a router without a network listener.

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Send a bodiless request and return the status and raw body.
///
/// # Panics
///
/// Panics if the request cannot be built or the body cannot be collected.
pub async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Bytes) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, body)
}

/// Send a GET request and return the status and body as UTF-8 text.
///
/// # Panics
///
/// Panics if the body is not valid UTF-8.
pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let (status, body) = send(app, Method::GET, uri).await;
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Send a GET request and return the status and JSON body.
///
/// # Panics
///
/// Panics if the body is not valid JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(app, Method::GET, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}
