//! API error types.

use std::net::SocketAddr;
use std::process::ExitStatus;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use isogames_core::RoutingError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The route mounts could not be composed.
    #[error("routing configuration error: {0}")]
    Routing(#[from] RoutingError),

    /// The listen address is unavailable, typically because the port is
    /// already in use.
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        /// The address that could not be bound.
        addr: SocketAddr,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Network or process I/O error while running.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// The reload file watcher could not be started.
    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// The reload worker process exited unsuccessfully.
    #[error("server worker exited with {0}")]
    Worker(ExitStatus),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer errors produced by the application itself rather than by a
/// mounted sub-router.
#[derive(Debug)]
pub enum ApiError {
    /// No route matched the request path.
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("no route for {path}"),
            ),
        };

        let body = ErrorBody {
            error: error_code,
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError::NotFound("/v1/unknown/".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bind_error_names_the_address() {
        let err = AppError::Bind {
            addr: "127.0.0.1:8000".parse().unwrap(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert!(err.to_string().starts_with("cannot listen on 127.0.0.1:8000"));
    }

    #[test]
    fn test_routing_error_converts_into_app_error() {
        let err: AppError = RoutingError::DuplicatePrefix("/v1/games".into()).into();
        assert!(matches!(err, AppError::Routing(_)));
        assert_eq!(
            err.to_string(),
            "routing configuration error: duplicate mount prefix \"/v1/games\""
        );
    }
}
