//! Application factory.
//!
//! Every call builds a fresh, fully-owned application: there is no
//! process-wide routing table, so several applications can coexist.

use std::sync::Arc;

use axum::Router;
use axum::http::Uri;
use isogames_core::{RouteAggregator, RouteIndex, RoutingError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{ApiError, AppError};
use crate::routes;
use crate::state::AppState;

/// Mount prefix of the games sub-router.
pub const GAMES_PREFIX: &str = "/v1/games";
/// Documentation tag of the games sub-router.
pub const GAMES_TAG: &str = "Games";
/// Mount prefix of the users sub-router.
pub const USERS_PREFIX: &str = "/v1/users";
/// Documentation tag of the users sub-router.
pub const USERS_TAG: &str = "Users";

/// Application-level paths that no mount may cover.
pub const RESERVED_PATHS: [&str; 2] = ["/health", "/routes"];

/// A built application: the routing table plus its route index.
#[derive(Debug, Clone)]
pub struct App {
    router: Router,
    route_index: Arc<RouteIndex>,
}

impl App {
    /// The router, ready to be served.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Consume the application, returning its router.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Metadata describing every mount.
    #[must_use]
    pub fn route_index(&self) -> &RouteIndex {
        &self.route_index
    }
}

/// The versioned resource mounts served by the API.
#[must_use]
pub fn default_mounts() -> RouteAggregator<AppState> {
    RouteAggregator::new()
        .mount(GAMES_PREFIX, GAMES_TAG, routes::games::router())
        .mount(USERS_PREFIX, USERS_TAG, routes::users::router())
}

/// Build the application served by the binary.
///
/// # Errors
///
/// Returns `AppError::Routing` if the mounts cannot be composed.
pub fn create_app() -> Result<App, AppError> {
    build_app(default_mounts())
}

/// Build an application from an arbitrary set of mounts.
///
/// # Errors
///
/// Returns `AppError::Routing` if the mounts cannot be composed or a mount
/// covers one of the [`RESERVED_PATHS`].
pub fn build_app(aggregator: RouteAggregator<AppState>) -> Result<App, AppError> {
    let (mounted, index) = aggregator.build()?.into_parts();

    for reserved in RESERVED_PATHS {
        if let Some(mount) = index.mount_for(reserved) {
            return Err(RoutingError::OverlappingPrefix {
                existing: reserved.to_owned(),
                conflicting: mount.prefix.clone(),
            }
            .into());
        }
    }

    let route_index = Arc::new(index);
    let app_state = AppState::new(Arc::clone(&route_index));

    let router = Router::new()
        .merge(routes::health::router())
        .merge(routes::docs::router())
        .merge(mounted)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    info!(
        mounts = route_index.len(),
        tags = ?route_index.tags(),
        "application built"
    );

    Ok(App {
        router,
        route_index,
    })
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_owned())
}
