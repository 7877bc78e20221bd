//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use axum::Router;
use isogames_api::app::{self, GAMES_PREFIX, GAMES_TAG, USERS_PREFIX, USERS_TAG};
use isogames_api::state::AppState;
use isogames_core::RouteAggregator;
use isogames_test_support::labelled_sub_router;

/// Build the application exactly as the binary does.
pub fn build_test_app() -> Router {
    app::create_app().unwrap().into_router()
}

/// Build the application with labelled stub sub-routers in place of the
/// games and users routers, so tests can see which mount answered.
pub fn build_stub_app() -> Router {
    let mounts = RouteAggregator::<AppState>::new()
        .mount(GAMES_PREFIX, GAMES_TAG, labelled_sub_router("games"))
        .mount(USERS_PREFIX, USERS_TAG, labelled_sub_router("users"));

    app::build_app(mounts).unwrap().into_router()
}
