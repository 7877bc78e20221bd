//! Routes for the games resource.

use axum::Json;
use axum::routing::get;
use isogames_core::SubRouter;

use super::ResourceStatus;
use crate::state::AppState;

/// GET /
async fn index() -> Json<ResourceStatus> {
    Json(ResourceStatus {
        resource: "games",
        status: "ok",
    })
}

/// Returns the games sub-router, declared relative to its mount prefix.
pub fn router() -> SubRouter<AppState> {
    SubRouter::new().route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::http::StatusCode;
    use isogames_core::RouteAggregator;
    use isogames_test_support::get_json;

    #[tokio::test]
    async fn test_index_reports_games_resource() {
        // Arrange
        let (router, _) = RouteAggregator::new()
            .mount("/games", "Games", router())
            .build()
            .unwrap()
            .into_parts();
        let app = router.with_state(AppState::new(Arc::default()));

        // Act
        let (status, json) = get_json(app, "/games/").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["resource"], "games");
        assert_eq!(json["status"], "ok");
    }

    #[test]
    fn test_declares_only_the_index_path() {
        assert_eq!(router().paths().collect::<Vec<_>>(), vec!["/"]);
    }
}
