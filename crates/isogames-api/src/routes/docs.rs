//! Route index endpoint, grouping mounted routes by documentation tag.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use isogames_core::{MountInfo, RouteIndex};
use serde::Serialize;

use crate::state::AppState;

/// Mounts sharing one documentation tag.
#[derive(Debug, Serialize)]
pub struct TagGroup {
    /// The tag.
    pub name: String,
    /// Mounts carrying the tag, ordered by prefix.
    pub mounts: Vec<MountInfo>,
}

/// Response body for GET /routes.
#[derive(Debug, Serialize)]
pub struct RouteIndexResponse {
    /// One group per tag, in prefix order of first appearance.
    pub tags: Vec<TagGroup>,
}

impl From<&RouteIndex> for RouteIndexResponse {
    fn from(index: &RouteIndex) -> Self {
        let tags = index
            .tags()
            .into_iter()
            .map(|tag| TagGroup {
                name: tag.to_owned(),
                mounts: index
                    .mounts()
                    .iter()
                    .filter(|mount| mount.tag == tag)
                    .cloned()
                    .collect(),
            })
            .collect();

        Self { tags }
    }
}

/// GET /routes
async fn list_routes(State(state): State<AppState>) -> Json<RouteIndexResponse> {
    Json(RouteIndexResponse::from(state.route_index.as_ref()))
}

/// Returns the route index router.
pub fn router() -> Router<AppState> {
    Router::new().route("/routes", get(list_routes))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::StatusCode;
    use isogames_core::RouteAggregator;
    use isogames_test_support::labelled_sub_router;

    #[test]
    fn test_mounts_sharing_a_tag_are_grouped() {
        let composed = RouteAggregator::<()>::new()
            .mount("/v2/games", "Games", labelled_sub_router("games-v2"))
            .mount("/v1/users", "Users", labelled_sub_router("users"))
            .mount("/v1/games", "Games", labelled_sub_router("games"))
            .build()
            .unwrap();

        let response = RouteIndexResponse::from(composed.index());

        let names: Vec<_> = response.tags.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Games", "Users"]);
        let game_prefixes: Vec<_> = response.tags[0]
            .mounts
            .iter()
            .map(|m| m.prefix.as_str())
            .collect();
        assert_eq!(game_prefixes, vec!["/v1/games", "/v2/games"]);
    }

    #[tokio::test]
    async fn test_list_routes_serialises_the_index() {
        let composed = RouteAggregator::<AppState>::new()
            .mount("/v1/games", "Games", labelled_sub_router("games"))
            .build()
            .unwrap();
        let state = AppState::new(std::sync::Arc::new(composed.index().clone()));
        let app = router().with_state(state);

        let (status, json) = isogames_test_support::get_json(app, "/routes").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["tags"][0]["name"], "Games");
        assert_eq!(json["tags"][0]["mounts"][0]["prefix"], "/v1/games");
        assert_eq!(json["tags"][0]["mounts"][0]["paths"][0], "/v1/games/");
    }
}
