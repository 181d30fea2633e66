// routes.rs
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handlers::{self, SharedStore};

pub fn create_routes(store: SharedStore) -> Router {
    let api = Router::new()
        .route("/vote", post(handlers::create_vote))
        .route("/vote/{vote_id}", get(handlers::get_vote))
        .route("/vote/{vote_id}/submit", post(handlers::submit_vote))
        .route("/vote/{vote_id}/results", get(handlers::get_results))
        .route("/vote/{vote_id}/close", post(handlers::close_vote))
        .route(
            "/vote/{vote_id}/candidates/similarity",
            post(handlers::check_candidate_similarity),
        )
        .route("/testing", get(handlers::create_test_vote));

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(store)
}
