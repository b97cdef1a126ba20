//! mockraft-server
//!
//! HTTP surface of the mock-interview backend: interview record writes, the
//! cached interview listing, and the cached per-user statistics summary.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod aggregator;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use routes::mock_interview;
use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Cached reads
        .route(
            "/mock-interview/mock-stats/{user_id}",
            get(mock_interview::mock_stats),
        )
        .route(
            "/mock-interview/all-interviews/{user_id}",
            get(mock_interview::all_interviews),
        )
        .route(
            "/mock-interview/mock-stats",
            get(mock_interview::missing_user_id),
        )
        .route(
            "/mock-interview/mock-stats/",
            get(mock_interview::missing_user_id),
        )
        .route(
            "/mock-interview/all-interviews",
            get(mock_interview::missing_user_id),
        )
        .route(
            "/mock-interview/all-interviews/",
            get(mock_interview::missing_user_id),
        )
        .route(
            "/mock-interview/interview/{user_id}/{interview_id}",
            get(mock_interview::get_interview),
        )
        // Writes; each invalidates the user's cached views
        .route(
            "/mock-interview/create-mock-interview",
            post(mock_interview::create_mock_interview),
        )
        .route(
            "/mock-interview/save-answer",
            post(mock_interview::save_answer),
        )
        .route(
            "/mock-interview/save-analysis",
            post(mock_interview::save_analysis),
        )
        .route(
            "/mock-interview/award-points",
            post(mock_interview::award_points),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
