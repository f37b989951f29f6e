pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::diagram::handlers as diagram;
use crate::execution::handlers as execution;
use crate::insights::handlers as insights;
use crate::interview::handlers as interview;
use crate::resume::handlers as resume;
use crate::resume::upload::MAX_RESUME_BYTES;
use crate::roadmap::handlers as roadmap;
use crate::state::AppState;
use crate::whiteboard::handlers as whiteboard;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview API (bearer token required)
        .route(
            "/api/v1/interview/createinterview",
            post(interview::handle_create_interview),
        )
        .route(
            "/api/v1/interview/getinterviews",
            get(interview::handle_get_interviews),
        )
        .route(
            "/api/v1/interview/getinterview/:id",
            get(interview::handle_get_interview),
        )
        // Industry insights API
        .route(
            "/api/industry/insights/:industry",
            get(insights::handle_get_insights),
        )
        .route(
            "/api/industry/insights/:industry/refresh",
            post(insights::handle_refresh_insights),
        )
        // Execution API
        .route("/api/v1/execute", post(execution::handle_execute))
        .route(
            "/api/v1/execute/languages",
            get(execution::handle_languages),
        )
        // Whiteboard API
        .route("/api/v1/whiteboard/import", post(whiteboard::handle_import))
        .route(
            "/api/v1/whiteboard/generate-diagram",
            post(diagram::handle_generate_diagram),
        )
        .route(
            "/api/v1/whiteboard/ws/:client_id",
            get(diagram::handle_diagram_socket),
        )
        // Career tools
        .route("/api/v1/roadmap", post(roadmap::handle_generate_roadmap))
        .route(
            "/api/v1/resume/evaluate",
            post(resume::handle_evaluate_resume).layer(DefaultBodyLimit::max(MAX_RESUME_BYTES)),
        )
        .with_state(state)
}
