//! API routes organization
//!
//! - `/` and `/health` - service liveness
//! - `/ballot` - tally queries and vote casting
//!
//! Each submodule is responsible for its own domain and exports a router function.

mod ballot;

use crate::ApiState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

/// Create the main router with all API endpoints
pub fn create_routes() -> Router<ApiState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/ballot", ballot::ballot_routes())
}

async fn root() -> &'static str {
    "Vibes Ballot API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    uptime_secs: u64,
    voters: usize,
}

async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        voters: state.ballot.voter_count(),
    })
}
