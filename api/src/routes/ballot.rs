//! Ballot query and voting endpoints

use crate::ballot_handlers::{cast_vote, get_tally, get_voted, vote_bad, vote_good};
use crate::ApiState;
use axum::{
    routing::{get, post},
    Router,
};

/// Register ballot routes
pub fn ballot_routes() -> Router<ApiState> {
    Router::new()
        .route("/tally", get(get_tally))
        .route("/voted/{identity}", get(get_voted))
        .route("/vote", post(cast_vote))
        .route("/vote/good", post(vote_good))
        .route("/vote/bad", post(vote_bad))
}
