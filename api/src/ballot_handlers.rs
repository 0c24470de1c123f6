//! API handlers for the vibes ballot

use crate::{ApiError, ApiResult, ApiState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing as log;
use validator::Validate;
use vibes_ballot::{Identity, Tally, VoteChoice};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct VoterRequest {
    #[validate(length(min = 1, max = 256))]
    pub voter: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CastVoteRequest {
    #[validate(length(min = 1, max = 256))]
    pub voter: String,
    pub choice: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TallyResponse {
    pub good: u64,
    pub bad: u64,
    pub total: u64,
    pub good_percentage: u64,
    pub bad_percentage: u64,
}

impl From<Tally> for TallyResponse {
    fn from(tally: Tally) -> Self {
        Self {
            good: tally.good,
            bad: tally.bad,
            total: tally.total(),
            good_percentage: tally.percentage(VoteChoice::Good),
            bad_percentage: tally.percentage(VoteChoice::Bad),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VotedResponse {
    pub identity: String,
    pub has_voted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoteResponse {
    pub success: bool,
    pub choice: VoteChoice,
    pub message: String,
    pub tally: TallyResponse,
}

/// Current tally with display percentages
pub async fn get_tally(State(state): State<ApiState>) -> ApiResult<Json<TallyResponse>> {
    crate::ok_json!(TallyResponse::from(state.ballot.tally()))
}

/// Whether an identity has already voted
pub async fn get_voted(
    State(state): State<ApiState>,
    Path(identity): Path<String>,
) -> ApiResult<Json<VotedResponse>> {
    let voter = parse_identity(&identity)?;

    crate::ok_json!(VotedResponse {
        has_voted: state.ballot.has_voted(&voter),
        identity,
    })
}

/// Cast a vote with the choice given in the body
pub async fn cast_vote(
    State(state): State<ApiState>,
    payload: Result<Json<CastVoteRequest>, JsonRejection>,
) -> ApiResult<Json<VoteResponse>> {
    let Json(request) = payload?;
    request
        .validate()
        .map_err(|e| ApiError::InvalidIdentity(format!("Validation failed: {}", e)))?;

    let choice: VoteChoice = request.choice.parse().map_err(ApiError::InvalidChoice)?;

    record_vote(&state, &request.voter, choice).await
}

pub async fn vote_good(
    State(state): State<ApiState>,
    payload: Result<Json<VoterRequest>, JsonRejection>,
) -> ApiResult<Json<VoteResponse>> {
    let Json(request) = payload?;
    request
        .validate()
        .map_err(|e| ApiError::InvalidIdentity(format!("Validation failed: {}", e)))?;

    record_vote(&state, &request.voter, VoteChoice::Good).await
}

pub async fn vote_bad(
    State(state): State<ApiState>,
    payload: Result<Json<VoterRequest>, JsonRejection>,
) -> ApiResult<Json<VoteResponse>> {
    let Json(request) = payload?;
    request
        .validate()
        .map_err(|e| ApiError::InvalidIdentity(format!("Validation failed: {}", e)))?;

    record_vote(&state, &request.voter, VoteChoice::Bad).await
}

fn parse_identity(raw: &str) -> ApiResult<Identity> {
    let voter = Identity::from(raw);
    if voter.is_empty() {
        return Err(ApiError::InvalidIdentity(
            "Voter identity cannot be empty".to_string(),
        ));
    }
    Ok(voter)
}

async fn record_vote(
    state: &ApiState,
    raw_voter: &str,
    choice: VoteChoice,
) -> ApiResult<Json<VoteResponse>> {
    let voter = parse_identity(raw_voter)?;

    let tally = match state.ballot.cast(&voter, choice) {
        Ok(tally) => tally,
        Err(e) => {
            log::debug!(voter = %voter, choice = %choice, error = %e, "vote_rejected");
            return Err(e.into());
        }
    };

    log::info!(
        voter = %voter,
        choice = %choice,
        good = tally.good,
        bad = tally.bad,
        "vote_cast"
    );

    // The vote already counts in memory; a failed write is reported but not undone.
    if let Err(e) = state.persist().await {
        log::error!(voter = %voter, error = %e, "ballot_persist_failed");
        return Err(e.into());
    }

    crate::ok_json!(VoteResponse {
        success: true,
        choice,
        message: format!("You voted for {} vibes!", choice),
        tally: tally.into(),
    })
}
