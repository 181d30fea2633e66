// handlers.rs
use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::error::{ApiError, StoreError};
use crate::models::{
    Ballot, CloseVoteRequest, CreateVoteRequest, CreateVoteResponse, ResultsResponse,
    SimilarityCheckRequest, SimilarityCheckResponse, SubmitBallotRequest, SubmitBallotResponse,
    VoteDefinition, VoteStatus, DEFAULT_POINTS_PER_VOTER, DEFAULT_REVEAL_DURATION_SECS,
};
use crate::similarity;
use crate::store::VoteStore;

pub type SharedStore = Arc<VoteStore>;

/// Publish a new vote
pub async fn create_vote(
    State(store): State<SharedStore>,
    Json(request): Json<CreateVoteRequest>,
) -> Result<Json<CreateVoteResponse>, ApiError> {
    let definition = build_definition(request)?;
    let vote_id = store.create_vote(definition);
    Ok(Json(CreateVoteResponse { vote_id }))
}

/// Fetch a vote's public definition
pub async fn get_vote(
    State(store): State<SharedStore>,
    Path(vote_id): Path<String>,
) -> Result<Json<VoteDefinition>, ApiError> {
    let definition = store.definition(&vote_id).ok_or(StoreError::NotFound)?;
    Ok(Json(definition))
}

/// Record one user's point allocation, replacing any earlier one
pub async fn submit_vote(
    State(store): State<SharedStore>,
    Path(vote_id): Path<String>,
    Json(request): Json<SubmitBallotRequest>,
) -> Result<Json<SubmitBallotResponse>, ApiError> {
    if request.user_id.trim().is_empty() || request.user_vote.is_empty() {
        return Err(ApiError::validation(
            "Missing required fields: userId and userVote",
        ));
    }

    store.submit_ballot(&vote_id, &request.user_id, request.user_vote)?;
    info!(%vote_id, user_id = %request.user_id, "submitted vote");
    Ok(Json(SubmitBallotResponse { success: true }))
}

/// Aggregated totals plus current status
pub async fn get_results(
    State(store): State<SharedStore>,
    Path(vote_id): Path<String>,
) -> Result<Json<ResultsResponse>, ApiError> {
    let (definition, candidates) = store.results(&vote_id)?;
    Ok(Json(ResultsResponse {
        vote_name: definition.vote_name,
        status: definition.status,
        candidates,
        gradual_reveal_enabled: definition.gradual_reveal_enabled,
        reveal_duration_seconds: definition.reveal_duration_seconds,
    }))
}

/// Close the vote, creator only
pub async fn close_vote(
    State(store): State<SharedStore>,
    Path(vote_id): Path<String>,
    Json(request): Json<CloseVoteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if request.creator_token.is_empty() {
        return Err(ApiError::validation(
            "Creator token is required for authorization",
        ));
    }

    store.close(&vote_id, &request.creator_token)?;
    Ok(Json(json!({ "message": "Vote successfully closed." })))
}

/// Score a proposed candidate name against the vote's existing candidates.
/// Read-only: the candidate list itself is fixed at creation.
pub async fn check_candidate_similarity(
    State(store): State<SharedStore>,
    Path(vote_id): Path<String>,
    Json(request): Json<SimilarityCheckRequest>,
) -> Result<Json<SimilarityCheckResponse>, ApiError> {
    if request.new_candidate.trim().is_empty() {
        return Err(ApiError::validation("Candidate name cannot be empty"));
    }

    let definition = store.definition(&vote_id).ok_or(StoreError::NotFound)?;
    let check = similarity::similarity_check(&request.new_candidate, &definition.candidates).await;
    Ok(Json(SimilarityCheckResponse {
        is_similar: check.is_similar,
        similarity_score: check.similarity_score,
    }))
}

/// Seed a demo vote with two ballots already cast
pub async fn create_test_vote(
    State(store): State<SharedStore>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let definition = VoteDefinition {
        vote_name: "Test Vote".to_string(),
        candidates: vec![
            "Option A".to_string(),
            "Option B".to_string(),
            "Option C".to_string(),
        ],
        status: VoteStatus::Open,
        max_voters: None,
        points_per_voter: DEFAULT_POINTS_PER_VOTER,
        voting_end_date: None,
        creator_token: "test-creator".to_string(),
        gradual_reveal_enabled: false,
        reveal_duration_seconds: DEFAULT_REVEAL_DURATION_SECS,
        created_at: chrono::Utc::now(),
    };
    let vote_id = store.create_vote(definition);

    let vote_1: Ballot = [("Option A", 30), ("Option B", 20), ("Option C", 50)]
        .into_iter()
        .map(|(name, points)| (name.to_string(), points))
        .collect();
    let vote_2: Ballot = [("Option A", 60), ("Option B", 10), ("Option C", 30)]
        .into_iter()
        .map(|(name, points)| (name.to_string(), points))
        .collect();

    store.submit_ballot(&vote_id, "test-user-1", vote_1.clone())?;
    store.submit_ballot(&vote_id, "test-user-2", vote_2.clone())?;

    Ok(Json(json!({
        "success": true,
        "voteId": vote_id,
        "message": "Test vote created with 2 different user votes",
        "users": ["test-user-1", "test-user-2"],
        "votes": [vote_1, vote_2],
    })))
}

fn build_definition(request: CreateVoteRequest) -> Result<VoteDefinition, ApiError> {
    let vote_name = request.vote_name.trim().to_string();
    if vote_name.chars().count() < 2 {
        return Err(ApiError::validation(
            "Vote name must be at least 2 characters.",
        ));
    }

    let candidates: Vec<String> = request
        .candidates
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    if candidates.len() < 2 {
        return Err(ApiError::validation("You must add at least 2 candidates."));
    }
    if candidates.iter().any(|name| name.is_empty()) {
        return Err(ApiError::validation("Candidate names cannot be blank."));
    }
    for (index, name) in candidates.iter().enumerate() {
        if candidates[..index].contains(name) {
            return Err(ApiError::validation("Candidate names must be unique."));
        }
    }

    if request.creator_token.is_empty() {
        return Err(ApiError::validation("Creator token is required."));
    }
    if request.max_voters.is_some_and(|n| n == 0) {
        return Err(ApiError::validation("maxVoters must be positive."));
    }
    if request.points_per_voter.is_some_and(|n| n == 0) {
        return Err(ApiError::validation("pointsPerVoter must be positive."));
    }
    if request.reveal_duration_seconds.is_some_and(|n| n == 0) {
        return Err(ApiError::validation(
            "revealDurationSeconds must be positive.",
        ));
    }

    Ok(VoteDefinition {
        vote_name,
        candidates,
        // Every vote opens immediately; Pending is reachable only for
        // records seeded by other means.
        status: VoteStatus::Open,
        max_voters: request.max_voters,
        points_per_voter: request.points_per_voter.unwrap_or(DEFAULT_POINTS_PER_VOTER),
        voting_end_date: request.voting_end_date,
        creator_token: request.creator_token,
        gradual_reveal_enabled: request.gradual_reveal_enabled,
        reveal_duration_seconds: request
            .reveal_duration_seconds
            .unwrap_or(DEFAULT_REVEAL_DURATION_SECS),
        created_at: chrono::Utc::now(),
    })
}
