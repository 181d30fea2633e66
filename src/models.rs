// models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Points each voter gets to distribute when the creator does not override it.
pub const DEFAULT_POINTS_PER_VOTER: u32 = 100;

/// Default length of the gradual reveal animation, in seconds.
pub const DEFAULT_REVEAL_DURATION_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteStatus {
    Pending,
    Open,
    Closed,
}

/// A single user's point allocation, keyed by candidate name.
pub type Ballot = HashMap<String, u64>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteDefinition {
    pub vote_name: String,
    pub candidates: Vec<String>,
    pub status: VoteStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_voters: Option<u32>,
    pub points_per_voter: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting_end_date: Option<DateTime<Utc>>,
    // Never serialized: knowing the token is what authorizes closing the vote.
    #[serde(skip)]
    pub creator_token: String,
    pub gradual_reveal_enabled: bool,
    pub reveal_duration_seconds: u64,
    pub created_at: DateTime<Utc>,
}

/// Everything the store holds for one vote id.
#[derive(Debug, Clone)]
pub struct VoteRecord {
    pub definition: VoteDefinition,
    pub ballots: HashMap<String, Ballot>,
}

impl VoteRecord {
    pub fn new(definition: VoteDefinition) -> Self {
        Self {
            definition,
            ballots: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTotal {
    pub name: String,
    pub points: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoteRequest {
    pub vote_name: String,
    pub candidates: Vec<String>,
    #[serde(default)]
    pub max_voters: Option<u32>,
    #[serde(default)]
    pub points_per_voter: Option<u32>,
    #[serde(default)]
    pub voting_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub gradual_reveal_enabled: bool,
    #[serde(default)]
    pub reveal_duration_seconds: Option<u64>,
    pub creator_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoteResponse {
    pub vote_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBallotRequest {
    pub user_id: String,
    pub user_vote: Ballot,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitBallotResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponse {
    pub vote_name: String,
    pub status: VoteStatus,
    pub candidates: Vec<CandidateTotal>,
    pub gradual_reveal_enabled: bool,
    pub reveal_duration_seconds: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseVoteRequest {
    pub creator_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityCheckRequest {
    pub new_candidate: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityCheckResponse {
    pub is_similar: bool,
    pub similarity_score: f64,
}
