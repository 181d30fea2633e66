// src/store.rs
use crate::aggregate::aggregate;
use crate::error::StoreError;
use crate::models::{Ballot, CandidateTotal, VoteDefinition, VoteRecord, VoteStatus};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// In-memory vote store shared by every request handler.
///
/// Constructed once at startup and passed around as `Arc<VoteStore>`; all
/// votes live for the lifetime of the process. Ballot submission is
/// last-write-wins per user id, and closing a vote is a single critical
/// section so concurrent close attempts cannot both succeed.
#[derive(Debug, Default)]
pub struct VoteStore {
    votes: RwLock<HashMap<String, VoteRecord>>,
}

impl VoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store over pre-existing records. Used by tests to start from a
    /// known state.
    pub fn with_votes(votes: HashMap<String, VoteRecord>) -> Self {
        Self {
            votes: RwLock::new(votes),
        }
    }

    /// Publish a new vote and return its freshly generated id.
    ///
    /// The id is drawn from uuid v4; an existing record is never overwritten,
    /// so on the (practically impossible) collision a new id is drawn.
    pub fn create_vote(&self, definition: VoteDefinition) -> String {
        let mut votes = self.votes.write().unwrap();
        let mut vote_id = Uuid::new_v4().to_string();
        while votes.contains_key(&vote_id) {
            vote_id = Uuid::new_v4().to_string();
        }
        info!(%vote_id, vote_name = %definition.vote_name, "created vote");
        votes.insert(vote_id.clone(), VoteRecord::new(definition));
        vote_id
    }

    pub fn definition(&self, vote_id: &str) -> Option<VoteDefinition> {
        let votes = self.votes.read().unwrap();
        votes.get(vote_id).map(|record| record.definition.clone())
    }

    /// Store a user's ballot, replacing any ballot they submitted before.
    ///
    /// The point budget is deliberately not checked here; whether an
    /// allocation adds up to `points_per_voter` is the caller's concern.
    pub fn submit_ballot(
        &self,
        vote_id: &str,
        user_id: &str,
        ballot: Ballot,
    ) -> Result<(), StoreError> {
        let mut votes = self.votes.write().unwrap();
        let record = votes.get_mut(vote_id).ok_or(StoreError::NotFound)?;
        debug!(%vote_id, %user_id, entries = ballot.len(), "stored ballot");
        record.ballots.insert(user_id.to_string(), ballot);
        Ok(())
    }

    pub fn ballots(&self, vote_id: &str) -> Result<HashMap<String, Ballot>, StoreError> {
        let votes = self.votes.read().unwrap();
        votes
            .get(vote_id)
            .map(|record| record.ballots.clone())
            .ok_or(StoreError::NotFound)
    }

    /// Current definition plus aggregated totals, read under one lock so the
    /// pair is a consistent snapshot.
    pub fn results(
        &self,
        vote_id: &str,
    ) -> Result<(VoteDefinition, Vec<CandidateTotal>), StoreError> {
        let votes = self.votes.read().unwrap();
        let record = votes.get(vote_id).ok_or(StoreError::NotFound)?;
        let totals = aggregate(&record.definition.candidates, &record.ballots);
        Ok((record.definition.clone(), totals))
    }

    /// Close the vote. Only the holder of the creator token may do this, it
    /// can happen at most once, and the status check and transition share the
    /// write lock so racing closers cannot both win.
    pub fn close(&self, vote_id: &str, provided_token: &str) -> Result<(), StoreError> {
        let mut votes = self.votes.write().unwrap();
        let record = votes.get_mut(vote_id).ok_or(StoreError::NotFound)?;

        if record.definition.status == VoteStatus::Closed {
            return Err(StoreError::AlreadyClosed);
        }
        if record.definition.creator_token != provided_token {
            warn!(%vote_id, "close attempt with wrong creator token");
            return Err(StoreError::Unauthorized);
        }

        record.definition.status = VoteStatus::Closed;
        info!(%vote_id, "closed vote");
        Ok(())
    }
}
