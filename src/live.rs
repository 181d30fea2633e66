// src/live.rs
//! Polling loop behind "live" result views.
//!
//! Rather than tying refresh timers to a UI lifecycle, the poller is an
//! explicit start/stop pair: it re-reads the store on a fixed interval,
//! publishes each snapshot on a watch channel, and shuts itself down the
//! moment it sees the vote close.

use crate::error::StoreError;
use crate::models::{CandidateTotal, VoteStatus};
use crate::store::VoteStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsSnapshot {
    pub status: VoteStatus,
    pub totals: Vec<CandidateTotal>,
}

/// Repeatedly snapshots one vote's results until the vote closes or the
/// poller is stopped. Dropping the poller stops it as well.
#[derive(Debug)]
pub struct ResultsPoller {
    task: Option<JoinHandle<()>>,
}

impl ResultsPoller {
    /// Start polling `vote_id` every `every`. The first snapshot is taken
    /// immediately; the receiver holds `None` only until then.
    pub fn start(
        store: Arc<VoteStore>,
        vote_id: String,
        every: Duration,
    ) -> (Self, watch::Receiver<Option<ResultsSnapshot>>) {
        let (tx, rx) = watch::channel(None);

        let task = tokio::spawn(async move {
            let mut interval = time::interval(every);
            loop {
                interval.tick().await;
                match store.results(&vote_id) {
                    Ok((definition, totals)) => {
                        let status = definition.status;
                        let snapshot = ResultsSnapshot { status, totals };
                        if tx.send(Some(snapshot)).is_err() {
                            return;
                        }
                        if status == VoteStatus::Closed {
                            debug!(%vote_id, "vote closed, stopping live updates");
                            return;
                        }
                    }
                    Err(StoreError::NotFound) => {
                        warn!(%vote_id, "polled vote does not exist, stopping");
                        return;
                    }
                    Err(err) => {
                        warn!(%vote_id, %err, "poll failed, stopping");
                        return;
                    }
                }
            }
        });

        (Self { task: Some(task) }, rx)
    }

    /// Stop polling. Idempotent; no snapshot is published afterwards.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ResultsPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
