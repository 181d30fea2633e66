// src/reveal.rs
//! Gradual reveal of final results.
//!
//! When a vote closes with the gradual reveal option on, the displayed totals
//! start at zero and climb to the real totals over the configured duration.
//! The trajectory is randomized on purpose; only the end state is exact. The
//! stepping itself is a pure function over a frame plus an injected rng, so
//! tests can drive it deterministically with a seeded generator.

use crate::models::CandidateTotal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::debug;

/// How often the animation advances.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Largest amount a candidate's displayed total moves in one tick.
const MAX_STEP: u64 = 5;

/// Chance that a given candidate is part of the subset stepped this tick.
const STEP_PROBABILITY: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    Revealing,
    Done,
}

/// One snapshot of the animation: what is currently displayed, where it is
/// heading, and how far along the reveal is.
#[derive(Debug, Clone)]
pub struct RevealFrame {
    pub displayed: Vec<CandidateTotal>,
    pub phase: RevealPhase,
    finals: Vec<u64>,
    tick: u32,
    total_ticks: u32,
}

impl RevealFrame {
    /// Frame before any reveal has started: zeros, not ticking.
    pub fn idle(candidate_names: &[String]) -> Self {
        Self {
            displayed: candidate_names
                .iter()
                .map(|name| CandidateTotal {
                    name: name.clone(),
                    points: 0,
                })
                .collect(),
            phase: RevealPhase::Idle,
            finals: vec![0; candidate_names.len()],
            tick: 0,
            total_ticks: 1,
        }
    }

    /// Frame at the start of a reveal: everything displayed as zero.
    pub fn start(final_totals: Vec<CandidateTotal>, duration: Duration) -> Self {
        let total_ticks = (duration.as_millis() / TICK_INTERVAL.as_millis()).max(1) as u32;
        let finals = final_totals.iter().map(|t| t.points).collect();
        let displayed = final_totals
            .into_iter()
            .map(|t| CandidateTotal { name: t.name, points: 0 })
            .collect();
        Self {
            displayed,
            phase: RevealPhase::Revealing,
            finals,
            tick: 0,
            total_ticks,
        }
    }

    pub fn progress(&self) -> f64 {
        f64::from(self.tick) / f64::from(self.total_ticks)
    }

    pub fn is_done(&self) -> bool {
        self.phase == RevealPhase::Done
    }
}

/// Advance the animation by one tick.
///
/// A random subset of candidates each moves a small random amount toward
/// `floor(final * progress)`, never past its final value. The last tick
/// snaps every displayed total to the exact final and marks the frame done.
/// Frames that are not revealing are returned unchanged.
pub fn next_frame<R: Rng>(frame: &RevealFrame, rng: &mut R) -> RevealFrame {
    if frame.phase != RevealPhase::Revealing {
        return frame.clone();
    }

    let mut next = frame.clone();
    next.tick = frame.tick + 1;

    if next.tick >= next.total_ticks {
        for (shown, final_points) in next.displayed.iter_mut().zip(&next.finals) {
            shown.points = *final_points;
        }
        next.phase = RevealPhase::Done;
        return next;
    }

    let progress = next.progress();
    for (shown, &final_points) in next.displayed.iter_mut().zip(&next.finals) {
        if !rng.gen_bool(STEP_PROBABILITY) {
            continue;
        }
        let target = ((final_points as f64) * progress).floor() as u64;
        let target = target.min(final_points);
        if shown.points < target {
            let gap = target - shown.points;
            shown.points += rng.gen_range(1..=MAX_STEP).min(gap);
        }
    }
    next
}

/// Drives the reveal on a fixed 200ms tick, publishing each frame on a watch
/// channel until the final frame, then stops on its own.
///
/// Cancellation is part of the contract: `cancel` (or dropping the animator)
/// aborts the ticking task, and no frame is published afterwards.
#[derive(Debug)]
pub struct RevealAnimator {
    task: Option<JoinHandle<()>>,
}

impl RevealAnimator {
    pub fn start(
        final_totals: Vec<CandidateTotal>,
        duration: Duration,
    ) -> (Self, watch::Receiver<RevealFrame>) {
        Self::start_with_rng(final_totals, duration, StdRng::from_entropy())
    }

    /// Same as [`start`](Self::start) but with a caller-supplied rng, so the
    /// whole run is reproducible.
    pub fn start_with_rng<R>(
        final_totals: Vec<CandidateTotal>,
        duration: Duration,
        mut rng: R,
    ) -> (Self, watch::Receiver<RevealFrame>)
    where
        R: Rng + Send + 'static,
    {
        let mut frame = RevealFrame::start(final_totals, duration);
        let (tx, rx) = watch::channel(frame.clone());

        let task = tokio::spawn(async move {
            let mut interval = time::interval(TICK_INTERVAL);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            while frame.phase == RevealPhase::Revealing {
                interval.tick().await;
                frame = next_frame(&frame, &mut rng);
                if tx.send(frame.clone()).is_err() {
                    // Nobody is watching the reveal anymore.
                    return;
                }
            }
            debug!("reveal finished");
        });

        (Self { task: Some(task) }, rx)
    }

    /// Stop the animation. Idempotent; after this no further frame is sent.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for RevealAnimator {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(entries: &[(&str, u64)]) -> Vec<CandidateTotal> {
        entries
            .iter()
            .map(|(name, points)| CandidateTotal {
                name: name.to_string(),
                points: *points,
            })
            .collect()
    }

    fn finals_of(frame: &RevealFrame) -> Vec<u64> {
        frame.finals.clone()
    }

    #[test]
    fn one_second_reveal_runs_five_ticks_and_lands_exactly() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut frame = RevealFrame::start(totals(&[("A", 80), ("B", 20)]), Duration::from_secs(1));
        assert_eq!(frame.total_ticks, 5);

        let mut ticks = 0;
        while !frame.is_done() {
            frame = next_frame(&frame, &mut rng);
            ticks += 1;
            // Displayed values may trail the target but never pass the final.
            for (shown, final_points) in frame.displayed.iter().zip(&finals_of(&frame)) {
                assert!(shown.points <= *final_points);
            }
        }

        assert_eq!(ticks, 5);
        let points: Vec<u64> = frame.displayed.iter().map(|t| t.points).collect();
        assert_eq!(points, vec![80, 20]);
    }

    #[test]
    fn displayed_values_never_decrease() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut frame =
            RevealFrame::start(totals(&[("A", 123), ("B", 7)]), Duration::from_secs(30));

        let mut previous: Vec<u64> = frame.displayed.iter().map(|t| t.points).collect();
        while !frame.is_done() {
            frame = next_frame(&frame, &mut rng);
            let current: Vec<u64> = frame.displayed.iter().map(|t| t.points).collect();
            for (before, after) in previous.iter().zip(&current) {
                assert!(after >= before);
            }
            previous = current;
        }
    }

    #[test]
    fn done_frames_are_returned_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut frame = RevealFrame::start(totals(&[("A", 10)]), Duration::from_millis(200));
        frame = next_frame(&frame, &mut rng); // single tick finishes it
        assert!(frame.is_done());

        let again = next_frame(&frame, &mut rng);
        assert!(again.is_done());
        assert_eq!(again.displayed, frame.displayed);
    }

    #[test]
    fn idle_frames_do_not_tick() {
        let mut rng = StdRng::seed_from_u64(2);
        let idle = RevealFrame::idle(&["A".to_string(), "B".to_string()]);
        assert_eq!(idle.phase, RevealPhase::Idle);

        let next = next_frame(&idle, &mut rng);
        assert_eq!(next.phase, RevealPhase::Idle);
        assert!(next.displayed.iter().all(|t| t.points == 0));
    }

    #[test]
    fn zero_duration_still_completes_in_one_tick() {
        let mut rng = StdRng::seed_from_u64(3);
        let frame = RevealFrame::start(totals(&[("A", 42)]), Duration::ZERO);
        let frame = next_frame(&frame, &mut rng);
        assert!(frame.is_done());
        assert_eq!(frame.displayed[0].points, 42);
    }

    #[tokio::test(start_paused = true)]
    async fn animator_ends_on_the_exact_final_totals() {
        let (_animator, mut rx) = RevealAnimator::start_with_rng(
            totals(&[("A", 80), ("B", 20)]),
            Duration::from_secs(1),
            StdRng::seed_from_u64(42),
        );

        let mut last = rx.borrow().clone();
        while rx.changed().await.is_ok() {
            last = rx.borrow().clone();
        }

        assert!(last.is_done());
        let points: Vec<u64> = last.displayed.iter().map(|t| t.points).collect();
        assert_eq!(points, vec![80, 20]);
    }

    #[tokio::test(start_paused = true)]
    async fn no_frame_is_published_after_cancellation() {
        let (mut animator, mut rx) = RevealAnimator::start_with_rng(
            totals(&[("A", 500), ("B", 300)]),
            Duration::from_secs(30),
            StdRng::seed_from_u64(42),
        );

        rx.changed().await.expect("first frame");
        animator.cancel();

        // Drain anything that was already in flight when the abort landed.
        while rx.changed().await.is_ok() {}
        let frozen = rx.borrow().clone();
        assert!(!frozen.is_done());

        // Give the (dead) task plenty of time; the displayed state must not move.
        time::sleep(Duration::from_secs(60)).await;
        assert!(rx.has_changed().is_err());
        let after: Vec<u64> = rx.borrow().displayed.iter().map(|t| t.points).collect();
        let before: Vec<u64> = frozen.displayed.iter().map(|t| t.points).collect();
        assert_eq!(after, before);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_animator_stops_the_ticker() {
        let (animator, mut rx) = RevealAnimator::start_with_rng(
            totals(&[("A", 100)]),
            Duration::from_secs(30),
            StdRng::seed_from_u64(5),
        );
        rx.changed().await.expect("first frame");
        drop(animator);

        while rx.changed().await.is_ok() {}
        assert!(rx.has_changed().is_err());
    }
}
