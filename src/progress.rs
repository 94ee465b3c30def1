//! Step progress tracker for the tasting wizard
//!
//! A bounded step counter plus the draft-save action.
//!
//! # Draft save
//!
//! ```text
//! Idle --save_draft--> Saving --persist done/failed/panicked--> Idle
//!            Saving --save_draft--> (ignored, not queued)
//! ```
//!
//! The persistence callback is supplied by the caller and runs on a worker
//! thread so the UI loop keeps handling input. Outcomes are published as
//! [`DraftEvent`]s that the UI loop drains with [`ProgressTracker::poll_events`].
//! A pending save cannot be cancelled, and it never moves the step counter.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

use crate::error::{CupNoteError, Result};

/// Outcome of one draft save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEvent {
    Saved { step: usize },
    /// Non-fatal; the next save may retry
    Failed { step: usize, message: String },
}

impl DraftEvent {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Resets the saving flag when dropped, including during a panic unwind
struct SavingGuard(Arc<AtomicBool>);

impl Drop for SavingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Handle to an in-flight draft save
#[derive(Debug)]
pub struct DraftSaveHandle {
    inner: JoinHandle<DraftEvent>,
    step: usize,
}

impl DraftSaveHandle {
    /// Block until the save finishes
    pub fn join(self) -> DraftEvent {
        let step = self.step;
        self.inner.join().unwrap_or_else(|_| DraftEvent::Failed {
            step,
            message: "draft save worker panicked".to_string(),
        })
    }

    /// Whether the worker has published its outcome
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

/// Current position in a linear wizard
#[derive(Debug)]
pub struct ProgressTracker {
    current_step: usize,
    total_steps: usize,
    saving: Arc<AtomicBool>,
    events_tx: Sender<DraftEvent>,
    events_rx: Receiver<DraftEvent>,
}

impl ProgressTracker {
    /// Tracker at step 0 of `total_steps`
    pub fn new(total_steps: usize) -> Result<Self> {
        Self::with_step(0, total_steps)
    }

    /// Tracker restored at `current_step`
    pub fn with_step(current_step: usize, total_steps: usize) -> Result<Self> {
        if total_steps == 0 {
            return Err(CupNoteError::validation("a wizard needs at least one step"));
        }
        if current_step > total_steps {
            return Err(CupNoteError::state(format!(
                "step {} is past the last step {}",
                current_step, total_steps
            )));
        }
        let (events_tx, events_rx) = mpsc::channel();
        Ok(Self {
            current_step,
            total_steps,
            saving: Arc::new(AtomicBool::new(false)),
            events_tx,
            events_rx,
        })
    }

    /// Move forward one step, stopping at `total_steps`
    pub fn advance(&mut self) -> usize {
        if self.current_step < self.total_steps {
            self.current_step += 1;
        }
        self.current_step
    }

    /// Move back one step, stopping at 0
    pub fn retreat(&mut self) -> usize {
        self.current_step = self.current_step.saturating_sub(1);
        self.current_step
    }

    /// Jump to a restored position; the saving state is kept
    pub fn set_step(&mut self, step: usize) -> Result<()> {
        if step > self.total_steps {
            return Err(CupNoteError::state(format!(
                "step {} is past the last step {}",
                step, self.total_steps
            )));
        }
        self.current_step = step;
        Ok(())
    }

    /// Back to step 0 when the wizard restarts
    pub fn reset(&mut self) {
        self.current_step = 0;
    }

    /// `current / total`, clamped to `[0, 1]`
    pub fn progress_ratio(&self) -> f64 {
        (self.current_step as f64 / self.total_steps as f64).clamp(0.0, 1.0)
    }

    /// Progress as a whole percentage, for gauges
    pub fn percent(&self) -> u16 {
        (self.progress_ratio() * 100.0).round() as u16
    }

    /// `"3 / 8"`
    pub fn step_label(&self) -> String {
        format!("{} / {}", self.current_step, self.total_steps)
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn is_first(&self) -> bool {
        self.current_step == 0
    }

    pub fn is_complete(&self) -> bool {
        self.current_step == self.total_steps
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    /// Run `persist` in the background unless a save is already in flight.
    ///
    /// Returns `None` when the request was ignored. Failures and panics in
    /// `persist` are logged at warn level and published as
    /// [`DraftEvent::Failed`].
    pub fn save_draft<F>(&self, persist: F) -> Option<DraftSaveHandle>
    where
        F: FnOnce() -> anyhow::Result<()> + Send + 'static,
    {
        if self
            .saving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Draft save already in flight, ignoring request");
            return None;
        }

        let guard = SavingGuard(Arc::clone(&self.saving));
        let events = self.events_tx.clone();
        let step = self.current_step;

        let spawned = thread::Builder::new()
            .name("draft-save".to_string())
            .spawn(move || {
                let outcome = match panic::catch_unwind(AssertUnwindSafe(persist)) {
                    Ok(Ok(())) => {
                        info!(step, "Draft saved");
                        DraftEvent::Saved { step }
                    }
                    Ok(Err(e)) => {
                        warn!(step, "Draft save failed: {:#}", e);
                        DraftEvent::Failed {
                            step,
                            message: format!("{:#}", e),
                        }
                    }
                    Err(_) => {
                        warn!(step, "Draft save panicked");
                        DraftEvent::Failed {
                            step,
                            message: "draft save panicked".to_string(),
                        }
                    }
                };
                // Back to Idle before anyone can observe the outcome
                drop(guard);
                if events.send(outcome.clone()).is_err() {
                    debug!("Draft event receiver dropped");
                }
                outcome
            });

        match spawned {
            Ok(inner) => Some(DraftSaveHandle { inner, step }),
            Err(e) => {
                // The closure (and the guard inside it) is dropped with the error
                warn!("Could not start draft save worker: {}", e);
                let _ = self.events_tx.send(DraftEvent::Failed {
                    step,
                    message: e.to_string(),
                });
                None
            }
        }
    }

    /// Drain draft outcomes published since the last call
    pub fn poll_events(&self) -> Vec<DraftEvent> {
        self.events_rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[test]
    fn test_construction_rules() {
        assert!(ProgressTracker::new(0).is_err());
        assert!(ProgressTracker::with_step(9, 8).is_err());
        assert!(ProgressTracker::with_step(8, 8).is_ok());
    }

    #[test]
    fn test_advance_and_retreat_clamp() {
        let mut tracker = ProgressTracker::new(2).unwrap();
        assert_eq!(tracker.retreat(), 0);
        assert_eq!(tracker.advance(), 1);
        assert_eq!(tracker.advance(), 2);
        assert_eq!(tracker.advance(), 2);
        assert!(tracker.is_complete());
        assert_eq!(tracker.retreat(), 1);
    }

    #[test]
    fn test_set_step() {
        let mut tracker = ProgressTracker::new(8).unwrap();
        assert!(tracker.set_step(9).is_err());
        assert_eq!(tracker.current_step(), 0);
        tracker.set_step(5).unwrap();
        assert_eq!(tracker.current_step(), 5);
    }

    #[test]
    fn test_ratio_and_labels() {
        let mut tracker = ProgressTracker::new(8).unwrap();
        assert_eq!(tracker.progress_ratio(), 0.0);
        tracker.advance();
        tracker.advance();
        assert_eq!(tracker.progress_ratio(), 0.25);
        assert_eq!(tracker.percent(), 25);
        assert_eq!(tracker.step_label(), "2 / 8");
        tracker.reset();
        assert!(tracker.is_first());
    }

    #[test]
    fn test_save_draft_success_event() {
        let tracker = ProgressTracker::with_step(3, 8).unwrap();
        let handle = tracker.save_draft(|| Ok(())).unwrap();
        assert_eq!(handle.join(), DraftEvent::Saved { step: 3 });
        assert_eq!(tracker.poll_events(), vec![DraftEvent::Saved { step: 3 }]);
        assert!(!tracker.is_saving());
    }

    #[test]
    fn test_save_draft_panic_is_reported_and_resets() {
        let tracker = ProgressTracker::new(8).unwrap();
        let handle = tracker
            .save_draft(|| -> anyhow::Result<()> { panic!("disk on fire") })
            .unwrap();
        assert!(handle.join().is_failure());
        assert!(!tracker.is_saving());
        assert!(tracker.save_draft(|| Ok(())).is_some());
    }

    #[test]
    fn test_second_save_while_in_flight_is_ignored() {
        let tracker = ProgressTracker::new(8).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));

        let first_calls = Arc::clone(&calls);
        let first = tracker.save_draft(move || {
            first_calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(200));
            Ok(())
        });
        let second_calls = Arc::clone(&calls);
        let second = tracker.save_draft(move || {
            second_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert!(first.is_some());
        assert!(second.is_none());
        first.unwrap().join();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
