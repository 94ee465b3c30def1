//! One tasting flow
//!
//! A [`TastingSession`] owns the flavor selection, the taste ratings and the
//! wizard progress of a single flow. The three parts stay independent; the
//! session only builds and restores draft snapshots across them.

use std::sync::Arc;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::draft::TastingDraft;
use crate::error::{CupNoteError, Result};
use crate::progress::{DraftSaveHandle, ProgressTracker};
use crate::rating::RatingVector;
use crate::selection::SelectionSet;
use crate::types::{TasteAxis, WizardStep};

#[derive(Debug)]
pub struct TastingSession {
    flavors: SelectionSet,
    ratings: RatingVector,
    progress: ProgressTracker,
    note: String,
    primary_flavors: usize,
}

impl TastingSession {
    /// Fresh session over `catalog` with every axis rated
    pub fn new(config: &AppConfig, catalog: Arc<Catalog>) -> Result<Self> {
        config.selection.validate()?;
        config.rating.scale.validate()?;
        config.rating.bands.validate()?;

        Ok(Self {
            flavors: SelectionSet::new(catalog, config.selection),
            ratings: RatingVector::new(
                &TasteAxis::all(),
                config.rating.scale,
                config.rating.bands.clone(),
            ),
            progress: ProgressTracker::new(config.total_steps)?,
            note: String::new(),
            primary_flavors: config.primary_flavors,
        })
    }

    /// Session with the configured (or built-in) catalog
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let catalog = Arc::new(config.load_catalog()?);
        Ok(Self::new(config, catalog)?)
    }

    pub fn flavors(&self) -> &SelectionSet {
        &self.flavors
    }

    pub fn flavors_mut(&mut self) -> &mut SelectionSet {
        &mut self.flavors
    }

    pub fn ratings(&self) -> &RatingVector {
        &self.ratings
    }

    pub fn ratings_mut(&mut self) -> &mut RatingVector {
        &mut self.ratings
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressTracker {
        &mut self.progress
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Wizard screen for the current tracker position
    pub fn current_step(&self) -> WizardStep {
        WizardStep::from_index(self.progress.current_step())
    }

    /// The flavors a summary highlights
    pub fn primary_flavors(&self) -> &[String] {
        self.flavors.primary(self.primary_flavors)
    }

    pub fn snapshot(&self) -> TastingDraft {
        TastingDraft {
            step: self.progress.current_step(),
            total_steps: self.progress.total_steps(),
            flavors: self.flavors.selected().to_vec(),
            ratings: self.ratings.values().clone(),
            note: self.note.clone(),
            saved_at_unix: 0,
        }
    }

    /// Load a snapshot into this session.
    ///
    /// The snapshot must come from a wizard with the same number of steps and
    /// name only catalog flavors; ratings are clamped like any other input.
    pub fn restore(&mut self, draft: &TastingDraft) -> Result<()> {
        if draft.total_steps != self.progress.total_steps() {
            return Err(CupNoteError::state(format!(
                "draft was taken from a {}-step wizard, this one has {}",
                draft.total_steps,
                self.progress.total_steps()
            )));
        }
        if draft.step > draft.total_steps {
            return Err(CupNoteError::state(format!(
                "draft step {} is past the last step {}",
                draft.step, draft.total_steps
            )));
        }
        self.flavors.replace(draft.flavors.iter().cloned())?;
        self.ratings.restore(&draft.ratings);
        self.progress.set_step(draft.step)?;
        self.note = draft.note.clone();
        info!(step = draft.step, flavors = draft.flavors.len(), "Restored tasting draft");
        Ok(())
    }

    /// Start the flow over
    pub fn reset(&mut self) {
        self.flavors.clear();
        self.ratings.reset();
        self.progress.reset();
        self.note.clear();
    }

    /// Snapshot now and hand it to `persist` in the background.
    ///
    /// Returns `None` when a save is already running.
    pub fn save_draft<F>(&self, persist: F) -> Option<DraftSaveHandle>
    where
        F: FnOnce(TastingDraft) -> anyhow::Result<()> + Send + 'static,
    {
        let draft = self.snapshot().stamped();
        self.progress.save_draft(move || persist(draft))
    }
}
