//! CupNote Library
//!
//! The state core of a coffee tasting journal and the terminal front-end that
//! renders it.
//!
//! The core is three independent pieces: a bounded flavor selection
//! ([`SelectionSet`]), a multi-axis taste rating ([`RatingVector`]) and the
//! wizard step counter with background draft saves ([`ProgressTracker`]).
//! [`TastingSession`] holds one of each for a tasting flow.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod draft;
pub mod error;
pub mod progress;
pub mod rating;
pub mod selection;
pub mod sensory;
pub mod session;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogItem};
pub use config::AppConfig;
pub use draft::TastingDraft;
pub use error::CupNoteError;
pub use progress::{DraftEvent, DraftSaveHandle, ProgressTracker};
pub use rating::{RatingScale, RatingVector, SliderDrag, ValueBand, ValueBands};
pub use selection::{SelectionBounds, SelectionSet};
pub use session::TastingSession;
pub use theme::Theme;
pub use types::{ButtonVariant, DragPhase, FlavorCategory, TasteAxis, WizardStep};
