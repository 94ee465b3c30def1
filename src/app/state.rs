//! Presentation state of the terminal front-end
//!
//! Everything here is view-only: cursors, the search box, drag feedback and
//! the status line. Tasting data lives in [`crate::session::TastingSession`].

use ratatui::layout::Rect;
use strum::IntoEnumIterator;

use crate::components::keybindings::KeyContext;
use crate::progress::DraftEvent;
use crate::rating::SliderDrag;
use crate::types::{FlavorCategory, TasteAxis, WizardStep};

/// Severity of a status line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Warning, text: text.into() }
    }
}

impl From<&DraftEvent> for StatusMessage {
    fn from(event: &DraftEvent) -> Self {
        match event {
            DraftEvent::Saved { step } => Self::success(format!("임시 저장 완료 ({}단계)", step)),
            DraftEvent::Failed { message, .. } => Self::warning(format!("임시 저장 실패: {}", message)),
        }
    }
}

/// View state shared between key handling and rendering
#[derive(Debug, Default)]
pub struct ViewState {
    /// Highlighted row of the filtered flavor list
    pub flavor_cursor: usize,
    pub search_query: String,
    /// Typing into the search box
    pub searching: bool,
    /// Category tab; `None` shows every category
    pub category: Option<FlavorCategory>,
    /// Highlighted taste slider
    pub axis_cursor: usize,
    pub drag: SliderDrag,
    /// Axis under the mouse while dragging
    pub drag_axis: Option<TasteAxis>,
    /// Slider tracks laid out by the last frame, for mouse hit testing
    pub slider_tracks: Vec<(TasteAxis, Rect)>,
    pub status: Option<StatusMessage>,
    pub help_visible: bool,
}

impl ViewState {
    /// Next category tab: all, then each category in order, then all again
    pub fn cycle_category(&mut self) {
        let categories: Vec<FlavorCategory> = FlavorCategory::iter().collect();
        self.category = match self.category {
            None => categories.first().copied(),
            Some(current) => categories
                .iter()
                .position(|c| *c == current)
                .and_then(|i| categories.get(i + 1).copied()),
        };
        self.flavor_cursor = 0;
    }

    /// Keep the flavor cursor inside a list of `len` rows
    pub fn clamp_flavor_cursor(&mut self, len: usize) {
        self.flavor_cursor = self.flavor_cursor.min(len.saturating_sub(1));
    }

    /// Input context for the screen of `step`
    pub fn key_context(&self, step: WizardStep) -> KeyContext {
        match step {
            WizardStep::Flavors if self.searching => KeyContext::FlavorSearch,
            WizardStep::Flavors => KeyContext::Flavors,
            WizardStep::Taste => KeyContext::Taste,
            WizardStep::PersonalNotes => KeyContext::Notes,
            _ => KeyContext::Wizard,
        }
    }

    /// Slider track under a terminal cell
    pub fn track_at(&self, column: u16, row: u16) -> Option<(TasteAxis, Rect)> {
        self.slider_tracks.iter().copied().find(|(_, rect)| {
            row == rect.y && column >= rect.x && column < rect.x + rect.width
        })
    }

    /// Forget per-flow view state when the wizard restarts
    pub fn reset(&mut self) {
        let help_visible = self.help_visible;
        *self = Self::default();
        self.help_visible = help_visible;
    }
}
