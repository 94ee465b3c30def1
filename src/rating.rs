//! Multi-axis rating vector
//!
//! Stores one bounded, step-quantized score per active taste axis and turns
//! scores into display strings. Out-of-range input is corrected, never
//! rejected.
//!
//! The slider drag is modelled as a pure pair of mappings
//! ([`RatingScale::position_to_value`], [`RatingScale::value_to_position`]),
//! so a renderer only has to feed positions in and read values back.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::warn;

use crate::error::{CupNoteError, Result};
use crate::types::{DragPhase, TasteAxis};

/// Guards round-half-up against `x.5` values that land just below the
/// midpoint after division, e.g. `5.05 / 0.1 == 50.4999...`
const STEP_EPSILON: f64 = 1e-9;

/// Tolerance, in steps, for a range end to count as a whole multiple of `step`
const GRID_TOLERANCE: f64 = 1e-6;

/// Range and granularity of a rating axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingScale {
    pub minimum: f64,
    pub maximum: f64,
    pub step: f64,
    /// Initial score for axes without a restored value
    pub default_value: f64,
}

impl Default for RatingScale {
    fn default() -> Self {
        Self {
            minimum: 1.0,
            maximum: 10.0,
            step: 0.1,
            default_value: 5.0,
        }
    }
}

impl RatingScale {
    pub fn new(minimum: f64, maximum: f64, step: f64) -> Result<Self> {
        let scale = Self {
            minimum,
            maximum,
            step,
            default_value: minimum,
        };
        scale.validate()?;
        Ok(scale)
    }

    pub fn with_default(mut self, default_value: f64) -> Self {
        self.default_value = default_value;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.minimum.is_finite() && self.maximum.is_finite() && self.step.is_finite()) {
            return Err(CupNoteError::validation("rating scale values must be finite"));
        }
        if self.minimum >= self.maximum {
            return Err(CupNoteError::validation(format!(
                "rating minimum ({}) must be below maximum ({})",
                self.minimum, self.maximum
            )));
        }
        if self.step <= 0.0 || self.step > self.maximum - self.minimum {
            return Err(CupNoteError::validation(format!(
                "rating step {} must be positive and fit inside the range",
                self.step
            )));
        }
        // Clamping to an off-grid end would store a value between steps
        for (name, end) in [("minimum", self.minimum), ("maximum", self.maximum)] {
            if !self.is_on_grid(end) {
                return Err(CupNoteError::validation(format!(
                    "rating {name} {end} is not a multiple of step {}",
                    self.step
                )));
            }
        }
        Ok(())
    }

    /// Whether `value` is a whole multiple of `step`
    pub fn is_on_grid(&self, value: f64) -> bool {
        let steps = value / self.step;
        (steps - steps.round()).abs() < GRID_TOLERANCE
    }

    pub fn span(&self) -> f64 {
        self.maximum - self.minimum
    }

    /// Clamp into range and snap to the nearest multiple of `step`, ties up.
    ///
    /// NaN is treated as `minimum`.
    pub fn quantize(&self, raw: f64) -> f64 {
        let value = if raw.is_nan() {
            self.minimum
        } else {
            raw.clamp(self.minimum, self.maximum)
        };
        let steps = (value / self.step + 0.5 + STEP_EPSILON).floor();
        self.tidy(steps * self.step).clamp(self.minimum, self.maximum)
    }

    /// Decimal places needed to print a multiple of `step`
    pub fn decimals(&self) -> usize {
        (0..=9)
            .find(|&places| {
                let scaled = self.step * 10f64.powi(places as i32);
                (scaled - scaled.round()).abs() < STEP_EPSILON
            })
            .unwrap_or(9)
    }

    /// Map a drag position on a track of `track_length` to a quantized value
    pub fn position_to_value(&self, position: f64, track_length: f64) -> f64 {
        if !(track_length > 0.0) || position.is_nan() {
            return self.minimum;
        }
        let ratio = (position / track_length).clamp(0.0, 1.0);
        self.quantize(self.minimum + ratio * self.span())
    }

    /// Map a value to its position on a track of `track_length`
    pub fn value_to_position(&self, value: f64, track_length: f64) -> f64 {
        if !(track_length > 0.0) {
            return 0.0;
        }
        let value = if value.is_nan() {
            self.minimum
        } else {
            value.clamp(self.minimum, self.maximum)
        };
        (value - self.minimum) / self.span() * track_length
    }

    /// Track distance covered by one step
    pub fn step_width(&self, track_length: f64) -> f64 {
        if !(track_length > 0.0) {
            return 0.0;
        }
        self.step / self.span() * track_length
    }

    fn tidy(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.decimals() as i32);
        (value * factor).round() / factor
    }
}

/// One entry of the qualitative banding table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueBand {
    /// Inclusive upper bound; `None` matches every value
    pub threshold: Option<f64>,
    pub label: String,
}

impl ValueBand {
    pub fn upto(threshold: f64, label: impl Into<String>) -> Self {
        Self {
            threshold: Some(threshold),
            label: label.into(),
        }
    }

    pub fn rest(label: impl Into<String>) -> Self {
        Self {
            threshold: None,
            label: label.into(),
        }
    }
}

/// Ascending banding table, first match wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueBands(Vec<ValueBand>);

impl Default for ValueBands {
    fn default() -> Self {
        Self(vec![
            ValueBand::upto(2.0, "낮음"),
            ValueBand::upto(4.0, "보통 이하"),
            ValueBand::upto(6.0, "보통"),
            ValueBand::upto(8.0, "높음"),
            ValueBand::rest("매우 높음"),
        ])
    }
}

impl ValueBands {
    pub fn new(bands: Vec<ValueBand>) -> Result<Self> {
        let bands = Self(bands);
        bands.validate()?;
        Ok(bands)
    }

    /// Thresholds must ascend and only the last band may be open-ended
    pub fn validate(&self) -> Result<()> {
        let mut previous: Option<f64> = None;
        for (position, band) in self.0.iter().enumerate() {
            match band.threshold {
                Some(threshold) => {
                    if threshold.is_nan() {
                        return Err(CupNoteError::validation("band threshold is NaN"));
                    }
                    if previous.is_some_and(|prev| threshold <= prev) {
                        return Err(CupNoteError::validation(format!(
                            "band thresholds must ascend ('{}' at {})",
                            band.label, threshold
                        )));
                    }
                    previous = Some(threshold);
                }
                None if position + 1 != self.0.len() => {
                    return Err(CupNoteError::validation(format!(
                        "open-ended band '{}' must be last",
                        band.label
                    )));
                }
                None => {}
            }
        }
        Ok(())
    }

    pub fn label_for(&self, value: f64) -> Option<&str> {
        self.0
            .iter()
            .find(|band| band.threshold.is_none_or(|threshold| value <= threshold))
            .map(|band| band.label.as_str())
    }

    pub fn bands(&self) -> &[ValueBand] {
        &self.0
    }
}

/// Called with the axis and its stored value after every change
pub type RatingListener = Box<dyn FnMut(TasteAxis, f64) + Send>;

/// Per-axis display override
pub type ValueFormatter = fn(f64) -> String;

/// Bounded score per active taste axis
pub struct RatingVector {
    scale: RatingScale,
    bands: ValueBands,
    values: BTreeMap<TasteAxis, f64>,
    formatters: HashMap<TasteAxis, ValueFormatter>,
    on_change: Option<RatingListener>,
}

impl fmt::Debug for RatingVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingVector")
            .field("scale", &self.scale)
            .field("values", &self.values)
            .field("custom_formatters", &self.formatters.len())
            .field("has_listener", &self.on_change.is_some())
            .finish()
    }
}

impl RatingVector {
    /// Every axis in `axes` starts at the scale's default value
    pub fn new(axes: &[TasteAxis], scale: RatingScale, bands: ValueBands) -> Self {
        let initial = scale.quantize(scale.default_value);
        Self {
            scale,
            bands,
            values: axes.iter().map(|&axis| (axis, initial)).collect(),
            formatters: HashMap::new(),
            on_change: None,
        }
    }

    /// All six axes with the default 1-10 scale and banding
    pub fn with_defaults() -> Self {
        Self::new(&TasteAxis::all(), RatingScale::default(), ValueBands::default())
    }

    pub fn set_on_change(&mut self, listener: impl FnMut(TasteAxis, f64) + Send + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    pub fn set_formatter(&mut self, axis: TasteAxis, formatter: ValueFormatter) {
        self.formatters.insert(axis, formatter);
    }

    /// Clamp, quantize and store. Returns the stored value, or `None` when
    /// `axis` is not part of this vector.
    pub fn set_value(&mut self, axis: TasteAxis, raw: f64) -> Option<f64> {
        let Some(slot) = self.values.get_mut(&axis) else {
            warn!(%axis, "Ignoring value for inactive rating axis");
            return None;
        };
        let value = self.scale.quantize(raw);
        *slot = value;
        if let Some(listener) = self.on_change.as_mut() {
            listener(axis, value);
        }
        Some(value)
    }

    /// Move an axis by whole steps, e.g. from arrow keys
    pub fn nudge(&mut self, axis: TasteAxis, steps: i32) -> Option<f64> {
        let current = self.value(axis)?;
        self.set_value(axis, current + f64::from(steps) * self.scale.step)
    }

    pub fn value(&self, axis: TasteAxis) -> Option<f64> {
        self.values.get(&axis).copied()
    }

    pub fn values(&self) -> &BTreeMap<TasteAxis, f64> {
        &self.values
    }

    pub fn axes(&self) -> impl Iterator<Item = TasteAxis> + '_ {
        self.values.keys().copied()
    }

    pub fn scale(&self) -> &RatingScale {
        &self.scale
    }

    pub fn bands(&self) -> &ValueBands {
        &self.bands
    }

    /// Apply previously saved values; each goes through [`Self::set_value`]
    pub fn restore(&mut self, saved: &BTreeMap<TasteAxis, f64>) {
        for (&axis, &value) in saved {
            self.set_value(axis, value);
        }
    }

    /// Put every axis back to the default value
    pub fn reset(&mut self) {
        let axes: Vec<TasteAxis> = self.axes().collect();
        let default_value = self.scale.default_value;
        for axis in axes {
            self.set_value(axis, default_value);
        }
    }

    /// Display string: the number, then the band label in parentheses
    pub fn format(&self, axis: TasteAxis, value: f64) -> String {
        if let Some(formatter) = self.formatters.get(&axis) {
            return formatter(value);
        }
        let number = format!("{:.*}", self.scale.decimals(), value);
        match self.bands.label_for(value) {
            Some(label) => format!("{} ({})", number, label),
            None => number,
        }
    }

    /// Screen-reader text for the axis, e.g. `산미 7.5점, 높음`
    pub fn accessibility_label(&self, axis: TasteAxis) -> Option<String> {
        let value = self.value(axis)?;
        let number = format!("{:.*}", self.scale.decimals(), value);
        Some(match self.bands.label_for(value) {
            Some(band) => format!("{} {}점, {}", axis.label(), number, band),
            None => format!("{} {}점", axis.label(), number),
        })
    }

    pub fn position_to_value(&self, position: f64, track_length: f64) -> f64 {
        self.scale.position_to_value(position, track_length)
    }

    pub fn value_to_position(&self, value: f64, track_length: f64) -> f64 {
        self.scale.value_to_position(value, track_length)
    }
}

/// Presentation-only drag state of one slider thumb
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SliderDrag {
    phase: DragPhase,
}

impl SliderDrag {
    const ACTIVE_THUMB_SCALE: f64 = 1.2;

    pub fn begin(&mut self) {
        self.phase = DragPhase::Active;
    }

    pub fn end(&mut self) {
        self.phase = DragPhase::Settled;
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == DragPhase::Active
    }

    /// Thumb enlargement factor while dragging
    pub fn thumb_scale(&self) -> f64 {
        match self.phase {
            DragPhase::Active => Self::ACTIVE_THUMB_SCALE,
            DragPhase::Settled => 1.0,
        }
    }
}
