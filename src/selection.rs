//! Bounded multi-select set
//!
//! Tracks which catalog items are selected, in insertion order, while keeping
//! the selection size within `[min, max]`. Requests that would break a bound
//! are dropped without an error: the caller can inspect [`SelectionSet::is_at_min`]
//! and [`SelectionSet::is_at_max`] to explain why nothing changed.
//!
//! # Invariants
//!
//! - `len() <= max` at all times
//! - once `len() >= min`, removals never take it below `min`
//! - every selected label exists in the catalog, and appears once

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::catalog::{Catalog, CatalogItem};
use crate::error::{CupNoteError, Result};
use crate::types::FlavorCategory;

/// Cardinality bounds of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for SelectionBounds {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

impl SelectionBounds {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max == 0 {
            return Err(CupNoteError::validation("maximum selections must be at least 1"));
        }
        if self.min > self.max {
            return Err(CupNoteError::validation(format!(
                "minimum selections ({}) exceeds maximum ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

fn checked_seed<I, S>(catalog: &Catalog, bounds: SelectionBounds, labels: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut selected: Vec<String> = Vec::new();
    for label in labels {
        let label = label.into();
        if !catalog.contains(&label) {
            return Err(CupNoteError::validation(format!(
                "'{}' is not in the catalog",
                label
            )));
        }
        if selected.contains(&label) {
            return Err(CupNoteError::validation(format!(
                "'{}' is selected twice",
                label
            )));
        }
        selected.push(label);
    }
    if selected.len() > bounds.max {
        return Err(CupNoteError::validation(format!(
            "{} selections exceed the maximum of {}",
            selected.len(),
            bounds.max
        )));
    }
    Ok(selected)
}

/// Called with the full selection after every applied change
pub type SelectionListener = Box<dyn FnMut(&[String]) + Send>;

/// Selected labels from a fixed catalog, kept within [`SelectionBounds`]
pub struct SelectionSet {
    catalog: Arc<Catalog>,
    bounds: SelectionBounds,
    selected: Vec<String>,
    on_change: Option<SelectionListener>,
}

impl fmt::Debug for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionSet")
            .field("catalog_len", &self.catalog.len())
            .field("bounds", &self.bounds)
            .field("selected", &self.selected)
            .field("has_listener", &self.on_change.is_some())
            .finish()
    }
}

impl SelectionSet {
    /// Empty selection over `catalog`
    pub fn new(catalog: Arc<Catalog>, bounds: SelectionBounds) -> Self {
        Self {
            catalog,
            bounds,
            selected: Vec::new(),
            on_change: None,
        }
    }

    /// Selection pre-seeded by the consumer.
    ///
    /// The seed must name catalog items, without duplicates, and must not
    /// exceed `max`. A seed below `min` is accepted: the floor only guards
    /// removals.
    pub fn with_selected<I, S>(catalog: Arc<Catalog>, bounds: SelectionBounds, initial: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        bounds.validate()?;
        let selected = checked_seed(&catalog, bounds, initial)?;
        Ok(Self {
            catalog,
            bounds,
            selected,
            on_change: None,
        })
    }

    /// Replace the whole selection, e.g. when restoring a draft.
    ///
    /// Same rules as [`Self::with_selected`]; on error nothing changes.
    pub fn replace<I, S>(&mut self, labels: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = checked_seed(&self.catalog, self.bounds, labels)?;
        self.notify();
        Ok(())
    }

    /// Register the change callback, replacing any previous one
    pub fn set_on_change(&mut self, listener: impl FnMut(&[String]) + Send + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    /// Select or deselect `label`.
    ///
    /// Removing at the floor, adding at the ceiling and unknown labels are
    /// ignored; the selection is left untouched and no callback fires.
    pub fn toggle(&mut self, label: &str) {
        if !self.catalog.contains(label) {
            debug!(label, "Ignoring toggle of label outside the catalog");
            return;
        }

        match self.selected.iter().position(|selected| selected == label) {
            Some(position) => {
                if self.selected.len() <= self.bounds.min {
                    debug!(label, min = self.bounds.min, "Removal rejected at minimum");
                    return;
                }
                self.selected.remove(position);
            }
            None => {
                if self.selected.len() >= self.bounds.max {
                    debug!(label, max = self.bounds.max, "Addition rejected at maximum");
                    return;
                }
                self.selected.push(label.to_string());
            }
        }

        self.notify();
    }

    /// Catalog items matching `query` (label or category name, case-insensitive)
    /// and `active_category` when set, with selected items moved to the front.
    ///
    /// Relative catalog order is preserved inside both groups.
    pub fn filter_view(&self, query: &str, active_category: Option<FlavorCategory>) -> Vec<&CatalogItem> {
        let needle = query.trim().to_lowercase();
        let mut view: Vec<&CatalogItem> = self
            .catalog
            .items()
            .iter()
            .filter(|item| active_category.is_none_or(|category| item.category == category))
            .filter(|item| item.matches_query(&needle))
            .collect();
        // sort_by_key is stable
        view.sort_by_key(|item| !self.contains(&item.label));
        view
    }

    pub fn is_at_max(&self) -> bool {
        self.selected.len() >= self.bounds.max
    }

    pub fn is_at_min(&self) -> bool {
        self.selected.len() <= self.bounds.min
    }

    /// Selected labels in insertion order
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// The first `n` selections, the ones a summary shows as primary
    pub fn primary(&self, n: usize) -> &[String] {
        &self.selected[..n.min(self.selected.len())]
    }

    pub fn contains(&self, label: &str) -> bool {
        self.selected.iter().any(|selected| selected == label)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn bounds(&self) -> SelectionBounds {
        self.bounds
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Drop every selection when the flow restarts
    pub fn clear(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.selected.clear();
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.selected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn small_catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(vec![
                CatalogItem::new("Lemon", FlavorCategory::Fruity),
                CatalogItem::new("Rose", FlavorCategory::Floral),
                CatalogItem::new("Honey", FlavorCategory::Sweet),
                CatalogItem::new("Lime", FlavorCategory::Fruity),
            ])
            .unwrap(),
        )
    }

    fn labels(view: &[&CatalogItem]) -> Vec<String> {
        view.iter().map(|item| item.label.clone()).collect()
    }

    #[test]
    fn test_bounds_validation() {
        assert!(SelectionBounds::new(1, 10).is_ok());
        assert!(SelectionBounds::new(0, 0).is_err());
        assert!(SelectionBounds::new(3, 2).is_err());
        assert_eq!(SelectionBounds::default(), SelectionBounds { min: 1, max: 10 });
    }

    #[test]
    fn test_toggle_adds_at_end() {
        let mut set = SelectionSet::new(small_catalog(), SelectionBounds::default());
        set.toggle("Rose");
        set.toggle("Lemon");
        assert_eq!(set.selected(), ["Rose", "Lemon"]);
    }

    #[test]
    fn test_removal_at_minimum_is_ignored() {
        let mut set = SelectionSet::new(small_catalog(), SelectionBounds::default());
        set.toggle("Rose");
        set.toggle("Rose");
        assert_eq!(set.selected(), ["Rose"]);
        assert!(set.is_at_min());
    }

    #[test]
    fn test_addition_at_maximum_is_ignored() {
        let bounds = SelectionBounds::new(1, 2).unwrap();
        let mut set = SelectionSet::new(small_catalog(), bounds);
        set.toggle("Rose");
        set.toggle("Lemon");
        assert!(set.is_at_max());
        set.toggle("Honey");
        assert_eq!(set.selected(), ["Rose", "Lemon"]);
    }

    #[test]
    fn test_unknown_label_is_ignored() {
        let mut set = SelectionSet::new(small_catalog(), SelectionBounds::default());
        set.toggle("Durian");
        assert!(set.is_empty());
    }

    #[test]
    fn test_seed_validation() {
        let bounds = SelectionBounds::new(1, 2).unwrap();
        assert!(SelectionSet::with_selected(small_catalog(), bounds, ["Rose", "Lemon"]).is_ok());
        assert!(SelectionSet::with_selected(small_catalog(), bounds, ["Durian"]).is_err());
        assert!(SelectionSet::with_selected(small_catalog(), bounds, ["Rose", "Rose"]).is_err());
        assert!(
            SelectionSet::with_selected(small_catalog(), bounds, ["Rose", "Lemon", "Honey"]).is_err()
        );
    }

    #[test]
    fn test_filter_view_puts_selected_first() {
        let mut set = SelectionSet::new(small_catalog(), SelectionBounds::default());
        set.toggle("Lime");
        set.toggle("Honey");
        let view = set.filter_view("", None);
        assert_eq!(labels(&view), ["Honey", "Lime", "Lemon", "Rose"]);
    }

    #[test]
    fn test_filter_view_by_query_and_category() {
        let set = SelectionSet::new(small_catalog(), SelectionBounds::default());
        assert_eq!(labels(&set.filter_view("LI", None)), ["Lime"]);
        assert_eq!(
            labels(&set.filter_view("", Some(FlavorCategory::Fruity))),
            ["Lemon", "Lime"]
        );
        assert_eq!(labels(&set.filter_view("fruity", None)), ["Lemon", "Lime"]);
        assert!(set.filter_view("rose", Some(FlavorCategory::Fruity)).is_empty());
    }

    #[test]
    fn test_primary() {
        let set =
            SelectionSet::with_selected(small_catalog(), SelectionBounds::default(), ["Rose", "Lemon", "Honey"])
                .unwrap();
        assert_eq!(set.primary(2), ["Rose", "Lemon"]);
        assert_eq!(set.primary(10).len(), 3);
    }

    #[test]
    fn test_listener_fires_only_on_applied_changes() {
        let calls = Arc::new(Mutex::new(Vec::<Vec<String>>::new()));
        let sink = Arc::clone(&calls);
        let mut set = SelectionSet::new(small_catalog(), SelectionBounds::new(1, 1).unwrap());
        set.set_on_change(move |selected| sink.lock().unwrap().push(selected.to_vec()));

        set.toggle("Rose");
        set.toggle("Lemon"); // at max
        set.toggle("Rose"); // at min

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ["Rose"]);
    }

    #[test]
    fn test_replace_is_all_or_nothing() {
        let mut set =
            SelectionSet::with_selected(small_catalog(), SelectionBounds::default(), ["Rose"]).unwrap();
        assert!(set.replace(["Lemon", "Durian"]).is_err());
        assert_eq!(set.selected(), ["Rose"]);
        set.replace(["Lime", "Honey"]).unwrap();
        assert_eq!(set.selected(), ["Lime", "Honey"]);
    }

    #[test]
    fn test_clear() {
        let mut set =
            SelectionSet::with_selected(small_catalog(), SelectionBounds::default(), ["Rose"]).unwrap();
        set.clear();
        assert!(set.is_empty());
    }
}
