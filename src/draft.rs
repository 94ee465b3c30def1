//! Draft snapshots of an in-progress tasting
//!
//! A [`TastingDraft`] is what a draft-save callback hands to storage and what
//! a restarted session restores from. Where the snapshot goes is up to the
//! caller; the file helpers here are what the `cupnote` binary uses.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::TasteAxis;

/// Serializable state of one tasting flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TastingDraft {
    pub step: usize,
    pub total_steps: usize,
    /// Selected flavors in selection order
    pub flavors: Vec<String>,
    pub ratings: BTreeMap<TasteAxis, f64>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub saved_at_unix: u64,
}

impl TastingDraft {
    /// Stamp the snapshot with the current wall-clock time
    pub fn stamped(mut self) -> Self {
        self.saved_at_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        self
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize draft to JSON")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse draft JSON")
    }

    /// Write the snapshot as pretty JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write draft to {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read draft from {:?}", path.as_ref()))?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TastingDraft {
        let mut ratings = BTreeMap::new();
        ratings.insert(TasteAxis::Acidity, 7.5);
        ratings.insert(TasteAxis::Body, 4.0);
        TastingDraft {
            step: 4,
            total_steps: 8,
            flavors: vec!["자스민".to_string(), "레몬".to_string()],
            ratings,
            note: "아침에 마신 에티오피아".to_string(),
            saved_at_unix: 0,
        }
    }

    #[test]
    fn test_json_uses_axis_keys() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"acidity\": 7.5"));
        assert!(json.contains("자스민"));
    }

    #[test]
    fn test_file_roundtrip_keeps_flavor_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        let draft = sample();
        draft.save_to_file(&path).unwrap();
        let loaded = TastingDraft::load_from_file(&path).unwrap();
        assert_eq!(loaded, draft);
        assert_eq!(loaded.flavors, ["자스민", "레몬"]);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let draft = TastingDraft::from_json(
            r#"{"step": 1, "total_steps": 8, "flavors": [], "ratings": {}}"#,
        )
        .unwrap();
        assert!(draft.note.is_empty());
        assert_eq!(draft.saved_at_unix, 0);
    }

    #[test]
    fn test_unknown_axis_rejected() {
        let result = TastingDraft::from_json(
            r#"{"step": 1, "total_steps": 8, "flavors": [], "ratings": {"umami": 3.0}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_stamped_sets_time() {
        assert!(sample().stamped().saved_at_unix > 0);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(TastingDraft::load_from_file("/nonexistent/draft.json").is_err());
    }
}
