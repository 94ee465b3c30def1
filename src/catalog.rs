//! Flavor catalog
//!
//! The fixed list of selectable flavor descriptors, grouped by category.
//! A catalog is immutable once built; labels are unique within it.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{CupNoteError, Result};
use crate::types::FlavorCategory;

/// One selectable entry of a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub label: String,
    pub category: FlavorCategory,
    /// Opaque data for the renderer (the built-in catalog stores a `color`)
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl CatalogItem {
    pub fn new(label: impl Into<String>, category: FlavorCategory) -> Self {
        Self {
            label: label.into(),
            category,
            metadata: serde_json::Value::Null,
        }
    }

    /// Attach renderer metadata
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Case-insensitive substring match on label or category name
    pub fn matches_query(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.label.to_lowercase().contains(needle_lower)
            || self.category.matches_query(needle_lower)
    }
}

/// Immutable, label-indexed list of catalog items
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate labels
    pub fn new(items: Vec<CatalogItem>) -> Result<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.label.trim().is_empty() {
                return Err(CupNoteError::validation(format!(
                    "catalog item {} has an empty label",
                    position
                )));
            }
            if index.insert(item.label.clone(), position).is_some() {
                return Err(CupNoteError::validation(format!(
                    "duplicate catalog label '{}'",
                    item.label
                )));
            }
        }
        Ok(Self { items, index })
    }

    /// The built-in flavor wheel: 85 descriptors across 7 categories
    pub fn builtin() -> Self {
        let items = BUILTIN_FLAVORS
            .iter()
            .map(|(label, category)| {
                CatalogItem::new(*label, *category)
                    .with_metadata(serde_json::json!({ "color": category.color_hex() }))
            })
            .collect::<Vec<_>>();
        let index = items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.label.clone(), position))
            .collect();
        Self { items, index }
    }

    /// Load a catalog from a JSON array of items
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog from {:?}", path.as_ref()))?;
        let items: Vec<CatalogItem> =
            serde_json::from_str(&content).context("Failed to parse catalog JSON")?;
        let catalog = Self::new(items)?;
        tracing::info!(items = catalog.len(), "Loaded catalog from {:?}", path.as_ref());
        Ok(catalog)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn get(&self, label: &str) -> Option<&CatalogItem> {
        self.index.get(label).map(|&position| &self.items[position])
    }

    /// Items of one category, in catalog order
    pub fn by_category(&self, category: FlavorCategory) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Distinct categories present, in first-appearance order
    pub fn categories(&self) -> Vec<FlavorCategory> {
        let mut seen = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category) {
                seen.push(item.category);
            }
        }
        seen
    }
}

const BUILTIN_FLAVORS: &[(&str, FlavorCategory)] = &[
    // Fruity
    ("레몬", FlavorCategory::Fruity),
    ("라임", FlavorCategory::Fruity),
    ("자몽", FlavorCategory::Fruity),
    ("오렌지", FlavorCategory::Fruity),
    ("귤", FlavorCategory::Fruity),
    ("청사과", FlavorCategory::Fruity),
    ("사과", FlavorCategory::Fruity),
    ("배", FlavorCategory::Fruity),
    ("복숭아", FlavorCategory::Fruity),
    ("살구", FlavorCategory::Fruity),
    ("자두", FlavorCategory::Fruity),
    ("체리", FlavorCategory::Fruity),
    ("딸기", FlavorCategory::Fruity),
    ("라즈베리", FlavorCategory::Fruity),
    ("블루베리", FlavorCategory::Fruity),
    ("블랙베리", FlavorCategory::Fruity),
    ("포도", FlavorCategory::Fruity),
    ("건포도", FlavorCategory::Fruity),
    ("파인애플", FlavorCategory::Fruity),
    ("망고", FlavorCategory::Fruity),
    // Floral
    ("자스민", FlavorCategory::Floral),
    ("장미", FlavorCategory::Floral),
    ("라벤더", FlavorCategory::Floral),
    ("캐모마일", FlavorCategory::Floral),
    ("오렌지 블로썸", FlavorCategory::Floral),
    ("히비스커스", FlavorCategory::Floral),
    ("아카시아", FlavorCategory::Floral),
    ("라일락", FlavorCategory::Floral),
    ("제비꽃", FlavorCategory::Floral),
    ("홍차", FlavorCategory::Floral),
    // Sweet
    ("꿀", FlavorCategory::Sweet),
    ("메이플 시럽", FlavorCategory::Sweet),
    ("흑설탕", FlavorCategory::Sweet),
    ("캐러멜", FlavorCategory::Sweet),
    ("바닐라", FlavorCategory::Sweet),
    ("당밀", FlavorCategory::Sweet),
    ("토피", FlavorCategory::Sweet),
    ("마시멜로", FlavorCategory::Sweet),
    ("카스텔라", FlavorCategory::Sweet),
    ("연유", FlavorCategory::Sweet),
    ("조청", FlavorCategory::Sweet),
    ("황설탕", FlavorCategory::Sweet),
    // Nutty / cocoa
    ("아몬드", FlavorCategory::NuttyCocoa),
    ("헤이즐넛", FlavorCategory::NuttyCocoa),
    ("땅콩", FlavorCategory::NuttyCocoa),
    ("호두", FlavorCategory::NuttyCocoa),
    ("피칸", FlavorCategory::NuttyCocoa),
    ("캐슈넛", FlavorCategory::NuttyCocoa),
    ("마카다미아", FlavorCategory::NuttyCocoa),
    ("밀크 초콜릿", FlavorCategory::NuttyCocoa),
    ("다크 초콜릿", FlavorCategory::NuttyCocoa),
    ("코코아", FlavorCategory::NuttyCocoa),
    ("카카오닙스", FlavorCategory::NuttyCocoa),
    ("누가", FlavorCategory::NuttyCocoa),
    // Spice
    ("시나몬", FlavorCategory::Spice),
    ("정향", FlavorCategory::Spice),
    ("육두구", FlavorCategory::Spice),
    ("카다멈", FlavorCategory::Spice),
    ("후추", FlavorCategory::Spice),
    ("생강", FlavorCategory::Spice),
    ("아니스", FlavorCategory::Spice),
    ("올스파이스", FlavorCategory::Spice),
    ("감초", FlavorCategory::Spice),
    ("고수 씨앗", FlavorCategory::Spice),
    // Roasted
    ("토스트", FlavorCategory::Roasted),
    ("구운 빵", FlavorCategory::Roasted),
    ("비스킷", FlavorCategory::Roasted),
    ("시리얼", FlavorCategory::Roasted),
    ("몰트", FlavorCategory::Roasted),
    ("훈연", FlavorCategory::Roasted),
    ("담배", FlavorCategory::Roasted),
    ("탄 설탕", FlavorCategory::Roasted),
    ("볶은 보리", FlavorCategory::Roasted),
    ("숯", FlavorCategory::Roasted),
    ("삼나무", FlavorCategory::Roasted),
    // Vegetal
    ("풀", FlavorCategory::Vegetal),
    ("완두콩", FlavorCategory::Vegetal),
    ("올리브", FlavorCategory::Vegetal),
    ("토마토", FlavorCategory::Vegetal),
    ("민트", FlavorCategory::Vegetal),
    ("녹차", FlavorCategory::Vegetal),
    ("건초", FlavorCategory::Vegetal),
    ("허브", FlavorCategory::Vegetal),
    ("바질", FlavorCategory::Vegetal),
    ("세이지", FlavorCategory::Vegetal),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_85_items_in_7_categories() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 85);
        assert_eq!(catalog.categories().len(), 7);
    }

    #[test]
    fn test_builtin_labels_are_unique() {
        let catalog = Catalog::builtin();
        let rebuilt = Catalog::new(catalog.items().to_vec());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let items = vec![
            CatalogItem::new("꿀", FlavorCategory::Sweet),
            CatalogItem::new("꿀", FlavorCategory::Floral),
        ];
        let err = Catalog::new(items).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_empty_label_rejected() {
        let items = vec![CatalogItem::new("  ", FlavorCategory::Sweet)];
        assert!(Catalog::new(items).is_err());
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::builtin();
        assert!(catalog.contains("자스민"));
        assert_eq!(catalog.get("자스민").unwrap().category, FlavorCategory::Floral);
        assert!(catalog.get("unknown").is_none());
        assert_eq!(catalog.by_category(FlavorCategory::Fruity).count(), 20);
    }

    #[test]
    fn test_builtin_metadata_carries_color() {
        let catalog = Catalog::builtin();
        let item = catalog.get("레몬").unwrap();
        assert_eq!(item.metadata["color"], "#E5484D");
        for item in catalog.items() {
            assert_eq!(item.metadata["color"], item.category.color_hex(), "{}", item.label);
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[{"label": "Lemon", "category": "fruity"}, {"label": "Rose", "category": "floral", "metadata": {"color": "red"}}]"#,
        )
        .unwrap();

        let catalog = Catalog::load_from_file(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Lemon").unwrap().metadata, serde_json::Value::Null);
        assert_eq!(catalog.get("Rose").unwrap().metadata["color"], "red");
    }

    #[test]
    fn test_load_rejects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[{"label": "Lemon", "category": "fruity"}, {"label": "Lemon", "category": "fruity"}]"#,
        )
        .unwrap();
        assert!(Catalog::load_from_file(&path).is_err());
    }

    #[test]
    fn test_item_query_matching() {
        let item = CatalogItem::new("Dark Chocolate", FlavorCategory::NuttyCocoa);
        assert!(item.matches_query(""));
        assert!(item.matches_query("chocolate"));
        assert!(item.matches_query("nutty"));
        assert!(item.matches_query("초콜릿"));
        assert!(!item.matches_query("lemon"));
    }
}
