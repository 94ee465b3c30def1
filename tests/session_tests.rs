//! End-to-end tasting session tests
//!
//! Configuration files, custom catalogs and draft files on disk.

use cupnote::catalog::{Catalog, CatalogItem};
use cupnote::config::AppConfig;
use cupnote::draft::TastingDraft;
use cupnote::selection::SelectionBounds;
use cupnote::session::TastingSession;
use cupnote::types::{FlavorCategory, TasteAxis, WizardStep};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn session() -> TastingSession {
    TastingSession::new(&AppConfig::default(), Arc::new(Catalog::builtin())).unwrap()
}

#[test]
fn test_full_flow_saves_and_restores_draft() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("draft.json");

    let mut source = session();
    source.progress_mut().set_step(WizardStep::Taste.index()).unwrap();
    source.flavors_mut().toggle("블루베리");
    source.flavors_mut().toggle("다크 초콜릿");
    source.ratings_mut().set_value(TasteAxis::Acidity, 7.76);
    source.ratings_mut().set_value(TasteAxis::Body, 3.0);
    source.set_note("에티오피아 워시드");

    let target_path = path.clone();
    let handle = source
        .save_draft(move |draft| draft.save_to_file(&target_path))
        .unwrap();
    assert!(!handle.join().is_failure());

    let draft = TastingDraft::load_from_file(&path).unwrap();
    assert_eq!(draft.step, 4);
    assert!(draft.saved_at_unix > 0);

    let mut restored = session();
    restored.restore(&draft).unwrap();
    assert_eq!(restored.current_step(), WizardStep::Taste);
    assert_eq!(restored.flavors().selected(), ["블루베리", "다크 초콜릿"]);
    assert_eq!(restored.ratings().value(TasteAxis::Acidity), Some(7.8));
    assert_eq!(restored.ratings().value(TasteAxis::Body), Some(3.0));
    assert_eq!(restored.note(), "에티오피아 워시드");
}

#[test]
fn test_failed_save_leaves_session_unchanged() {
    let mut session = session();
    session.flavors_mut().toggle("꿀");
    session.progress_mut().advance();
    let before = session.snapshot();

    let handle = session
        .save_draft(|_| anyhow::bail!("disk full"))
        .unwrap();
    assert!(handle.join().is_failure());
    assert_eq!(session.snapshot(), before);
    assert!(!session.progress().is_saving());
    assert!(session.progress().poll_events()[0].is_failure());
}

#[test]
fn test_config_file_drives_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "selection": { "min": 0, "max": 2 },
            "rating": { "scale": { "minimum": 0, "maximum": 5, "step": 0.5, "default_value": 2.5 } },
            "total_steps": 8
        }"#,
    )
    .unwrap();

    let config = AppConfig::load_from_file(&path).unwrap();
    config.validate().unwrap();
    assert_eq!(config.selection, SelectionBounds { min: 0, max: 2 });

    let mut session = TastingSession::from_config(&config).unwrap();
    assert_eq!(session.ratings().value(TasteAxis::Balance), Some(2.5));
    assert_eq!(session.ratings_mut().set_value(TasteAxis::Balance, 3.3), Some(3.5));

    for label in ["꿀", "레몬", "장미"] {
        session.flavors_mut().toggle(label);
    }
    assert_eq!(session.flavors().selected(), ["꿀", "레몬"]);
    session.flavors_mut().toggle("꿀");
    session.flavors_mut().toggle("레몬");
    assert!(session.flavors().is_empty());
}

#[test]
fn test_custom_catalog_from_config() {
    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("catalog.json");
    let items = vec![
        CatalogItem::new("Yuzu", FlavorCategory::Fruity),
        CatalogItem::new("Hojicha", FlavorCategory::Roasted),
    ];
    fs::write(&catalog_path, serde_json::to_string(&items).unwrap()).unwrap();

    let config = AppConfig {
        catalog_path: Some(catalog_path),
        ..AppConfig::default()
    };
    let config_path = dir.path().join("config.json");
    config.save_to_file(&config_path).unwrap();

    let loaded = AppConfig::load_from_file(&config_path).unwrap();
    let mut session = TastingSession::from_config(&loaded).unwrap();
    assert_eq!(session.flavors().catalog().len(), 2);
    session.flavors_mut().toggle("Yuzu");
    session.flavors_mut().toggle("레몬");
    assert_eq!(session.flavors().selected(), ["Yuzu"]);
}

#[test]
fn test_draft_from_other_catalog_is_rejected() {
    let mut draft = session().snapshot();
    draft.flavors = vec!["Yuzu".to_string()];
    let mut target = session();
    assert!(target.restore(&draft).is_err());
    assert!(target.flavors().is_empty());
}

#[test]
fn test_missing_files_report_context() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    let err = AppConfig::load_from_file(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
    assert!(TastingDraft::load_from_file(&missing).is_err());
}
