//! End-to-end tests for creating, updating and deleting single records.

mod common;

use common::{TestCatalog, RECORD_1_AUTHOR, RECORD_1_CODE, RECORD_2_CODE, RECORD_3_CODE};
use ecosystem_catalog::{CatalogError, CatalogStore, Media, PartialRecord, Record, SourceType};

fn make_record(code: &str) -> Record {
    Record {
        code: code.to_string(),
        title: "Salt Marsh Atlas".to_string(),
        author: "Maria Silva".to_string(),
        year: 2005,
        reference: "Silva (2005)".to_string(),
        url: None,
        source_type: SourceType::Book,
        media: Media::Print,
        drive_url: None,
        image_url: None,
        notes: None,
    }
}

#[test]
fn test_create_and_get() {
    let catalog = TestCatalog::new();

    catalog.service.create(make_record("NEW-1")).unwrap();

    assert_eq!(
        catalog.service.get("NEW-1").unwrap(),
        make_record("NEW-1")
    );
}

#[test]
fn test_create_existing_code_fails() {
    let catalog = TestCatalog::with_records();

    let err = catalog.service.create(make_record(RECORD_1_CODE)).unwrap_err();

    assert!(matches!(err, CatalogError::AlreadyExists(_)));
    assert_eq!(
        catalog.service.get(RECORD_1_CODE).unwrap().author,
        RECORD_1_AUTHOR
    );
}

#[test]
fn test_full_update_overwrites_fields_but_not_code() {
    let catalog = TestCatalog::with_records();
    let mut incoming = make_record("SOMETHING-ELSE");
    incoming.title = "New Title".to_string();

    let updated = catalog
        .service
        .full_update(RECORD_1_CODE, incoming)
        .unwrap();

    assert_eq!(updated.code, RECORD_1_CODE);
    assert_eq!(updated.title, "New Title");
    // fields absent from the incoming record are cleared
    assert_eq!(updated.url, None);
    assert_eq!(updated.drive_url, None);
    assert_eq!(catalog.service.get(RECORD_1_CODE).unwrap(), updated);
    assert!(!catalog.store.exists_by_id("SOMETHING-ELSE").unwrap());
    assert_eq!(catalog.store.count().unwrap(), 3);
}

#[test]
fn test_partial_update_only_notes() {
    let catalog = TestCatalog::with_records();
    let before = catalog.service.get(RECORD_2_CODE).unwrap();
    let patch = PartialRecord {
        notes: Some("x".to_string()),
        ..Default::default()
    };

    let updated = catalog.service.partial_update(RECORD_2_CODE, patch).unwrap();

    let mut expected = before;
    expected.notes = Some("x".to_string());
    assert_eq!(updated, expected);
    assert_eq!(catalog.service.get(RECORD_2_CODE).unwrap(), expected);
}

#[test]
fn test_partial_update_year_zero_from_json() {
    let catalog = TestCatalog::with_records();
    let patch: PartialRecord = serde_json::from_str(r#"{"year": 0, "type": "Report"}"#).unwrap();

    let updated = catalog.service.partial_update(RECORD_1_CODE, patch).unwrap();

    assert_eq!(updated.year, 0);
    assert_eq!(updated.source_type, SourceType::Report);
    assert_eq!(updated.author, RECORD_1_AUTHOR);
}

#[test]
fn test_operations_on_missing_code_fail_with_not_found() {
    let catalog = TestCatalog::with_records();

    assert!(matches!(
        catalog.service.full_update("MISSING", make_record("MISSING")),
        Err(CatalogError::NotFound(code)) if code == "MISSING"
    ));
    assert!(matches!(
        catalog
            .service
            .partial_update("MISSING", PartialRecord::default()),
        Err(CatalogError::NotFound(_))
    ));
    assert!(matches!(
        catalog.service.delete("MISSING"),
        Err(CatalogError::NotFound(_))
    ));
    assert_eq!(catalog.store.count().unwrap(), 3);
}

#[test]
fn test_delete_removes_only_target() {
    let catalog = TestCatalog::with_records();

    catalog.service.delete(RECORD_3_CODE).unwrap();

    let codes: Vec<String> = catalog
        .service
        .list()
        .unwrap()
        .into_iter()
        .map(|r| r.code)
        .collect();
    assert_eq!(codes, vec![RECORD_1_CODE, RECORD_2_CODE]);
    assert!(matches!(
        catalog.service.delete(RECORD_3_CODE),
        Err(CatalogError::NotFound(_))
    ));
}
