//! End-to-end tests for bulk CSV ingestion into a SQLite catalog.

mod common;

use common::{
    TestCatalog, CSV_HEADER, RECORD_1_AUTHOR, RECORD_1_CODE, RECORD_1_RAW_AUTHORS,
    RECORD_1_TITLE, RECORD_2_CODE, RECORD_3_CODE, VALID_CSV_ROWS,
};
use ecosystem_catalog::{
    CatalogError, CatalogStore, Media, ParseError, SourceType, SqliteCatalogStore,
};

#[test]
fn test_import_persists_every_row_in_order() {
    let catalog = TestCatalog::new();
    let csv = format!("{}{}", CSV_HEADER, VALID_CSV_ROWS);

    let imported = catalog.service.import_csv(csv.as_bytes()).unwrap();

    let codes: Vec<&str> = imported.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec![RECORD_1_CODE, RECORD_2_CODE, RECORD_3_CODE]);
    assert_eq!(catalog.store.find_all().unwrap(), imported);
}

#[test]
fn test_import_normalizes_authors() {
    let catalog = TestCatalog::with_records();

    let record = catalog.service.get(RECORD_1_CODE).unwrap();

    assert_eq!(record.title, RECORD_1_TITLE);
    assert_eq!(record.author, RECORD_1_AUTHOR);
    assert_ne!(record.author, RECORD_1_RAW_AUTHORS);
    // the reference column is free text and is left as uploaded
    assert_eq!(record.reference, "Doe, J.; Smith, J. (2019)");
}

#[test]
fn test_import_maps_typed_columns() {
    let catalog = TestCatalog::with_records();

    let first = catalog.service.get(RECORD_1_CODE).unwrap();
    assert_eq!(first.year, 2019);
    assert_eq!(first.source_type, SourceType::Thesis);
    assert_eq!(first.media, Media::Digital);
    assert_eq!(first.drive_url.as_deref(), Some("https://drive.example/1"));
    assert_eq!(first.notes, None);

    let second = catalog.service.get(RECORD_2_CODE).unwrap();
    assert_eq!(second.author, "Prince");
    assert_eq!(second.url, None);
    assert_eq!(second.image_url.as_deref(), Some("https://img.example/2"));
    assert_eq!(second.notes.as_deref(), Some("donated copy"));

    let third = catalog.service.get(RECORD_3_CODE).unwrap();
    assert_eq!(third.year, 0);
    assert_eq!(third.author, "Ana Lima");
}

#[test]
fn test_import_header_only_is_empty_batch() {
    let catalog = TestCatalog::new();

    let imported = catalog.service.import_csv(CSV_HEADER.as_bytes()).unwrap();

    assert!(imported.is_empty());
    assert_eq!(catalog.store.count().unwrap(), 0);
}

#[test]
fn test_import_empty_file_fails() {
    let catalog = TestCatalog::new();

    let err = catalog.service.import_csv(b"").unwrap_err();

    assert!(matches!(err, CatalogError::Parse(ParseError::EmptyInput)));
}

#[test]
fn test_import_short_row_aborts_whole_batch() {
    let catalog = TestCatalog::new();
    let csv = format!(
        "{}{}ECO-004,Short,Prince,2000,ref,,book,print,,\n",
        CSV_HEADER, VALID_CSV_ROWS
    );

    let err = catalog.service.import_csv(csv.as_bytes()).unwrap_err();

    match err {
        CatalogError::Parse(ParseError::MalformedRow { row, found, .. }) => {
            assert_eq!(row, 4);
            assert_eq!(found, 10);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(catalog.store.count().unwrap(), 0);
}

#[test]
fn test_import_bad_year_aborts_whole_batch() {
    let catalog = TestCatalog::new();
    let csv = format!(
        "{}ECO-010,Good,Prince,2000,ref,,book,print,,,\nECO-011,Bad,Prince,MMXX,ref,,book,print,,,\n",
        CSV_HEADER
    );

    let err = catalog.service.import_csv(csv.as_bytes()).unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Parse(ParseError::InvalidYear { row: 2, .. })
    ));
    assert!(!catalog.store.exists_by_id("ECO-010").unwrap());
}

#[test]
fn test_failed_import_leaves_existing_records_untouched() {
    let catalog = TestCatalog::with_records();
    let csv = format!(
        "{}ECO-001,Overwritten,Prince,2000,ref,,book,print,,,\nECO-012,Bad,Prince,,ref,,book,print,,,\n",
        CSV_HEADER
    );

    assert!(catalog.service.import_csv(csv.as_bytes()).is_err());

    assert_eq!(catalog.store.count().unwrap(), 3);
    assert_eq!(
        catalog.service.get(RECORD_1_CODE).unwrap().title,
        RECORD_1_TITLE
    );
}

#[test]
fn test_reimport_overwrites_by_code() {
    let catalog = TestCatalog::with_records();
    let csv = format!(
        "{}ECO-002,Tidal Flat Birds (2nd ed.),Prince,1990,ref,,book,print,,,\n",
        CSV_HEADER
    );

    catalog.service.import_csv(csv.as_bytes()).unwrap();

    assert_eq!(catalog.store.count().unwrap(), 3);
    let record = catalog.service.get(RECORD_2_CODE).unwrap();
    assert_eq!(record.title, "Tidal Flat Birds (2nd ed.)");
    assert_eq!(record.year, 1990);
}

#[test]
fn test_imported_records_survive_reopen() {
    let catalog = TestCatalog::with_records();

    let reopened = SqliteCatalogStore::new(&catalog.db_path).unwrap();

    assert_eq!(reopened.count().unwrap(), 3);
    assert_eq!(
        reopened.find_by_id(RECORD_1_CODE).unwrap().unwrap().author,
        RECORD_1_AUTHOR
    );
}
