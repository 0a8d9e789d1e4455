use ecosystem_catalog::{CatalogService, CsvOptions, SqliteCatalogStore};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A catalog service backed by a throwaway SQLite database.
#[allow(dead_code)]
pub struct TestCatalog {
    pub service: CatalogService,
    pub store: Arc<SqliteCatalogStore>,
    pub db_path: PathBuf,
    _temp_dir: TempDir,
}

impl TestCatalog {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("catalog.db");
        let store =
            Arc::new(SqliteCatalogStore::new(&db_path).expect("Failed to open catalog store"));
        let service = CatalogService::new(store.clone(), CsvOptions::default());
        TestCatalog {
            service,
            store,
            db_path,
            _temp_dir: temp_dir,
        }
    }

    #[allow(dead_code)]
    /// A test catalog with the rows of `VALID_CSV_ROWS` already imported.
    pub fn with_records() -> Self {
        let catalog = Self::new();
        let csv = format!("{}{}", super::CSV_HEADER, super::VALID_CSV_ROWS);
        catalog
            .service
            .import_csv(csv.as_bytes())
            .expect("Failed to import fixture rows");
        catalog
    }
}
