//! CatalogStore trait definition.
//!
//! The minimal keyed-storage contract the catalog service persists through.
//! Records are keyed by their `code`.

use super::models::Record;
use anyhow::Result;

/// Trait for catalog storage backends.
pub trait CatalogStore: Send + Sync {
    /// Get a record by code.
    /// Returns None if no record has that code.
    fn find_by_id(&self, code: &str) -> Result<Option<Record>>;

    /// Get every record, in insertion order.
    fn find_all(&self) -> Result<Vec<Record>>;

    /// Insert a record, or overwrite the stored record with the same code.
    fn save(&self, record: &Record) -> Result<()>;

    /// Save a batch of records. Either every record is written or none is.
    fn save_all(&self, records: &[Record]) -> Result<()>;

    /// Delete a record by code.
    /// Returns false if no record had that code.
    fn delete_by_id(&self, code: &str) -> Result<bool>;

    /// Check whether a record with the given code exists.
    fn exists_by_id(&self, code: &str) -> Result<bool>;

    /// Get the number of records in the catalog.
    fn count(&self) -> Result<usize>;
}
