//! Ecosystem Catalog Library
//!
//! CSV ingestion, author-name normalization and record reconciliation for the
//! bibliographic catalog, plus the stores records are persisted in.

pub mod catalog_store;
pub mod config;
pub mod ingestion;
pub mod reconcile;
pub mod service;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use catalog_store::{
    CatalogStore, Media, MemoryCatalogStore, PartialRecord, Record, SourceType,
    SqliteCatalogStore,
};
pub use ingestion::{CsvOptions, CsvRecordParser, ParseError};
pub use service::{CatalogError, CatalogService};
