//! Catalog service - the entry points for ingesting and updating records.
//!
//! Bulk import is all-or-nothing: every row is parsed, assembled and
//! validated before a single `save_all` call. Updates read the stored record,
//! reconcile it with the update and save the result. Nothing here guards the
//! read-then-save window against concurrent writers of the same code.

use crate::catalog_store::{
    validate_record, CatalogStore, PartialRecord, Record, ValidationError,
};
use crate::ingestion::{assemble_record, CsvOptions, CsvRecordParser, ParseError};
use crate::reconcile;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors returned by `CatalogService`.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid CSV upload: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid record at row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid record: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Record already exists: {0}")]
    AlreadyExists(String),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    parser: CsvRecordParser,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, csv_options: CsvOptions) -> Self {
        Self {
            store,
            parser: CsvRecordParser::new(csv_options),
        }
    }

    /// Parses an upload and saves one record per data row, in row order.
    /// Any bad row fails the whole upload and nothing is saved.
    pub fn import_csv(&self, raw: &[u8]) -> CatalogResult<Vec<Record>> {
        let mut records = Vec::new();
        for (index, row) in self.parser.parse(raw)?.enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!("Rejecting upload: {}", e);
                    return Err(e.into());
                }
            };
            let record = assemble_record(row);
            if let Err(source) = validate_record(&record) {
                warn!("Rejecting upload, row {}: {}", index + 1, source);
                return Err(CatalogError::InvalidRow {
                    row: index + 1,
                    source,
                });
            }
            records.push(record);
        }

        self.store.save_all(&records)?;
        info!("Imported {} records", records.len());
        Ok(records)
    }

    /// Adds a single record. Its code must not be taken yet.
    pub fn create(&self, record: Record) -> CatalogResult<Record> {
        validate_record(&record)?;
        if self.store.exists_by_id(&record.code)? {
            return Err(CatalogError::AlreadyExists(record.code));
        }
        self.store.save(&record)?;
        debug!("Created record {}", record.code);
        Ok(record)
    }

    pub fn get(&self, code: &str) -> CatalogResult<Record> {
        self.store
            .find_by_id(code)?
            .ok_or_else(|| CatalogError::NotFound(code.to_string()))
    }

    pub fn list(&self) -> CatalogResult<Vec<Record>> {
        Ok(self.store.find_all()?)
    }

    /// Overwrites every field of the stored record except its code.
    pub fn full_update(&self, code: &str, incoming: Record) -> CatalogResult<Record> {
        let existing = self.get(code)?;
        if incoming.code != existing.code {
            debug!(
                "Ignoring code {} in full update of {}",
                incoming.code, existing.code
            );
        }
        let updated = reconcile::replace(&existing, &incoming);
        self.store.save(&updated)?;
        debug!("Replaced record {}", code);
        Ok(updated)
    }

    /// Overwrites only the fields the patch supplies.
    pub fn partial_update(&self, code: &str, patch: PartialRecord) -> CatalogResult<Record> {
        let existing = self.get(code)?;
        let updated = reconcile::merge(&existing, &patch);
        self.store.save(&updated)?;
        debug!("Patched record {}", code);
        Ok(updated)
    }

    pub fn delete(&self, code: &str) -> CatalogResult<()> {
        if !self.store.delete_by_id(code)? {
            return Err(CatalogError::NotFound(code.to_string()));
        }
        debug!("Deleted record {}", code);
        Ok(())
    }
}
