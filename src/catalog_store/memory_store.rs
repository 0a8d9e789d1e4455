//! In-memory catalog store implementation.
//!
//! Keeps records in a vector behind a mutex. Used for dry runs and tests,
//! nothing survives the process.

use super::models::Record;
use super::trait_def::CatalogStore;
use anyhow::Result;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryCatalogStore {
    records: Mutex<Vec<Record>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn upsert(records: &mut Vec<Record>, record: &Record) {
        match records.iter_mut().find(|r| r.code == record.code) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn find_by_id(&self, code: &str) -> Result<Option<Record>> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.code == code).cloned())
    }

    fn find_all(&self) -> Result<Vec<Record>> {
        Ok(self.records.lock().unwrap().clone())
    }

    fn save(&self, record: &Record) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        Self::upsert(&mut records, record);
        Ok(())
    }

    fn save_all(&self, batch: &[Record]) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        for record in batch {
            Self::upsert(&mut records, record);
        }
        Ok(())
    }

    fn delete_by_id(&self, code: &str) -> Result<bool> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.code != code);
        Ok(records.len() != before)
    }

    fn exists_by_id(&self, code: &str) -> Result<bool> {
        Ok(self.records.lock().unwrap().iter().any(|r| r.code == code))
    }

    fn count(&self) -> Result<usize> {
        Ok(self.records.lock().unwrap().len())
    }
}
