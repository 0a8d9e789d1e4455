//! SQLite-backed catalog store implementation.

use super::models::*;
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const RECORD_COLUMNS: &str =
    "code, title, author, year, reference, url, source_type, media, drive_url, image_url, notes";

const UPSERT_RECORD_SQL: &str = "INSERT INTO records (code, title, author, year, reference, url, source_type, media, drive_url, image_url, notes)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
     ON CONFLICT(code) DO UPDATE SET
        title = excluded.title,
        author = excluded.author,
        year = excluded.year,
        reference = excluded.reference,
        url = excluded.url,
        source_type = excluded.source_type,
        media = excluded.media,
        drive_url = excluded.drive_url,
        image_url = excluded.image_url,
        notes = excluded.notes,
        updated = cast(strftime('%s','now') as int)";

/// SQLite-backed catalog store.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

fn migrate_if_needed(conn: &mut Connection) -> Result<()> {
    let latest_version = CATALOG_VERSIONED_SCHEMAS.len() - 1;
    let latest_schema = &CATALOG_VERSIONED_SCHEMAS[latest_version];

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    if table_count == 0 {
        info!("Creating catalog db schema at version {}", latest_version);
        latest_schema.create(conn)?;
        return Ok(());
    }

    let db_version: usize = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .context("Failed to read database version")?;
    if db_version < BASE_DB_VERSION {
        bail!(
            "Database has user_version {}, it was not created by this catalog",
            db_version
        );
    }
    let mut current_version = db_version - BASE_DB_VERSION;
    if current_version > latest_version {
        bail!("Database version {} is too new", current_version);
    }

    CATALOG_VERSIONED_SCHEMAS[current_version]
        .validate(conn)
        .with_context(|| format!("Catalog db does not match schema v{}", current_version))?;

    if current_version == latest_version {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for schema in CATALOG_VERSIONED_SCHEMAS.iter().skip(current_version + 1) {
        if let Some(migration_fn) = schema.migration {
            info!(
                "Migrating catalog db from version {} to {}",
                current_version, schema.version
            );
            migration_fn(&tx)?;
            current_version = schema.version;
        }
    }
    tx.pragma_update(None, "user_version", BASE_DB_VERSION + current_version)?;
    tx.commit()?;
    Ok(())
}

impl SqliteCatalogStore {
    /// Open (or create) the catalog database at `db_path`.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path_ref = db_path.as_ref();
        let mut conn = Connection::open_with_flags(
            db_path_ref,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open catalog database {:?}", db_path_ref))?;

        migrate_if_needed(&mut conn)?;

        let record_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM records", [], |r| r.get(0))
            .unwrap_or(0);
        info!(
            "Opened catalog {:?}: {} records",
            db_path_ref, record_count
        );

        Ok(SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Parse a Record from a row selected with `RECORD_COLUMNS`.
    fn parse_record_row(row: &rusqlite::Row) -> rusqlite::Result<Record> {
        let source_type: String = row.get(6)?;
        let media: String = row.get(7)?;
        Ok(Record {
            code: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            year: row.get(3)?,
            reference: row.get(4)?,
            url: row.get(5)?,
            source_type: SourceType::from_db_str(&source_type),
            media: Media::from_db_str(&media),
            drive_url: row.get(8)?,
            image_url: row.get(9)?,
            notes: row.get(10)?,
        })
    }

    fn upsert(conn: &Connection, record: &Record) -> Result<()> {
        let mut stmt = conn.prepare_cached(UPSERT_RECORD_SQL)?;
        stmt.execute(params![
            record.code,
            record.title,
            record.author,
            record.year,
            record.reference,
            record.url,
            record.source_type.to_db_str(),
            record.media.to_db_str(),
            record.drive_url,
            record.image_url,
            record.notes,
        ])
        .with_context(|| format!("Failed to save record {}", record.code))?;
        Ok(())
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn find_by_id(&self, code: &str) -> Result<Option<Record>> {
        let conn = self.conn.lock().unwrap();
        match conn.query_row(
            &format!("SELECT {} FROM records WHERE code = ?1", RECORD_COLUMNS),
            params![code],
            Self::parse_record_row,
        ) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn find_all(&self) -> Result<Vec<Record>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM records ORDER BY rowid",
            RECORD_COLUMNS
        ))?;
        let records = stmt
            .query_map([], Self::parse_record_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn save(&self, record: &Record) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        Self::upsert(&conn, record)
    }

    fn save_all(&self, records: &[Record]) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        for record in records {
            Self::upsert(&tx, record)?;
        }
        tx.commit()?;
        debug!("Saved batch of {} records", records.len());
        Ok(())
    }

    fn delete_by_id(&self, code: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM records WHERE code = ?1", params![code])?;
        Ok(deleted > 0)
    }

    fn exists_by_id(&self, code: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM records WHERE code = ?1",
            params![code],
            |r| r.get(0),
        )?;
        Ok(count > 0)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM records", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}
