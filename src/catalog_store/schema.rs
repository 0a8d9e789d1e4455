//! SQLite schema definitions for the catalog database.
//!
//! Primary keys are integer rowids, records are looked up by their unique
//! text `code`.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP};

/// Records table - one row per catalog entry
const RECORDS_TABLE_V_0: Table = Table {
    name: "records",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("code", &SqlType::Text, non_null = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("author", &SqlType::Text, non_null = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("reference", &SqlType::Text, non_null = true),
        sqlite_column!("url", &SqlType::Text),
        sqlite_column!("source_type", &SqlType::Text, non_null = true),
        sqlite_column!("media", &SqlType::Text, non_null = true),
        sqlite_column!("drive_url", &SqlType::Text),
        sqlite_column!("image_url", &SqlType::Text),
        sqlite_column!("notes", &SqlType::Text),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!(
            "updated",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_records_source_type", "source_type")],
    unique_constraints: &[&["code"]],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[RECORDS_TABLE_V_0],
    migration: None,
}];
