//! Update semantics for stored records.
//!
//! Both operations build a new `Record` from the stored one and the update,
//! leaving their inputs untouched. The stored `code` always wins: identity
//! cannot change through an update.

use crate::catalog_store::{PartialRecord, Record};

/// Full replace: every field but `code` comes from `incoming`, empty or not.
pub fn replace(existing: &Record, incoming: &Record) -> Record {
    Record {
        code: existing.code.clone(),
        ..incoming.clone()
    }
}

/// Partial merge: fields supplied by `patch` overwrite, the rest are kept.
pub fn merge(existing: &Record, patch: &PartialRecord) -> Record {
    let existing = existing.clone();
    let patch = patch.clone();
    Record {
        code: existing.code,
        title: patch.title.unwrap_or(existing.title),
        author: patch.author.unwrap_or(existing.author),
        year: patch.year.unwrap_or(existing.year),
        reference: patch.reference.unwrap_or(existing.reference),
        url: patch.url.or(existing.url),
        source_type: patch.source_type.unwrap_or(existing.source_type),
        media: patch.media.unwrap_or(existing.media),
        drive_url: patch.drive_url.or(existing.drive_url),
        image_url: patch.image_url.or(existing.image_url),
        notes: patch.notes.or(existing.notes),
    }
}
