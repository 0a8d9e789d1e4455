use super::author_names::normalize_author_names;
use super::csv_parser::RowFields;
use crate::catalog_store::Record;

/// Builds the canonical `Record` for a parsed row, normalizing its authors.
pub fn assemble_record(row: RowFields) -> Record {
    let author = normalize_author_names(&row.raw_authors);
    Record {
        code: row.code,
        title: row.title,
        author,
        year: row.year,
        reference: row.reference,
        url: row.url,
        source_type: row.source_type,
        media: row.media,
        drive_url: row.drive_url,
        image_url: row.image_url,
        notes: row.notes,
    }
}
