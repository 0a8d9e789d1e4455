//! Bulk ingestion of catalog uploads.
//!
//! raw CSV bytes -> `CsvRecordParser` -> `RowFields` -> `assemble_record`
//! (author normalization) -> `Record`

mod assembler;
mod author_names;
mod csv_parser;

pub use assembler::assemble_record;
pub use author_names::normalize_author_names;
pub use csv_parser::{
    CsvOptions, CsvRecordParser, ParseError, RowFields, RowIter, RECORD_COLUMN_COUNT,
};
