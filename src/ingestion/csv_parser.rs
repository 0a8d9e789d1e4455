//! CSV parsing of catalog uploads.
//!
//! An upload is a header row followed by data rows with a fixed column order:
//! code, title, authors, year, reference, url, type, media, driveUrl,
//! imageUrl, notes. The header row is read and skipped, never interpreted.

use crate::catalog_store::{Media, SourceType};
use csv::{Reader, ReaderBuilder, StringRecord};
use std::io::Read;
use thiserror::Error;

/// Number of positional columns every data row must carry.
pub const RECORD_COLUMN_COUNT: usize = 11;

const COL_CODE: usize = 0;
const COL_TITLE: usize = 1;
const COL_AUTHORS: usize = 2;
const COL_YEAR: usize = 3;
const COL_REFERENCE: usize = 4;
const COL_URL: usize = 5;
const COL_TYPE: usize = 6;
const COL_MEDIA: usize = 7;
const COL_DRIVE_URL: usize = 8;
const COL_IMAGE_URL: usize = 9;
const COL_NOTES: usize = 10;

/// Errors produced while parsing an upload. `row` is the 1-based data row
/// number, the header being row 0.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("CSV input is empty, no header row found")]
    EmptyInput,

    #[error("Row {row} has {found} columns, expected at least {expected}")]
    MalformedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Row {row} has an invalid year: {value:?}")]
    InvalidYear { row: usize, value: String },

    #[error("Row {row} is not valid UTF-8")]
    InvalidEncoding { row: usize },

    #[error("Row {row} could not be read: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

impl ParseError {
    fn from_csv(row: usize, error: csv::Error) -> Self {
        if matches!(error.kind(), csv::ErrorKind::Utf8 { .. }) {
            ParseError::InvalidEncoding { row }
        } else {
            ParseError::Csv { row, source: error }
        }
    }
}

/// Typed fields of one data row, before author normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowFields {
    pub code: String,
    pub title: String,
    pub raw_authors: String,
    pub year: u32,
    pub reference: String,
    pub url: Option<String>,
    pub source_type: SourceType,
    pub media: Media,
    pub drive_url: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}

fn optional_field(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl RowFields {
    fn from_record(row: usize, record: &StringRecord) -> Result<Self, ParseError> {
        if record.len() < RECORD_COLUMN_COUNT {
            return Err(ParseError::MalformedRow {
                row,
                found: record.len(),
                expected: RECORD_COLUMN_COUNT,
            });
        }
        // Length checked above, every index below is in range.
        let field = |index: usize| record.get(index).unwrap_or_default();

        let raw_year = field(COL_YEAR);
        let year = raw_year
            .trim()
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidYear {
                row,
                value: raw_year.to_string(),
            })?;

        Ok(RowFields {
            code: field(COL_CODE).to_string(),
            title: field(COL_TITLE).to_string(),
            raw_authors: field(COL_AUTHORS).to_string(),
            year,
            reference: field(COL_REFERENCE).to_string(),
            url: optional_field(field(COL_URL)),
            source_type: SourceType::from_db_str(field(COL_TYPE)),
            media: Media::from_db_str(field(COL_MEDIA)),
            drive_url: optional_field(field(COL_DRIVE_URL)),
            image_url: optional_field(field(COL_IMAGE_URL)),
            notes: optional_field(field(COL_NOTES)),
        })
    }
}

/// Options for reading uploads.
#[derive(Clone, Debug)]
pub struct CsvOptions {
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions { delimiter: b',' }
    }
}

/// Turns raw upload bytes into a sequence of `RowFields`.
#[derive(Clone, Debug, Default)]
pub struct CsvRecordParser {
    options: CsvOptions,
}

impl CsvRecordParser {
    pub fn new(options: CsvOptions) -> Self {
        CsvRecordParser { options }
    }

    /// Reads the header row and returns a lazy iterator over the data rows.
    pub fn parse<'a>(&self, raw: &'a [u8]) -> Result<RowIter<&'a [u8]>, ParseError> {
        self.parse_reader(raw)
    }

    /// Like `parse`, for any byte stream.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<RowIter<R>, ParseError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.options.delimiter)
            .from_reader(reader);

        let mut header = StringRecord::new();
        match reader.read_record(&mut header) {
            Ok(true) => {}
            Ok(false) => return Err(ParseError::EmptyInput),
            Err(e) => return Err(ParseError::from_csv(0, e)),
        }

        Ok(RowIter {
            reader,
            record: StringRecord::new(),
            row: 0,
            failed: false,
        })
    }

    /// Parses every data row, stopping at the first failing one.
    pub fn parse_all(&self, raw: &[u8]) -> Result<Vec<RowFields>, ParseError> {
        self.parse(raw)?.collect()
    }
}

/// Line breaks inside quoted fields of `record`.
fn embedded_line_breaks(record: &StringRecord) -> u64 {
    record
        .iter()
        .map(|field| field.bytes().filter(|b| *b == b'\n').count() as u64)
        .sum()
}

/// Single-pass iterator over the data rows of an upload.
///
/// Yields one `Err` for the first bad row and nothing after it. An empty
/// line between rows is a row with no columns, empty lines after the last
/// row are ignored.
pub struct RowIter<R: Read> {
    reader: Reader<R>,
    record: StringRecord,
    row: usize,
    failed: bool,
}

impl<R: Read> RowIter<R> {
    fn read_row(&mut self) -> Option<Result<RowFields, ParseError>> {
        let line_before = self.reader.position().line();
        let read = self.reader.read_record(&mut self.record);
        if let Ok(false) = read {
            return None;
        }
        self.row += 1;
        if let Err(e) = read {
            return Some(Err(ParseError::from_csv(self.row, e)));
        }

        // The reader skips empty lines without reporting them. A row consumes
        // one line break of its own (a CRLF row is counted on the next read),
        // anything beyond that and its quoted line breaks is a skipped line.
        let line_breaks = self.reader.position().line().saturating_sub(line_before);
        if line_breaks > embedded_line_breaks(&self.record) + 1 {
            return Some(Err(ParseError::MalformedRow {
                row: self.row,
                found: 0,
                expected: RECORD_COLUMN_COUNT,
            }));
        }
        Some(RowFields::from_record(self.row, &self.record))
    }
}

impl<R: Read> Iterator for RowIter<R> {
    type Item = Result<RowFields, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.read_row()?;
        self.failed = result.is_err();
        Some(result)
    }
}
