//! Catalog record models.
//!
//! `Record` is the canonical bibliographic entry held by a `CatalogStore`,
//! `PartialRecord` is the patch shape used by partial updates.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Enumerations
// =============================================================================

/// Classification of a bibliographic source.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceType {
    Book,
    Article,
    Thesis,
    Dissertation,
    Dataset,
    Report,
    Chapter,
    /// Anything we don't have a variant for, kept as written (trimmed).
    Other(String),
}

impl SourceType {
    /// Convert from database string representation
    pub fn from_db_str(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "book" => SourceType::Book,
            "article" => SourceType::Article,
            "thesis" => SourceType::Thesis,
            "dissertation" => SourceType::Dissertation,
            "dataset" => SourceType::Dataset,
            "report" => SourceType::Report,
            "chapter" => SourceType::Chapter,
            _ => SourceType::Other(trimmed.to_string()),
        }
    }

    /// Convert to database string representation
    pub fn to_db_str(&self) -> &str {
        match self {
            SourceType::Book => "book",
            SourceType::Article => "article",
            SourceType::Thesis => "thesis",
            SourceType::Dissertation => "dissertation",
            SourceType::Dataset => "dataset",
            SourceType::Report => "report",
            SourceType::Chapter => "chapter",
            SourceType::Other(s) => s,
        }
    }
}

impl From<String> for SourceType {
    fn from(value: String) -> Self {
        SourceType::from_db_str(&value)
    }
}

impl From<SourceType> for String {
    fn from(value: SourceType) -> Self {
        value.to_db_str().to_string()
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// Storage medium a source is available on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Media {
    Print,
    Digital,
    Audiovisual,
    Other(String),
}

impl Media {
    /// Convert from database string representation
    pub fn from_db_str(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "print" => Media::Print,
            "digital" => Media::Digital,
            "audiovisual" => Media::Audiovisual,
            _ => Media::Other(trimmed.to_string()),
        }
    }

    /// Convert to database string representation
    pub fn to_db_str(&self) -> &str {
        match self {
            Media::Print => "print",
            Media::Digital => "digital",
            Media::Audiovisual => "audiovisual",
            Media::Other(s) => s,
        }
    }
}

impl From<String> for Media {
    fn from(value: String) -> Self {
        Media::from_db_str(&value)
    }
}

impl From<Media> for String {
    fn from(value: Media) -> Self {
        value.to_db_str().to_string()
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

// =============================================================================
// Core Entities
// =============================================================================

/// A catalog entry, keyed by `code`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub code: String,
    pub title: String,
    /// Display form, several people joined by ", ".
    pub author: String,
    pub year: u32,
    /// Free-text citation.
    pub reference: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub media: Media,
    #[serde(default)]
    pub drive_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Patch for a partial update. `None` means the field was not supplied.
///
/// There is no `code`: identity never changes through an update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialRecord {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<u32>,
    pub reference: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub source_type: Option<SourceType>,
    pub media: Option<Media>,
    pub drive_url: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}
