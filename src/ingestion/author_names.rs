//! Author name normalization.
//!
//! Uploads list authors surname-first ("Doe, Jane; Smith, John"), the catalog
//! displays them given-name-first ("Jane Doe, John Smith").

const AUTHOR_SEPARATOR: char = ';';
const NAME_PARTS_SEPARATOR: char = ',';
const DISPLAY_SEPARATOR: &str = ", ";

/// Splits `s` on `separator`, dropping trailing empty pieces.
/// "Doe, Jane;" yields one author, "Doe," has a single name part.
fn split_trimming_trailing_empty(s: &str, separator: char) -> Vec<&str> {
    let mut parts: Vec<&str> = s.split(separator).collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
}

fn normalize_author(segment: &str) -> String {
    let segment = segment.trim();
    match split_trimming_trailing_empty(segment, NAME_PARTS_SEPARATOR)[..] {
        [surname, given_name] => format!("{} {}", given_name.trim(), surname.trim()),
        _ => segment.to_string(),
    }
}

/// Reformats a "Last, First; Last, First" list into "First Last, First Last".
///
/// Segments that are not exactly a surname/given-name pair are kept as they
/// are (trimmed), so this never fails.
pub fn normalize_author_names(raw_authors: &str) -> String {
    split_trimming_trailing_empty(raw_authors, AUTHOR_SEPARATOR)
        .into_iter()
        .map(normalize_author)
        .collect::<Vec<_>>()
        .join(DISPLAY_SEPARATOR)
}
