//! Pivot between per-language record sets and the flat tabular shape.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    error::Error,
    keyspace::KeySpace,
    types::RecordSet,
};

/// Name of the mandatory first spreadsheet column.
pub const KEY_COLUMN: &str = "key";

/// One spreadsheet row: a key and one cell per language.
///
/// Cells align with [`TranslationMatrix::languages`]; an empty string is
/// the explicit marker for a missing or empty translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub key: String,
    pub cells: Vec<String>,
}

/// Master keys crossed with languages, ready for the tabular side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationMatrix {
    /// Template language first, then the rest in discovery order.
    pub languages: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

impl TranslationMatrix {
    /// The header row: `key` followed by the language columns.
    pub fn header(&self) -> Vec<String> {
        let mut header = vec![KEY_COLUMN.to_string()];
        header.extend(self.languages.iter().cloned());
        header
    }

    /// Rows where at least one non-template cell is empty.
    pub fn untranslated_subset(&self) -> TranslationMatrix {
        TranslationMatrix {
            languages: self.languages.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| row.cells.iter().skip(1).any(String::is_empty))
                .cloned()
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Projects record sets onto the key space: one row per master key, one
/// cell per language, empty cells for missing key/language pairs.
pub fn assemble(key_space: &KeySpace, record_sets: &[RecordSet]) -> TranslationMatrix {
    let by_language: HashMap<&str, &RecordSet> = record_sets
        .iter()
        .map(|set| (set.language.as_str(), set))
        .collect();
    let rows = key_space
        .master_keys
        .iter()
        .map(|key| MatrixRow {
            key: key.clone(),
            cells: key_space
                .languages
                .iter()
                .map(|language| {
                    by_language
                        .get(language.as_str())
                        .and_then(|set| set.get(key))
                        .map(|value| value.as_cell().to_string())
                        .unwrap_or_default()
                })
                .collect(),
        })
        .collect();
    TranslationMatrix {
        languages: key_space.languages.clone(),
        rows,
    }
}

/// The inverse projection: header and data rows back to per-language
/// key/cell columns.
///
/// Rows with an empty key cell are skipped. When a key repeats, the later
/// row wins but the key keeps its first position. Cells beyond the named
/// columns are ignored; short rows are padded with empty cells.
pub fn split(
    header: &[String],
    rows: &[Vec<String>],
) -> Result<Vec<(String, Vec<(String, String)>)>, Error> {
    if header.first().map(String::as_str) != Some(KEY_COLUMN) {
        return Err(Error::InvalidGrid(format!(
            "first header column must be '{KEY_COLUMN}'"
        )));
    }
    let languages = &header[1..];
    if languages.is_empty() {
        return Err(Error::InvalidGrid("no language columns".to_string()));
    }

    let mut columns: Vec<(String, Vec<(String, String)>)> = languages
        .iter()
        .map(|language| (language.clone(), Vec::new()))
        .collect();
    let mut seen: Vec<HashMap<String, usize>> = vec![HashMap::new(); languages.len()];
    for row in rows {
        let Some(key) = row.first().filter(|key| !key.is_empty()) else {
            continue;
        };
        for (column, (seen, (_, cells))) in seen.iter_mut().zip(columns.iter_mut()).enumerate() {
            let cell = row.get(column + 1).cloned().unwrap_or_default();
            match seen.get(key.as_str()) {
                Some(&at) => cells[at].1 = cell,
                None => {
                    seen.insert(key.clone(), cells.len());
                    cells.push((key.clone(), cell));
                }
            }
        }
    }
    Ok(columns)
}
