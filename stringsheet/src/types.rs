//! Core data model: values, records, and per-language record sets.

use std::{collections::HashMap, fmt, ops::Range};

use serde::Serialize;

/// A single translation value.
///
/// `Text` is the ordinary case: one flat string. `Structured` carries a
/// compact JSON serialization of an object or array value (ARB metadata
/// entries, for example) and is never interpreted further; it only needs to
/// survive the trip through a spreadsheet cell and back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Value {
    Text(String),
    Structured(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// The cell text this value contributes to the tabular side.
    pub fn as_cell(&self) -> &str {
        match self {
            Value::Text(s) | Value::Structured(s) => s,
        }
    }

    /// Decodes a spreadsheet cell back into a value.
    ///
    /// Cells that look bracketed and parse as JSON become `Structured`
    /// (re-serialized compact). Everything else, including bracketed text
    /// that fails to parse, stays flat `Text` — a decode miss is a silent
    /// fallback, never an error.
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        let bracketed = (trimmed.starts_with('{') && trimmed.ends_with('}'))
            || (trimmed.starts_with('[') && trimmed.ends_with(']'));
        if bracketed {
            if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(trimmed) {
                return Value::Structured(parsed.to_string());
            }
        }
        Value::Text(cell.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cell())
    }
}

/// One key/value entry parsed out of a resource file.
///
/// `span` is the byte range of the whole entry in the source text, so the
/// merging writer can splice a replacement in place without touching
/// anything around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub key: String,
    pub value: Value,
    pub span: Range<usize>,
}

/// The ordered entries of one language, with a key index on top.
///
/// Duplicate keys keep the position of their first occurrence; the value of
/// the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub language: String,
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl RecordSet {
    pub fn new(language: impl Into<String>) -> Self {
        RecordSet {
            language: language.into(),
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn from_records(language: impl Into<String>, records: Vec<Record>) -> Self {
        let mut set = RecordSet::new(language);
        for record in records {
            set.push(record);
        }
        set
    }

    pub fn push(&mut self, record: Record) {
        match self.index.get(&record.key) {
            Some(&position) => self.records[position].value = record.value,
            None => {
                self.index.insert(record.key.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&position| &self.records[position].value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in entry order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.key.as_str())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
