//! All error types for the stringsheet crate.

use thiserror::Error;

/// Errors raised while converting between resource files and spreadsheets.
///
/// Configuration problems (`MissingSource`, `MissingView`, `UnknownFormat`,
/// `UnsupportedFormat`, `InvalidGrid`) abort a run before any file is
/// mutated. Per-language parse and write problems are collected into the
/// run's report by [`crate::codec::Codec`] instead of aborting the batch.
#[derive(Error, Debug)]
pub enum Error {
    /// A format name that is not recognized at all.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// A file extension or format that is recognized but not handled here.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The resource directory or spreadsheet to read from does not exist.
    #[error("Missing source: {0}")]
    MissingSource(String),

    /// A partial import was requested but the untranslated view is absent.
    #[error("Missing untranslated view: {0}")]
    MissingView(String),

    /// The spreadsheet does not have the expected header shape.
    #[error("Invalid spreadsheet: {0}")]
    InvalidGrid(String),

    /// A resource file violates the flat key/value entry grammar.
    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("XML parsing error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("CSV parsing error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
