//! The tabular-grid backend: CSV and TSV cell grids on disk.
//!
//! Deliberately dumb storage. All meaning (key column, language columns,
//! empty cells) lives in [`crate::table`]; this module only moves rows of
//! cells in and out of files and knows about the optional advisory banner
//! row translators see above the header.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use crate::{error::Error, table::KEY_COLUMN};

/// The concrete grid sub-format, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridFormat {
    Csv,
    Tsv,
}

impl GridFormat {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(GridFormat::Csv),
            Some("tsv") => Ok(GridFormat::Tsv),
            Some(other) => Err(Error::UnsupportedFormat(format!(
                "unsupported spreadsheet extension '{other}' (expected csv or tsv)"
            ))),
            None => Err(Error::UnsupportedFormat(format!(
                "cannot tell the spreadsheet format of {}",
                path.display()
            ))),
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            GridFormat::Csv => b',',
            GridFormat::Tsv => b'\t',
        }
    }
}

/// A raw cell grid: optional banner, header row, data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridDocument {
    pub banner: Option<String>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Sibling path carrying the untranslated view of `path`, e.g.
/// `translations.csv` -> `translations.untranslated.csv`.
pub fn untranslated_view_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("translations");
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("csv");
    path.with_file_name(format!("{stem}.untranslated.{extension}"))
}

/// Reads a grid, skipping exactly one banner row when the first row does
/// not start with the `key` header cell.
pub fn read_grid(path: &Path, format: GridFormat) -> Result<GridDocument, Error> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(format.delimiter())
        .from_reader(BufReader::new(file));
    let mut records = reader.records();

    let Some(first) = records.next() else {
        return Err(Error::InvalidGrid("empty spreadsheet".to_string()));
    };
    let first = first?;
    let mut banner = None;
    let header: Vec<String> = if first.get(0) == Some(KEY_COLUMN) {
        first.iter().map(str::to_string).collect()
    } else {
        banner = first.get(0).map(str::to_string);
        let Some(second) = records.next() else {
            return Err(Error::InvalidGrid("missing header row".to_string()));
        };
        let second = second?;
        if second.get(0) != Some(KEY_COLUMN) {
            return Err(Error::InvalidGrid(format!(
                "first header column must be '{KEY_COLUMN}'"
            )));
        }
        second.iter().map(str::to_string).collect()
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(header.len(), String::new());
        rows.push(row);
    }
    Ok(GridDocument { banner, header, rows })
}

pub fn write_grid(path: &Path, format: GridFormat, document: &GridDocument) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .delimiter(format.delimiter())
        .from_writer(BufWriter::new(file));
    if let Some(banner) = &document.banner {
        writer.write_record([banner.as_str()])?;
    }
    writer.write_record(&document.header)?;
    for row in &document.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
