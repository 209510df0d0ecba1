//! High-level export/import orchestration over a resource directory.
//!
//! Export: discover language files, parse them, build the key space and
//! matrix, write the grid plus the untranslated sibling view. Import: read
//! the grid (or its untranslated view), split it into language columns and
//! merge each column into its resource file.
//!
//! Everything runs synchronously in one batch. There is no locking; it is
//! up to callers not to run two conversions against the same target
//! directory at once. Per-language failures are collected into the run's
//! report instead of aborting the batch; configuration problems abort
//! before anything is written.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::Error,
    formats::FormatType,
    keyspace::build_key_space,
    placeholder,
    table::{self, TranslationMatrix},
    tabular::{self, GridDocument, GridFormat},
    types::{RecordSet, Value},
};

/// Template language used when none is configured.
pub const DEFAULT_TEMPLATE_LANGUAGE: &str = "en";

/// What an empty spreadsheet cell means on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyCellPolicy {
    /// An empty cell is an explicit empty value and is written through.
    /// Untouched entries are still preserved, because merge skips entries
    /// whose value already matches.
    #[default]
    WriteBlank,
    /// An empty cell requests no update for that key.
    Skip,
}

/// Which view of the spreadsheet an import reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// The full matrix file itself.
    #[default]
    Full,
    /// The sibling untranslated view next to it.
    Partial,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub template_language: String,
    /// Optional advisory row written above the header of the full view.
    pub banner: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            template_language: DEFAULT_TEMPLATE_LANGUAGE.to_string(),
            banner: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub mode: ImportMode,
    pub empty_cells: EmptyCellPolicy,
}

/// One language that could not be fully processed.
#[derive(Debug)]
pub struct LanguageFailure {
    pub language: String,
    pub path: PathBuf,
    pub error: Error,
}

#[derive(Debug)]
pub struct ExportReport {
    pub output: PathBuf,
    /// Written only when some key had an empty non-template cell.
    pub untranslated_output: Option<PathBuf>,
    pub languages: Vec<String>,
    pub key_count: usize,
    pub fallback_note: Option<String>,
    pub failures: Vec<LanguageFailure>,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<LanguageFailure>,
    pub placeholder_warnings: Vec<PlaceholderWarning>,
}

/// A translated cell whose placeholders disagree with the template's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderWarning {
    pub language: String,
    pub key: String,
}

/// Converter between one resource format and the tabular grid shape.
#[derive(Debug, Clone, Copy)]
pub struct Codec {
    format: FormatType,
}

impl Codec {
    pub fn new(format: FormatType) -> Self {
        Codec { format }
    }

    pub fn format(&self) -> FormatType {
        self.format
    }

    /// Exports the resource files under `source_dir` to a grid at `output`.
    ///
    /// A parse failure in the template language is fatal (it defines the
    /// master key order); any other language's failure degrades that
    /// language to an empty column and is reported.
    pub fn export(
        &self,
        source_dir: &Path,
        output: &Path,
        options: &ExportOptions,
    ) -> Result<ExportReport, Error> {
        if !source_dir.is_dir() {
            return Err(Error::MissingSource(format!(
                "{} is not a directory",
                source_dir.display()
            )));
        }
        let grid_format = GridFormat::from_path(output)?;
        let discovered = self.discover(source_dir, &options.template_language)?;
        if discovered.is_empty() {
            return Err(Error::MissingSource(format!(
                "no {} language files found in {}",
                self.format,
                source_dir.display()
            )));
        }

        let template_language = discovered
            .iter()
            .find(|(language, _)| *language == options.template_language)
            .map_or_else(|| discovered[0].0.clone(), |(language, _)| language.clone());

        let mut failures = Vec::new();
        let mut record_sets = Vec::new();
        for (language, path) in &discovered {
            match self.read_record_set(language, path) {
                Ok(set) => record_sets.push(set),
                Err(error) if *language == template_language => return Err(error),
                Err(error) => {
                    failures.push(LanguageFailure {
                        language: language.clone(),
                        path: path.clone(),
                        error,
                    });
                    record_sets.push(RecordSet::new(language.clone()));
                }
            }
        }

        let key_space = build_key_space(&options.template_language, &record_sets);
        let matrix = table::assemble(&key_space, &record_sets);
        tabular::write_grid(
            output,
            grid_format,
            &GridDocument {
                banner: options.banner.clone(),
                header: matrix.header(),
                rows: grid_rows(&matrix),
            },
        )?;

        let untranslated = matrix.untranslated_subset();
        let untranslated_output = if untranslated.is_empty() {
            // A view left over from an earlier export would feed a later
            // partial import stale rows; without it that import becomes a
            // missing-view fault instead.
            match fs::remove_file(tabular::untranslated_view_path(output)) {
                Ok(()) => {}
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
                Err(error) => return Err(error.into()),
            }
            None
        } else {
            let view_path = tabular::untranslated_view_path(output);
            tabular::write_grid(
                &view_path,
                grid_format,
                &GridDocument {
                    banner: None,
                    header: untranslated.header(),
                    rows: grid_rows(&untranslated),
                },
            )?;
            Some(view_path)
        };

        Ok(ExportReport {
            output: output.to_path_buf(),
            untranslated_output,
            languages: key_space.languages,
            key_count: key_space.master_keys.len(),
            fallback_note: key_space.fallback_note,
            failures,
        })
    }

    /// Imports a translated grid at `input`, merging each language column
    /// into its resource file under `target_dir`.
    ///
    /// The first language column is the template and maps to the
    /// base-named location; other columns map to suffixed locations. A
    /// partial import reads the untranslated sibling view instead.
    pub fn import(
        &self,
        input: &Path,
        target_dir: &Path,
        options: &ImportOptions,
    ) -> Result<ImportReport, Error> {
        let grid_format = GridFormat::from_path(input)?;
        if !input.is_file() {
            return Err(Error::MissingSource(format!(
                "{} does not exist",
                input.display()
            )));
        }
        let source = match options.mode {
            ImportMode::Full => input.to_path_buf(),
            ImportMode::Partial => {
                let view = tabular::untranslated_view_path(input);
                if !view.is_file() {
                    return Err(Error::MissingView(format!(
                        "{} (nothing was untranslated, or the export is stale)",
                        view.display()
                    )));
                }
                view
            }
        };

        let document = tabular::read_grid(&source, grid_format)?;
        let columns = table::split(&document.header, &document.rows)?;
        fs::create_dir_all(target_dir)?;

        let template_cells: HashMap<&str, &str> = columns[0]
            .1
            .iter()
            .map(|(key, cell)| (key.as_str(), cell.as_str()))
            .collect();

        let mut report = ImportReport::default();
        for (position, (language, cells)) in columns.iter().enumerate() {
            let is_template = position == 0;
            let path = self.file_path(target_dir, language, is_template);

            if !is_template {
                for (key, cell) in cells {
                    if let Some(reference) = template_cells.get(key.as_str()) {
                        if placeholder::mismatch(reference, cell) {
                            report.placeholder_warnings.push(PlaceholderWarning {
                                language: language.clone(),
                                key: key.clone(),
                            });
                        }
                    }
                }
            }

            let updates = build_updates(cells, options.empty_cells);
            match self.merge_into_file(&path, &updates) {
                Ok(()) => report.written.push(path),
                Err(error) => report.failures.push(LanguageFailure {
                    language: language.clone(),
                    path,
                    error,
                }),
            }
        }
        Ok(report)
    }

    /// Deterministic language discovery, sorted by file path.
    fn discover(
        &self,
        dir: &Path,
        template_language: &str,
    ) -> Result<Vec<(String, PathBuf)>, Error> {
        let mut found = Vec::new();
        match self.format {
            FormatType::AndroidStrings => {
                for entry in fs::read_dir(dir)? {
                    let entry = entry?;
                    if !entry.file_type()?.is_dir() {
                        continue;
                    }
                    let name = entry.file_name().to_string_lossy().into_owned();
                    let language = if name == "values" {
                        template_language.to_string()
                    } else if let Some(suffix) = name.strip_prefix("values-") {
                        suffix.to_string()
                    } else {
                        continue;
                    };
                    let path = entry.path().join("strings.xml");
                    if path.is_file() {
                        found.push((language, path));
                    }
                }
            }
            FormatType::Arb | FormatType::Json => {
                let extension = self.format.extension();
                for entry in fs::read_dir(dir)? {
                    let entry = entry?;
                    let path = entry.path();
                    if !entry.file_type()?.is_file()
                        || path.extension().and_then(|ext| ext.to_str()) != Some(extension)
                    {
                        continue;
                    }
                    let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                        continue;
                    };
                    let language = match self.format {
                        FormatType::Arb => match stem.strip_prefix("app_") {
                            Some(language) => language.to_string(),
                            None => continue,
                        },
                        _ => stem.to_string(),
                    };
                    found.push((language, path));
                }
            }
        }
        found.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(found)
    }

    /// Where a language's resource file lives under `dir`.
    fn file_path(&self, dir: &Path, language: &str, is_template: bool) -> PathBuf {
        match self.format {
            FormatType::AndroidStrings => {
                let values = if is_template {
                    "values".to_string()
                } else {
                    format!("values-{language}")
                };
                dir.join(values).join("strings.xml")
            }
            FormatType::Arb => dir.join(format!("app_{language}.arb")),
            FormatType::Json => dir.join(format!("{language}.json")),
        }
    }

    fn read_record_set(&self, language: &str, path: &Path) -> Result<RecordSet, Error> {
        let content = fs::read_to_string(path)?;
        let records = self.format.parse_records(&content)?;
        Ok(RecordSet::from_records(language, records))
    }

    /// Builds the merged content in memory, then replaces the file.
    fn merge_into_file(&self, path: &Path, updates: &[(String, Value)]) -> Result<(), Error> {
        let existing = match fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => None,
            Err(error) => return Err(error.into()),
        };
        let merged = self.format.merge(existing.as_deref(), updates)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, merged)?;
        Ok(())
    }
}

/// Guesses the resource format from the contents of a directory.
pub fn infer_format_from_dir(dir: &Path) -> Option<FormatType> {
    let entries = fs::read_dir(dir).ok()?;
    let mut saw_json = false;
    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if path.is_dir() && (name == "values" || name.starts_with("values-")) {
            return Some(FormatType::AndroidStrings);
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("arb") => return Some(FormatType::Arb),
            Some("json") => saw_json = true,
            _ => {}
        }
    }
    saw_json.then_some(FormatType::Json)
}

fn grid_rows(matrix: &TranslationMatrix) -> Vec<Vec<String>> {
    matrix
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.key.clone()];
            cells.extend(row.cells.iter().cloned());
            cells
        })
        .collect()
}

fn build_updates(cells: &[(String, String)], policy: EmptyCellPolicy) -> Vec<(String, Value)> {
    cells
        .iter()
        .filter_map(|(key, cell)| {
            if cell.is_empty() {
                match policy {
                    EmptyCellPolicy::WriteBlank => Some((key.clone(), Value::text(""))),
                    EmptyCellPolicy::Skip => None,
                }
            } else {
                Some((key.clone(), Value::from_cell(cell)))
            }
        })
        .collect()
}
