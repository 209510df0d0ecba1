//! The `import` subcommand: translated spreadsheet -> resource files.

use std::{fs, path::Path};

use clap::ValueEnum;
use serde_json::json;
use stringsheet::{
    Codec, EmptyCellPolicy, ImportMode, ImportOptions as CodecImportOptions, ImportReport,
};

use crate::{export::resolve_format, validation::validate_input_file};

/// Which spreadsheet view the import reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SheetMode {
    /// The full translation matrix.
    Full,
    /// The `.untranslated.` sibling view next to it.
    Partial,
}

impl From<SheetMode> for ImportMode {
    fn from(mode: SheetMode) -> Self {
        match mode {
            SheetMode::Full => ImportMode::Full,
            SheetMode::Partial => ImportMode::Partial,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub input: String,
    pub target_dir: String,
    pub format: Option<String>,
    pub mode: SheetMode,
    pub skip_empty_cells: bool,
    pub report_json: Option<String>,
}

pub fn run_import_command(options: ImportOptions) -> Result<(), String> {
    validate_input_file(&options.input)?;
    let target_dir = Path::new(&options.target_dir);
    let format = resolve_format(options.format.as_deref(), target_dir)?;

    let codec = Codec::new(format);
    let report = codec
        .import(
            Path::new(&options.input),
            target_dir,
            &CodecImportOptions {
                mode: options.mode.into(),
                empty_cells: if options.skip_empty_cells {
                    EmptyCellPolicy::Skip
                } else {
                    EmptyCellPolicy::WriteBlank
                },
            },
        )
        .map_err(|e| e.to_string())?;

    for warning in &report.placeholder_warnings {
        eprintln!(
            "Warning: placeholder mismatch in '{}' for key '{}'",
            warning.language, warning.key
        );
    }
    for failure in &report.failures {
        eprintln!(
            "Warning: {} could not be written ({}): {}",
            failure.language,
            failure.path.display(),
            failure.error
        );
    }
    println!("Files written: {}", report.written.len());
    if !report.failures.is_empty() {
        println!("Languages skipped: {}", report.failures.len());
    }

    if let Some(path) = &options.report_json {
        write_report(path, &options, &report)?;
        println!("Report written: {path}");
    }
    println!("✅ Import complete: {}", options.target_dir);
    Ok(())
}

fn write_report(path: &str, options: &ImportOptions, report: &ImportReport) -> Result<(), String> {
    let payload = json!({
        "input": options.input,
        "target_dir": options.target_dir,
        "mode": format!("{:?}", options.mode).to_lowercase(),
        "written": report
            .written
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
        "failures": report
            .failures
            .iter()
            .map(|f| json!({
                "language": f.language,
                "path": f.path.display().to_string(),
                "error": f.error.to_string(),
            }))
            .collect::<Vec<_>>(),
        "placeholder_warnings": report
            .placeholder_warnings
            .iter()
            .map(|w| json!({ "language": w.language, "key": w.key }))
            .collect::<Vec<_>>(),
    });
    let text = serde_json::to_string_pretty(&payload)
        .map_err(|e| format!("Failed to serialize report: {e}"))?;
    fs::write(path, text).map_err(|e| format!("Failed to write report to {path}: {e}"))
}
