//! The `export` subcommand: resource directory -> translator spreadsheet.

use std::path::Path;

use stringsheet::{Codec, ExportOptions as CodecExportOptions, FormatType, infer_format_from_dir};

use crate::validation::{validate_language_code, validate_output_path, validate_source_dir};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub source_dir: String,
    pub output: String,
    pub format: Option<String>,
    pub template_lang: String,
    pub banner: Option<String>,
}

pub fn run_export_command(options: ExportOptions) -> Result<(), String> {
    validate_source_dir(&options.source_dir)?;
    validate_output_path(&options.output)?;
    validate_language_code(&options.template_lang)?;
    let source_dir = Path::new(&options.source_dir);
    let format = resolve_format(options.format.as_deref(), source_dir)?;

    let codec = Codec::new(format);
    let report = codec
        .export(
            source_dir,
            Path::new(&options.output),
            &CodecExportOptions {
                template_language: options.template_lang.clone(),
                banner: options.banner.clone(),
            },
        )
        .map_err(|e| e.to_string())?;

    if let Some(note) = &report.fallback_note {
        eprintln!("Warning: {note}");
    }
    for failure in &report.failures {
        eprintln!(
            "Warning: {} could not be read ({}): {}",
            failure.language,
            failure.path.display(),
            failure.error
        );
    }
    println!("Languages: {}", report.languages.join(", "));
    println!("Keys: {}", report.key_count);
    match &report.untranslated_output {
        Some(view) => println!("Untranslated view: {}", view.display()),
        None => println!("Untranslated view: not needed, everything is translated"),
    }
    println!("✅ Export complete: {}", report.output.display());
    Ok(())
}

/// Uses the explicit format name when given, otherwise looks at what the
/// directory contains.
pub(crate) fn resolve_format(explicit: Option<&str>, dir: &Path) -> Result<FormatType, String> {
    match explicit {
        Some(name) => name.parse::<FormatType>().map_err(|e| e.to_string()),
        None => infer_format_from_dir(dir).ok_or_else(|| {
            format!(
                "Cannot infer the resource format from {} (use --format)",
                dir.display()
            )
        }),
    }
}
