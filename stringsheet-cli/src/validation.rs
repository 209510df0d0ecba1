//! Input validation helpers shared by the CLI commands.

use std::path::Path;

use unic_langid::LanguageIdentifier;

/// Validates that an input file exists.
pub fn validate_input_file(path: &str) -> Result<(), String> {
    if !Path::new(path).is_file() {
        return Err(format!("File does not exist: {path}"));
    }
    Ok(())
}

/// Validates that a source directory exists.
pub fn validate_source_dir(path: &str) -> Result<(), String> {
    if !Path::new(path).is_dir() {
        return Err(format!("Directory does not exist: {path}"));
    }
    Ok(())
}

/// Validates that the directory an output file would land in exists.
pub fn validate_output_path(path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(format!(
                "Output directory does not exist: {}",
                parent.display()
            ));
        }
    }
    Ok(())
}

/// Validates a BCP 47 language identifier such as `en` or `zh-Hans`.
pub fn validate_language_code(code: &str) -> Result<(), String> {
    code.parse::<LanguageIdentifier>()
        .map(|_| ())
        .map_err(|_| format!("Invalid language code: {code}"))
}
