//! Supported resource-file formats and dispatch over them.

pub mod android_strings;
pub mod json_table;

use std::{fmt, str::FromStr};

use crate::{
    error::Error,
    merge::merge_content,
    traits::Syntax,
    types::{Record, Value},
};

/// The resource-file formats the crate can convert.
///
/// `Arb` and `Json` share the flat JSON table grammar; they differ only in
/// file naming conventions (`app_<lang>.arb` vs `<lang>.json`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    AndroidStrings,
    Arb,
    Json,
}

impl FormatType {
    /// The file extension associated with this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::AndroidStrings => "xml",
            FormatType::Arb => "arb",
            FormatType::Json => "json",
        }
    }

    /// Parses the entries of one resource file in this format.
    pub fn parse_records(&self, content: &str) -> Result<Vec<Record>, Error> {
        match self {
            FormatType::AndroidStrings => android_strings::Format::parse_records(content),
            FormatType::Arb | FormatType::Json => json_table::Format::parse_records(content),
        }
    }

    /// Merges updates into existing content of this format.
    pub fn merge(
        &self,
        existing: Option<&str>,
        updates: &[(String, Value)],
    ) -> Result<String, Error> {
        match self {
            FormatType::AndroidStrings => {
                merge_content::<android_strings::Format>(existing, updates)
            }
            FormatType::Arb | FormatType::Json => {
                merge_content::<json_table::Format>(existing, updates)
            }
        }
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatType::AndroidStrings => "android",
            FormatType::Arb => "arb",
            FormatType::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for FormatType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "android" | "android-strings" | "xml" => Ok(FormatType::AndroidStrings),
            "arb" | "flutter" => Ok(FormatType::Arb),
            "json" => Ok(FormatType::Json),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}
