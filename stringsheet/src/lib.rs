#![forbid(unsafe_code)]
//! # stringsheet
//!
//! Merge-preserving converter between per-language localization resources
//! (Android `strings.xml`, Flutter `.arb`, flat `.json` tables) and a
//! tabular spreadsheet shape: one row per key, one column per language.
//!
//! Export turns a resource directory into a CSV/TSV grid for translators,
//! with an `<stem>.untranslated.<ext>` sibling listing only the rows that
//! still have gaps. Import merges a translated grid back: touched entries
//! are replaced in place, new keys are appended, and every byte the
//! translation did not change (comments, plural blocks, formatting)
//! survives verbatim.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use stringsheet::{Codec, ExportOptions, FormatType};
//!
//! let codec = Codec::new(FormatType::AndroidStrings);
//! let report = codec.export(
//!     Path::new("app/src/main/res"),
//!     Path::new("translations.csv"),
//!     &ExportOptions::default(),
//! )?;
//! println!(
//!     "exported {} keys across {} languages",
//!     report.key_count,
//!     report.languages.len()
//! );
//! # Ok::<(), stringsheet::Error>(())
//! ```

pub mod codec;
pub mod error;
pub mod formats;
pub mod keyspace;
pub mod merge;
pub mod placeholder;
pub mod table;
pub mod tabular;
pub mod traits;
pub mod types;

pub use codec::{
    Codec, DEFAULT_TEMPLATE_LANGUAGE, EmptyCellPolicy, ExportOptions, ExportReport, ImportMode,
    ImportOptions, ImportReport, LanguageFailure, PlaceholderWarning, infer_format_from_dir,
};
pub use error::Error;
pub use formats::FormatType;
pub use keyspace::{KeySpace, build_key_space};
pub use merge::merge_content;
pub use table::{MatrixRow, TranslationMatrix};
pub use tabular::{GridDocument, GridFormat};
pub use traits::Syntax;
pub use types::{Record, RecordSet, Value};
