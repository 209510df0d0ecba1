//! The seam between the merge engine and each concrete resource syntax.

use crate::{
    error::Error,
    types::{Record, Value},
};

/// One resource-file syntax: its entry grammar and rendering rules.
///
/// The merge engine in [`crate::merge`] is generic over this trait. A
/// syntax only has to describe where entries live (`parse_records`), what a
/// single entry looks like (`render_entry`), and how to grow a file
/// (`skeleton`, `append_block`). Everything outside entry spans is carried
/// through untouched by the engine itself.
pub trait Syntax {
    /// Parses the flat entry table out of `content`, with byte spans.
    fn parse_records(content: &str) -> Result<Vec<Record>, Error>;

    /// Renders one entry without surrounding indentation or separators.
    fn render_entry(key: &str, value: &Value) -> String;

    /// The minimal empty container used when no file exists yet.
    fn skeleton() -> &'static str;

    /// Where and what to insert to append `rendered` entries to `content`.
    ///
    /// `records` are the existing entries of `content`, in document order.
    /// Returns the byte offset to insert at and the text to insert there,
    /// including indentation and separators.
    fn append_block(content: &str, records: &[Record], rendered: &[String]) -> (usize, String);

    /// Format-specific housekeeping on the fully merged content.
    fn finalize(content: String) -> String {
        content
    }
}
