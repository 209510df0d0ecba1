//! Android `strings.xml` entry grammar.
//!
//! Only `<string name="...">` elements are managed here. Comments,
//! `<plurals>`, `<string-array>` and anything else in the file live outside
//! entry spans and are preserved by the merge path untouched. Entry content
//! is captured verbatim from the source slice, so embedded markup, CDATA
//! sections and entity references round-trip without re-escaping.

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    error::Error,
    traits::Syntax,
    types::{Record, Value},
};

const STRING_TAG: &[u8] = b"string";
const XLIFF_NAMESPACE: &str = r#" xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2""#;

#[derive(Debug, Clone, Copy)]
pub struct Format;

impl Syntax for Format {
    fn parse_records(content: &str) -> Result<Vec<Record>, Error> {
        let mut reader = Reader::from_str(content);
        let mut records = Vec::new();
        loop {
            let start = reader.buffer_position() as usize;
            match reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == STRING_TAG => {
                    let key = string_name(&e)?;
                    let inner = reader.read_to_end(e.name())?;
                    let end = reader.buffer_position() as usize;
                    let raw = content[inner.start as usize..inner.end as usize].trim();
                    records.push(Record {
                        key,
                        value: Value::text(raw),
                        span: start..end,
                    });
                }
                Event::Empty(e) if e.name().as_ref() == STRING_TAG => {
                    let key = string_name(&e)?;
                    let end = reader.buffer_position() as usize;
                    records.push(Record {
                        key,
                        value: Value::text(""),
                        span: start..end,
                    });
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(records)
    }

    /// The cell text is trusted verbatim: values round-trip as raw XML
    /// fragments, so already-escaped entities and markup survive, and a
    /// cell wanting a literal `&` or `<` must carry it pre-escaped.
    fn render_entry(key: &str, value: &Value) -> String {
        format!("<string name=\"{}\">{}</string>", key, value.as_cell())
    }

    fn skeleton() -> &'static str {
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n</resources>\n"
    }

    fn append_block(content: &str, records: &[Record], rendered: &[String]) -> (usize, String) {
        match records.last() {
            Some(last) => (
                last.span.end,
                rendered.iter().map(|r| format!("\n    {r}")).collect(),
            ),
            None => {
                let at = content.rfind("</resources>").unwrap_or(content.len());
                (at, rendered.iter().map(|r| format!("    {r}\n")).collect())
            }
        }
    }

    /// Injects the xliff namespace declaration into the `<resources>`
    /// opening tag when some entry uses an `xliff:` element and the
    /// declaration is not there yet.
    fn finalize(content: String) -> String {
        if content.contains("xmlns:xliff") || !content.contains("xliff:") {
            return content;
        }
        let Some(open) = content.find("<resources") else {
            return content;
        };
        let Some(close) = content[open..].find('>') else {
            return content;
        };
        let mut patched = content;
        patched.insert_str(open + close, XLIFF_NAMESPACE);
        patched
    }
}

fn string_name(e: &BytesStart<'_>) -> Result<String, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|err| Error::InvalidResource(err.to_string()))?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::InvalidResource(
        "<string> element without a name attribute".to_string(),
    ))
}
