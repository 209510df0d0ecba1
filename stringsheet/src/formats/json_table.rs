//! Flat JSON translation tables (`.json` and Flutter `.arb`).
//!
//! The grammar is deliberately narrow: one top-level object whose entries
//! are string keys mapped to JSON values. String values decode to flat
//! text; object and array values travel as opaque compact JSON; other
//! scalars keep their raw token text. ARB metadata entries (`@@locale`,
//! `@key`) are ordinary keys under this grammar.
//!
//! A hand-rolled scanner tracks the byte span of every entry, which
//! `serde_json` alone cannot do; the key and value tokens themselves are
//! still decoded with `serde_json`.

use crate::{
    error::Error,
    traits::Syntax,
    types::{Record, Value},
};

#[derive(Debug, Clone, Copy)]
pub struct Format;

impl Syntax for Format {
    fn parse_records(content: &str) -> Result<Vec<Record>, Error> {
        Scanner::new(content).run()
    }

    fn render_entry(key: &str, value: &Value) -> String {
        let rendered = match value {
            Value::Text(s) => serde_json::Value::String(s.clone()).to_string(),
            Value::Structured(s) => s.clone(),
        };
        format!(
            "{}: {}",
            serde_json::Value::String(key.to_string()),
            rendered
        )
    }

    fn skeleton() -> &'static str {
        "{}\n"
    }

    fn append_block(content: &str, records: &[Record], rendered: &[String]) -> (usize, String) {
        match records.last() {
            Some(last) => (
                last.span.end,
                rendered.iter().map(|r| format!(",\n  {r}")).collect(),
            ),
            None => match content.find('{') {
                Some(open) => {
                    let body: Vec<String> = rendered.iter().map(|r| format!("  {r}")).collect();
                    (open + 1, format!("\n{}\n", body.join(",\n")))
                }
                None => (content.len(), rendered.join(",\n")),
            },
        }
    }
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Scanner { src, pos: 0 }
    }

    fn run(mut self) -> Result<Vec<Record>, Error> {
        self.skip_whitespace();
        if !self.eat(b'{') {
            return Err(Error::InvalidResource(
                "expected a top-level object".to_string(),
            ));
        }
        let mut records = Vec::new();
        loop {
            self.skip_whitespace();
            if self.eat(b'}') {
                break;
            }
            if !records.is_empty() {
                if !self.eat(b',') {
                    return Err(Error::InvalidResource(
                        "expected ',' or '}' between entries".to_string(),
                    ));
                }
                self.skip_whitespace();
            }
            let entry_start = self.pos;
            let key_raw = self.scan_string()?;
            let key: String = serde_json::from_str(key_raw)?;
            self.skip_whitespace();
            if !self.eat(b':') {
                return Err(Error::InvalidResource(format!(
                    "expected ':' after key {key:?}"
                )));
            }
            self.skip_whitespace();
            let value_raw = self.scan_value()?;
            records.push(Record {
                key,
                value: decode_value(value_raw)?,
                span: entry_start..self.pos,
            });
        }
        self.skip_whitespace();
        if self.pos != self.src.len() {
            return Err(Error::InvalidResource(
                "trailing content after top-level object".to_string(),
            ));
        }
        Ok(records)
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.src.as_bytes().get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Scans a JSON string token and returns its raw slice, quotes included.
    fn scan_string(&mut self) -> Result<&'a str, Error> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        if bytes.get(self.pos) != Some(&b'"') {
            return Err(Error::InvalidResource("expected a string".to_string()));
        }
        self.pos += 1;
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\\' => self.pos += 2,
                b'"' => {
                    self.pos += 1;
                    return Ok(&self.src[start..self.pos]);
                }
                _ => self.pos += 1,
            }
        }
        Err(Error::InvalidResource("unterminated string".to_string()))
    }

    /// Scans any JSON value token and returns its raw slice.
    fn scan_value(&mut self) -> Result<&'a str, Error> {
        let bytes = self.src.as_bytes();
        match bytes.get(self.pos) {
            Some(&b'"') => self.scan_string(),
            Some(&b'{') | Some(&b'[') => self.scan_balanced(),
            Some(_) => {
                let start = self.pos;
                while self.pos < bytes.len()
                    && !matches!(bytes[self.pos], b',' | b'}' | b']')
                    && !bytes[self.pos].is_ascii_whitespace()
                {
                    self.pos += 1;
                }
                if self.pos == start {
                    return Err(Error::InvalidResource("expected a value".to_string()));
                }
                Ok(&self.src[start..self.pos])
            }
            None => Err(Error::InvalidResource("expected a value".to_string())),
        }
    }

    /// Scans a nested object or array without interpreting it.
    fn scan_balanced(&mut self) -> Result<&'a str, Error> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        let mut depth = 0usize;
        let mut in_string = false;
        while self.pos < bytes.len() {
            let byte = bytes[self.pos];
            if in_string {
                match byte {
                    b'\\' => self.pos += 1,
                    b'"' => in_string = false,
                    _ => {}
                }
            } else {
                match byte {
                    b'"' => in_string = true,
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => {
                        depth -= 1;
                        if depth == 0 {
                            self.pos += 1;
                            return Ok(&self.src[start..self.pos]);
                        }
                    }
                    _ => {}
                }
            }
            self.pos += 1;
        }
        Err(Error::InvalidResource(
            "unterminated object or array".to_string(),
        ))
    }
}

fn decode_value(raw: &str) -> Result<Value, Error> {
    match raw.as_bytes().first() {
        Some(&b'"') => Ok(Value::Text(serde_json::from_str::<String>(raw)?)),
        Some(&b'{') | Some(&b'[') => {
            let parsed: serde_json::Value = serde_json::from_str(raw)?;
            Ok(Value::Structured(parsed.to_string()))
        }
        // Numbers, booleans and null keep their raw token text.
        _ => Ok(Value::Text(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge_content;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {r#"
        {
          "@@locale": "en",
          "greeting": "Hello",
          "@greeting": {
            "description": "Shown on launch",
            "placeholders": {}
          },
          "count": "You have {count} items",
          "retries": 3
        }
    "#};

    #[test]
    fn test_parse_keys_in_document_order() {
        let records = Format::parse_records(SAMPLE).unwrap();
        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["@@locale", "greeting", "@greeting", "count", "retries"]
        );
    }

    #[test]
    fn test_string_values_are_decoded() {
        let records = Format::parse_records(SAMPLE).unwrap();
        assert_eq!(records[1].value, Value::text("Hello"));
        assert_eq!(records[3].value, Value::text("You have {count} items"));
    }

    #[test]
    fn test_object_value_is_structured() {
        let records = Format::parse_records(SAMPLE).unwrap();
        let Value::Structured(json) = &records[2].value else {
            panic!("metadata entry should be structured");
        };
        let parsed: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(parsed["description"], "Shown on launch");
    }

    #[test]
    fn test_scalar_value_keeps_raw_token() {
        let records = Format::parse_records(SAMPLE).unwrap();
        assert_eq!(records[4].value, Value::text("3"));
    }

    #[test]
    fn test_escaped_quotes_in_values() {
        let records =
            Format::parse_records(r#"{"quote": "She said \"hi\""}"#).unwrap();
        assert_eq!(records[0].value, Value::text(r#"She said "hi""#));
    }

    #[test]
    fn test_spans_cover_key_and_value() {
        let records = Format::parse_records(SAMPLE).unwrap();
        let slice = &SAMPLE[records[1].span.clone()];
        assert_eq!(slice, r#""greeting": "Hello""#);
    }

    #[test]
    fn test_empty_object() {
        assert!(Format::parse_records("{}").unwrap().is_empty());
        assert!(Format::parse_records("{}\n").unwrap().is_empty());
    }

    #[test]
    fn test_not_an_object_is_an_error() {
        assert!(matches!(
            Format::parse_records("[1, 2]"),
            Err(Error::InvalidResource(_))
        ));
    }

    #[test]
    fn test_unterminated_string_is_an_error() {
        assert!(Format::parse_records(r#"{"a": "oops"#).is_err());
    }

    #[test]
    fn test_missing_comma_is_an_error() {
        assert!(Format::parse_records(r#"{"a": "1" "b": "2"}"#).is_err());
    }

    #[test]
    fn test_merge_replaces_only_touched_entries() {
        let merged = merge_content::<Format>(
            Some(SAMPLE),
            &[("greeting".to_string(), Value::text("Hi"))],
        )
        .unwrap();
        assert!(merged.contains(r#""greeting": "Hi""#));
        assert!(merged.contains(r#""description": "Shown on launch""#));
        assert!(merged.contains(r#""retries": 3"#));
        let records = Format::parse_records(&merged).unwrap();
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_merge_appends_with_comma() {
        let merged = merge_content::<Format>(
            Some("{\n  \"a\": \"1\"\n}\n"),
            &[("b".to_string(), Value::text("2"))],
        )
        .unwrap();
        assert_eq!(merged, "{\n  \"a\": \"1\",\n  \"b\": \"2\"\n}\n");
    }

    #[test]
    fn test_merge_into_skeleton() {
        let merged = merge_content::<Format>(
            None,
            &[("a".to_string(), Value::text("1"))],
        )
        .unwrap();
        assert_eq!(merged, "{\n  \"a\": \"1\"\n}\n");
    }

    #[test]
    fn test_merge_escapes_replacement_text() {
        let merged = merge_content::<Format>(
            Some("{\n  \"a\": \"1\"\n}\n"),
            &[("a".to_string(), Value::text("line\nbreak \"quoted\""))],
        )
        .unwrap();
        assert!(merged.contains(r#""a": "line\nbreak \"quoted\"""#));
        let records = Format::parse_records(&merged).unwrap();
        assert_eq!(records[0].value, Value::text("line\nbreak \"quoted\""));
    }
}
