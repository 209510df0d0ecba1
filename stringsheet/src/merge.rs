//! Merge-preserving writer.
//!
//! Applies a batch of key/value updates to an existing resource file by
//! splicing replacement entries into their original byte spans, so every
//! byte outside the touched entries (comments, plural blocks, whitespace,
//! unknown elements) survives verbatim. New keys are appended after the
//! last existing entry in update order. When no file content exists, the
//! syntax's skeleton is grown instead.

use std::collections::HashMap;

use crate::{
    error::Error,
    traits::Syntax,
    types::{Record, Value},
};

/// Merges `updates` into `existing` content, returning the new content.
///
/// Entries whose current value already matches the update are left alone,
/// which is what makes an unmodified export re-import byte-identical.
/// When `updates` mentions a key more than once, the last value wins, the
/// same convention duplicate spreadsheet rows follow.
pub fn merge_content<S: Syntax>(
    existing: Option<&str>,
    updates: &[(String, Value)],
) -> Result<String, Error> {
    let base = match existing {
        Some(text) => text.to_string(),
        None => S::skeleton().to_string(),
    };
    let records = S::parse_records(&base)?;
    let index: HashMap<&str, &Record> = records
        .iter()
        .map(|record| (record.key.as_str(), record))
        .collect();

    let updates = dedup_updates(updates);

    let mut replacements: Vec<(&Record, String)> = Vec::new();
    let mut appended: Vec<String> = Vec::new();
    for (key, value) in updates {
        match index.get(key.as_str()) {
            Some(&record) => {
                if record.value.as_cell() != value.as_cell() {
                    replacements.push((record, S::render_entry(key, value)));
                }
            }
            None => appended.push(S::render_entry(key, value)),
        }
    }
    replacements.sort_by_key(|(record, _)| record.span.start);

    let (insert_at, block) = if appended.is_empty() {
        (base.len(), String::new())
    } else {
        S::append_block(&base, &records, &appended)
    };

    let mut merged = String::with_capacity(base.len() + block.len());
    let mut cursor = 0usize;
    for (record, rendered) in &replacements {
        merged.push_str(&base[cursor..record.span.start]);
        merged.push_str(rendered);
        cursor = record.span.end;
    }
    // The append point is the end of the last entry or the container close,
    // both of which sit at or after the last replaced span.
    debug_assert!(insert_at >= cursor);
    merged.push_str(&base[cursor..insert_at]);
    merged.push_str(&block);
    merged.push_str(&base[insert_at..]);

    Ok(S::finalize(merged))
}

/// Collapses repeated keys: first position kept, last value wins.
fn dedup_updates(updates: &[(String, Value)]) -> Vec<(&String, &Value)> {
    let mut order: Vec<(&String, &Value)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for (key, value) in updates {
        match positions.get(key.as_str()) {
            Some(&at) => order[at].1 = value,
            None => {
                positions.insert(key.as_str(), order.len());
                order.push((key, value));
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A toy line-based syntax: `key=value`, one entry per line.
    struct Lines;

    impl Syntax for Lines {
        fn parse_records(content: &str) -> Result<Vec<Record>, Error> {
            let mut records = Vec::new();
            let mut offset = 0;
            for line in content.lines() {
                if let Some((key, value)) = line.split_once('=') {
                    records.push(Record {
                        key: key.to_string(),
                        value: Value::text(value),
                        span: offset..offset + line.len(),
                    });
                }
                offset += line.len() + 1;
            }
            Ok(records)
        }

        fn render_entry(key: &str, value: &Value) -> String {
            format!("{}={}", key, value.as_cell())
        }

        fn skeleton() -> &'static str {
            ""
        }

        fn append_block(content: &str, records: &[Record], rendered: &[String]) -> (usize, String) {
            match records.last() {
                Some(last) => (
                    last.span.end,
                    rendered.iter().map(|r| format!("\n{r}")).collect(),
                ),
                None => (content.len(), rendered.join("\n")),
            }
        }
    }

    fn updates(pairs: &[(&str, &str)]) -> Vec<(String, Value)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::text(*v)))
            .collect()
    }

    #[test]
    fn test_replace_in_place() {
        let merged =
            merge_content::<Lines>(Some("a=1\n# note\nb=2\n"), &updates(&[("b", "9")])).unwrap();
        assert_eq!(merged, "a=1\n# note\nb=9\n");
    }

    #[test]
    fn test_unchanged_value_preserves_bytes() {
        let original = "a=1\n# note\nb=2\n";
        let merged =
            merge_content::<Lines>(Some(original), &updates(&[("a", "1"), ("b", "2")])).unwrap();
        assert_eq!(merged, original);
    }

    #[test]
    fn test_append_new_keys_in_update_order() {
        let merged =
            merge_content::<Lines>(Some("a=1\n"), &updates(&[("c", "3"), ("b", "2")])).unwrap();
        assert_eq!(merged, "a=1\nc=3\nb=2\n");
    }

    #[test]
    fn test_skeleton_when_absent() {
        let merged = merge_content::<Lines>(None, &updates(&[("a", "1")])).unwrap();
        assert_eq!(merged, "a=1");
    }

    #[test]
    fn test_replace_and_append_together() {
        let merged = merge_content::<Lines>(
            Some("a=1\nb=2\n"),
            &updates(&[("a", "x"), ("c", "3")]),
        )
        .unwrap();
        assert_eq!(merged, "a=x\nb=2\nc=3\n");
    }

    #[test]
    fn test_duplicate_update_key_last_value_wins() {
        let merged = merge_content::<Lines>(
            Some("a=1\nb=2\n"),
            &updates(&[("a", "x"), ("a", "y")]),
        )
        .unwrap();
        assert_eq!(merged, "a=y\nb=2\n");
    }

    #[test]
    fn test_duplicate_new_key_appends_once() {
        let merged = merge_content::<Lines>(
            Some("a=1\n"),
            &updates(&[("c", "first"), ("c", "last")]),
        )
        .unwrap();
        assert_eq!(merged, "a=1\nc=last\n");
    }

    #[test]
    fn test_empty_updates_is_identity() {
        let original = "a=1\njunk line\nb=2";
        let merged = merge_content::<Lines>(Some(original), &[]).unwrap();
        assert_eq!(merged, original);
    }
}
