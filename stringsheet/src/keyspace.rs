//! Master key ordering and language layout for one conversion run.

use serde::Serialize;

use crate::types::RecordSet;

/// The key/language frame of a conversion run.
///
/// The template language contributes the master key order verbatim and
/// always occupies the first language slot; the remaining languages follow
/// in discovery order. Keys that exist only in non-template languages are
/// not part of the key space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeySpace {
    pub template_language: String,
    pub languages: Vec<String>,
    pub master_keys: Vec<String>,
    /// Set when the configured template was absent and another language
    /// had to stand in for it.
    pub fallback_note: Option<String>,
}

/// Builds the key space for `record_sets` around `template_language`.
///
/// If the configured template is not among the record sets, the first one
/// stands in and a warning note is carried in the result; an empty input
/// yields an empty key space.
pub fn build_key_space(template_language: &str, record_sets: &[RecordSet]) -> KeySpace {
    let mut fallback_note = None;
    let template = match record_sets
        .iter()
        .find(|set| set.language == template_language)
    {
        Some(set) => set,
        None => match record_sets.first() {
            Some(first) => {
                fallback_note = Some(format!(
                    "template language '{}' not found, using '{}' instead",
                    template_language, first.language
                ));
                first
            }
            None => {
                return KeySpace {
                    template_language: template_language.to_string(),
                    languages: Vec::new(),
                    master_keys: Vec::new(),
                    fallback_note: None,
                };
            }
        },
    };

    let mut languages = vec![template.language.clone()];
    languages.extend(
        record_sets
            .iter()
            .filter(|set| set.language != template.language)
            .map(|set| set.language.clone()),
    );

    KeySpace {
        template_language: template.language.clone(),
        languages,
        master_keys: template.keys().map(str::to_string).collect(),
        fallback_note,
    }
}
