//! End-to-end export/import round trips over real files.

use std::fs;

use indoc::indoc;
use stringsheet::{
    Codec, EmptyCellPolicy, ExportOptions, FormatType, ImportMode, ImportOptions,
};
use tempfile::TempDir;

const EN_XML: &str = indoc! {r#"
    <?xml version="1.0" encoding="utf-8"?>
    <resources>
        <!-- app chrome -->
        <string name="greeting">Hello</string>
        <string name="farewell">Goodbye</string>
    </resources>
"#};

const ES_XML: &str = indoc! {r#"
    <?xml version="1.0" encoding="utf-8"?>
    <resources>
        <!-- spanish -->
        <string name="greeting">Hola</string>
    </resources>
"#};

fn android_fixture() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let res = dir.path().join("res");
    fs::create_dir_all(res.join("values")).unwrap();
    fs::create_dir_all(res.join("values-es")).unwrap();
    fs::write(res.join("values/strings.xml"), EN_XML).unwrap();
    fs::write(res.join("values-es/strings.xml"), ES_XML).unwrap();
    (dir, res)
}

#[test]
fn android_export_produces_matrix_and_untranslated_view() {
    let (dir, res) = android_fixture();
    let output = dir.path().join("translations.csv");

    let codec = Codec::new(FormatType::AndroidStrings);
    let report = codec
        .export(&res, &output, &ExportOptions::default())
        .unwrap();

    assert_eq!(report.languages, vec!["en", "es"]);
    assert_eq!(report.key_count, 2);
    assert!(report.failures.is_empty());
    assert!(report.fallback_note.is_none());

    let full = fs::read_to_string(&output).unwrap();
    assert_eq!(full, "key,en,es\ngreeting,Hello,Hola\nfarewell,Goodbye,\n");

    let view = report.untranslated_output.unwrap();
    let untranslated = fs::read_to_string(&view).unwrap();
    assert_eq!(untranslated, "key,en,es\nfarewell,Goodbye,\n");
}

#[test]
fn android_reimport_of_unmodified_export_preserves_bytes_and_appends_gaps() {
    let (dir, res) = android_fixture();
    let output = dir.path().join("translations.csv");

    let codec = Codec::new(FormatType::AndroidStrings);
    codec
        .export(&res, &output, &ExportOptions::default())
        .unwrap();
    let report = codec
        .import(&output, &res, &ImportOptions::default())
        .unwrap();
    assert!(report.failures.is_empty());

    // Every value in the template matched, so the file is byte-identical.
    let en = fs::read_to_string(res.join("values/strings.xml")).unwrap();
    assert_eq!(en, EN_XML);

    // The untranslated key is appended as an explicit empty entry; the
    // comment and the existing entry survive verbatim.
    let es = fs::read_to_string(res.join("values-es/strings.xml")).unwrap();
    assert_eq!(
        es,
        indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
                <!-- spanish -->
                <string name="greeting">Hola</string>
                <string name="farewell"></string>
            </resources>
        "#}
    );
}

#[test]
fn android_translated_cell_replaces_only_its_entry() {
    let (dir, res) = android_fixture();
    let output = dir.path().join("translations.csv");

    let codec = Codec::new(FormatType::AndroidStrings);
    codec
        .export(&res, &output, &ExportOptions::default())
        .unwrap();
    fs::write(&output, "key,en,es\ngreeting,Hello,Hola\nfarewell,Goodbye,Adios\n").unwrap();
    codec
        .import(&output, &res, &ImportOptions::default())
        .unwrap();

    let es = fs::read_to_string(res.join("values-es/strings.xml")).unwrap();
    assert!(es.contains("<!-- spanish -->"));
    assert!(es.contains(r#"<string name="greeting">Hola</string>"#));
    assert!(es.contains(r#"<string name="farewell">Adios</string>"#));
}

#[test]
fn partial_import_reads_the_untranslated_view() {
    let (dir, res) = android_fixture();
    let output = dir.path().join("translations.csv");

    let codec = Codec::new(FormatType::AndroidStrings);
    let report = codec
        .export(&res, &output, &ExportOptions::default())
        .unwrap();
    let view = report.untranslated_output.unwrap();
    fs::write(&view, "key,en,es\nfarewell,Goodbye,Adios\n").unwrap();

    let options = ImportOptions {
        mode: ImportMode::Partial,
        empty_cells: EmptyCellPolicy::WriteBlank,
    };
    codec.import(&output, &res, &options).unwrap();

    let es = fs::read_to_string(res.join("values-es/strings.xml")).unwrap();
    assert!(es.contains(r#"<string name="greeting">Hola</string>"#));
    assert!(es.contains(r#"<string name="farewell">Adios</string>"#));
}

#[test]
fn import_creates_files_for_brand_new_languages() {
    let (dir, res) = android_fixture();
    let output = dir.path().join("translations.csv");
    fs::write(&output, "key,en,fr\ngreeting,Hello,Bonjour\n").unwrap();

    let codec = Codec::new(FormatType::AndroidStrings);
    codec
        .import(&output, &res, &ImportOptions::default())
        .unwrap();

    let fr = fs::read_to_string(res.join("values-fr/strings.xml")).unwrap();
    assert_eq!(
        fr,
        indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
                <string name="greeting">Bonjour</string>
            </resources>
        "#}
    );
}

#[test]
fn arb_round_trip_preserves_metadata_entries() {
    let dir = TempDir::new().unwrap();
    let res = dir.path().join("l10n");
    fs::create_dir_all(&res).unwrap();
    let en = indoc! {r#"
        {
          "@@locale": "en",
          "greeting": "Hello {name}",
          "@greeting": {
            "placeholders": {
              "name": {}
            }
          },
          "farewell": "Goodbye"
        }
    "#};
    let es = indoc! {r#"
        {
          "@@locale": "es",
          "greeting": "Hola {name}"
        }
    "#};
    fs::write(res.join("app_en.arb"), en).unwrap();
    fs::write(res.join("app_es.arb"), es).unwrap();
    let output = dir.path().join("translations.csv");

    let codec = Codec::new(FormatType::Arb);
    let report = codec
        .export(&res, &output, &ExportOptions::default())
        .unwrap();
    assert_eq!(report.languages, vec!["en", "es"]);

    let import = codec
        .import(&output, &res, &ImportOptions::default())
        .unwrap();
    assert!(import.failures.is_empty());

    // The template file is untouched; the Spanish file keeps its own
    // metadata and gains the missing keys at the end.
    assert_eq!(fs::read_to_string(res.join("app_en.arb")).unwrap(), en);
    let es_after = fs::read_to_string(res.join("app_es.arb")).unwrap();
    assert!(es_after.contains(r#""@@locale": "es""#));
    assert!(es_after.contains(r#""greeting": "Hola {name}""#));
    assert!(es_after.contains(r#""farewell": """#));
    assert!(es_after.contains(r#""@greeting""#));
}

#[test]
fn reexport_after_translation_removes_the_untranslated_view() {
    let dir = TempDir::new().unwrap();
    let res = dir.path().join("locales");
    fs::create_dir_all(&res).unwrap();
    fs::write(res.join("en.json"), "{\n  \"a\": \"one\"\n}\n").unwrap();
    fs::write(res.join("es.json"), "{}\n").unwrap();
    let output = dir.path().join("translations.csv");

    let codec = Codec::new(FormatType::Json);
    let report = codec
        .export(&res, &output, &ExportOptions::default())
        .unwrap();
    let view = report.untranslated_output.unwrap();
    assert!(view.is_file());

    // The translation is finished out of band; the next export must not
    // leave the now-stale view behind.
    fs::write(res.join("es.json"), "{\n  \"a\": \"uno\"\n}\n").unwrap();
    let report = codec
        .export(&res, &output, &ExportOptions::default())
        .unwrap();
    assert!(report.untranslated_output.is_none());
    assert!(!view.exists());

    // A partial import against the fresh export is a setup fault rather
    // than a replay of the old rows.
    let options = ImportOptions {
        mode: ImportMode::Partial,
        ..ImportOptions::default()
    };
    let result = codec.import(&output, &res, &options);
    assert!(matches!(result, Err(stringsheet::Error::MissingView(_))));
    assert_eq!(
        fs::read_to_string(res.join("es.json")).unwrap(),
        "{\n  \"a\": \"uno\"\n}\n"
    );
}

#[test]
fn json_export_with_banner_and_template_fallback() {
    let dir = TempDir::new().unwrap();
    let res = dir.path().join("locales");
    fs::create_dir_all(&res).unwrap();
    fs::write(res.join("de.json"), r#"{"a": "eins"}"#).unwrap();
    fs::write(res.join("fr.json"), r#"{"a": "un"}"#).unwrap();
    let output = dir.path().join("translations.tsv");

    let codec = Codec::new(FormatType::Json);
    let options = ExportOptions {
        banner: Some("Placeholders in braces must not be translated".to_string()),
        ..ExportOptions::default()
    };
    let report = codec.export(&res, &output, &options).unwrap();

    // No English file: the first discovered language stands in.
    assert_eq!(report.languages, vec!["de", "fr"]);
    assert!(report.fallback_note.is_some());

    let content = fs::read_to_string(&output).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Placeholders in braces must not be translated")
    );
    assert_eq!(lines.next(), Some("key\tde\tfr"));
    assert_eq!(lines.next(), Some("a\teins\tun"));
}
