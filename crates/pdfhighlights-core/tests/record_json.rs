//! JSON shape of records consumed by note templates.

#![cfg(feature = "serde")]

use pdfhighlights_core::*;

fn sample_record() -> AnnotationRecord {
    AnnotationRecord {
        highlight: Highlight {
            text: "Hello".to_string(),
            color_rgba: "rgba(255, 0, 0, 0.5)".to_string(),
        },
        author: "Ada".to_string(),
        modification_date: "D:20240101120000Z".to_string(),
        page: 2,
    }
}

#[test]
fn record_uses_camel_case_field_names() {
    let value = serde_json::to_value(sample_record()).expect("serialize failed");
    assert_eq!(
        value,
        serde_json::json!({
            "highlight": { "text": "Hello", "colorRgba": "rgba(255, 0, 0, 0.5)" },
            "author": "Ada",
            "modificationDate": "D:20240101120000Z",
            "page": 2,
        })
    );
}

#[test]
fn record_deserializes_from_template_shape() {
    let json = r#"{"highlight":{"text":"Hello","colorRgba":"rgba(255, 0, 0, 0.5)"},
        "author":"Ada","modificationDate":"D:20240101120000Z","page":2}"#;
    let record: AnnotationRecord = serde_json::from_str(json).expect("deserialize failed");
    assert_eq!(record, sample_record());
}

#[test]
fn warning_code_is_tagged() {
    let warning = ExtractWarning::new(ExtractWarningCode::MalformedGeometry, "no quads");
    let value = serde_json::to_value(&warning).expect("serialize failed");
    assert_eq!(value["code"]["type"], "MalformedGeometry");
    assert_eq!(value["description"], "no quads");
}
