//! PDF fixtures built with lopdf for the integration tests.

#![allow(dead_code)]

use std::path::Path;

use lopdf::{Dictionary, Object, Stream, dictionary};

/// One line of 12pt Helvetica text with its baseline start.
pub struct Line<'a> {
    pub text: &'a str,
    pub x: f64,
    pub y: f64,
}

pub fn line(text: &str, x: f64, y: f64) -> Line<'_> {
    Line { text, x, y }
}

pub struct PageSpec<'a> {
    pub lines: Vec<Line<'a>>,
    pub annots: Vec<Dictionary>,
}

fn numbers(values: &[f64]) -> Object {
    Object::Array(values.iter().map(|&v| Object::Real(v as f32)).collect())
}

/// QuadPoints of the axis-aligned box `[min_x, max_x] x [min_y, max_y]`.
pub fn band(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Vec<f64> {
    vec![min_x, max_y, max_x, max_y, min_x, min_y, max_x, min_y]
}

/// Highlight annotation dictionary with colour components in 0..=1.
pub fn highlight(quads: &[f64], color: [f64; 3], author: &str) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Highlight",
        "QuadPoints" => numbers(quads),
        "C" => numbers(&color),
        "T" => Object::string_literal(author),
        "M" => Object::string_literal("D:20240301120000Z"),
    }
}

pub fn note(text: &str) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Text",
        "Contents" => Object::string_literal(text),
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Build a PDF with Helvetica as `/F1`, one page per spec.
pub fn build_pdf(pages: Vec<PageSpec<'_>>) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for spec in pages {
        let mut content = String::new();
        for line in &spec.lines {
            content.push_str(&format!(
                "BT /F1 12 Tf {} {} Td ({}) Tj ET\n",
                line.x,
                line.y,
                escape(line.text)
            ));
        }
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let annots: Vec<Object> = spec
            .annots
            .into_iter()
            .map(|a| Object::Reference(doc.add_object(a)))
            .collect();
        kids.push(Object::Reference(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
            "Annots" => annots,
        })));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => Object::Integer(kids.len() as i64),
            "Kids" => kids,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Three pages of "Hello world" with a red highlight over "Hello" on pages
/// 1 and 3 and a sticky note on page 2.
pub fn three_page_pdf() -> Vec<u8> {
    let hello = || vec![line("Hello world", 72.0, 720.0)];
    let over_hello = || highlight(&band(72.0, 101.5, 716.0, 732.0), [1.0, 0.0, 0.0], "Alice");
    build_pdf(vec![
        PageSpec {
            lines: hello(),
            annots: vec![over_hello()],
        },
        PageSpec {
            lines: hello(),
            annots: vec![note("not a highlight")],
        },
        PageSpec {
            lines: hello(),
            annots: vec![over_hello()],
        },
    ])
}

pub fn write(path: &Path, bytes: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}
