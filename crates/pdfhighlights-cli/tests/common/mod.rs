//! Shared fixtures for the CLI tests.

#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use lopdf::{Object, Stream, dictionary};

pub fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("pdfhighlights").unwrap();
    cmd.env_remove("PDFHIGHLIGHTS_ROOT").env_remove("RUST_LOG");
    cmd
}

fn numbers(values: &[f64]) -> Object {
    Object::Array(values.iter().map(|&v| Object::Real(v as f32)).collect())
}

/// `pages` PDF pages of "Hello world" (12pt Helvetica at 72, 720). Pages
/// listed in `highlighted` (1-based) carry a red highlight over "Hello"
/// by Alice.
pub fn hello_pdf(pages: usize, highlighted: &[usize]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for number in 1..=pages {
        let content = b"BT /F1 12 Tf 72 720 Td (Hello world) Tj ET".to_vec();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let mut annots = Vec::new();
        if highlighted.contains(&number) {
            annots.push(Object::Reference(doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Highlight",
                "QuadPoints" => numbers(&[72.0, 732.0, 101.5, 732.0, 72.0, 716.0, 101.5, 716.0]),
                "C" => numbers(&[1.0, 0.0, 0.0]),
                "T" => Object::string_literal("Alice"),
                "M" => Object::string_literal("D:20240301120000Z"),
            })));
        }
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

pub fn write(path: &Path, bytes: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}
