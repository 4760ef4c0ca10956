//! Shared fixture builders for CLI integration tests.
//!
//! Fixture PDFs are synthesized with lopdf so tests need no binary test
//! assets.

#![allow(dead_code)]

use std::io::Write;

use lopdf::{Dictionary, Object, Stream, dictionary};
use tempfile::NamedTempFile;

/// Build a PDF where each page has the given content stream and annotation
/// dictionaries. Pages are US Letter with Helvetica (F1) and Courier (F2)
/// available.
pub fn build_pdf(pages: &[(&str, Vec<Dictionary>)]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");

    let helvetica_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let courier_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ];

    let mut page_ids = Vec::new();
    for (content, annots) in pages {
        let stream = Stream::new(dictionary! {}, content.as_bytes().to_vec());
        let content_id = doc.add_object(stream);
        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => Object::Reference(helvetica_id),
                "F2" => Object::Reference(courier_id),
            },
        };

        let annot_refs: Vec<Object> = annots
            .iter()
            .map(|dict| Object::Reference(doc.add_object(dict.clone())))
            .collect();

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => resources,
        };
        if !annot_refs.is_empty() {
            page_dict.set("Annots", Object::Array(annot_refs));
        }
        page_ids.push(doc.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_ids.len() as i64),
    });
    for pid in &page_ids {
        if let Ok(dict) = doc.get_object_mut(*pid).and_then(Object::as_dict_mut) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Write PDF bytes to a named temp file.
pub fn write_pdf(bytes: &[u8]) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(bytes).unwrap();
    tmp
}

/// A Text (sticky note) annotation dictionary.
pub fn text_annot(contents: &str, author: &str) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Text",
        "Rect" => vec![
            Object::Integer(100),
            Object::Integer(700),
            Object::Integer(120),
            Object::Integer(720),
        ],
        "Contents" => Object::string_literal(contents),
        "T" => Object::string_literal(author),
    }
}

/// A Highlight annotation dictionary.
pub fn highlight_annot() -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Highlight",
        "Rect" => vec![
            Object::Integer(72),
            Object::Integer(500),
            Object::Integer(200),
            Object::Integer(515),
        ],
        "C" => vec![Object::Real(1.0), Object::Real(1.0), Object::Real(0.0)],
    }
}

/// A Square annotation dictionary with a red border.
pub fn square_annot() -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Square",
        "Rect" => vec![
            Object::Integer(50),
            Object::Integer(50),
            Object::Integer(150),
            Object::Integer(100),
        ],
        "C" => vec![Object::Real(1.0), Object::Real(0.0), Object::Real(0.0)],
        "BS" => dictionary! { "W" => Object::Integer(3) },
    }
}
