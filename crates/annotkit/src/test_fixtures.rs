//! In-memory fixture PDFs for unit tests, built with lopdf.

use lopdf::{Dictionary, Object, Stream, dictionary};

/// Build a PDF where each page has the given content stream and annotation
/// dictionaries.
pub(crate) fn build_pdf(pages: &[(&str, Vec<Dictionary>)]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
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
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
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
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_ids.len() as i64),
    };
    let pages_id = doc.add_object(pages_dict);

    for pid in &page_ids {
        if let Ok(page_obj) = doc.get_object_mut(*pid) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
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

/// One empty page.
pub(crate) fn blank_page_pdf() -> Vec<u8> {
    build_pdf(&[("", Vec::new())])
}

/// `n` pages, each showing its page label.
pub(crate) fn multi_page_pdf(n: usize) -> Vec<u8> {
    let contents: Vec<String> = (1..=n)
        .map(|i| format!("BT /F1 12 Tf 72 720 Td (Page {i}) Tj ET"))
        .collect();
    let pages: Vec<(&str, Vec<Dictionary>)> = contents
        .iter()
        .map(|c| (c.as_str(), Vec::new()))
        .collect();
    build_pdf(&pages)
}

/// One page with the given content stream.
pub(crate) fn text_page_pdf(content: &str) -> Vec<u8> {
    build_pdf(&[(content, Vec::new())])
}

/// A minimal Text (sticky note) annotation dictionary.
pub(crate) fn text_annot(contents: &str, author: &str) -> Dictionary {
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
pub(crate) fn highlight_annot() -> Dictionary {
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

/// A Square annotation with stroke color, border, and opacity.
pub(crate) fn square_annot() -> Dictionary {
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
        "IC" => vec![Object::Real(0.9), Object::Real(0.9), Object::Real(0.9)],
        "CA" => Object::Real(0.5),
        "F" => Object::Integer(4),
        "BS" => dictionary! { "W" => Object::Integer(3) },
    }
}
