//! Reading page annotations into [`Annotation`] descriptors.

use annotkit_core::{AnnotError, Annotation, LineEnding, Rect};
use lopdf::{Dictionary, Document, Object};

use crate::document::PdfFile;
use crate::value::{color_from_array, number, pdf_err, string_entry};

impl PdfFile {
    /// Extract all annotations on a page, in /Annots order.
    ///
    /// The /Annots entry may be a direct array, an indirect reference to an
    /// array, and its elements may be references or inline dictionaries;
    /// all forms are handled. Malformed entries are skipped rather than
    /// failing the page.
    pub fn page_annotations(&self, index: usize) -> Result<Vec<Annotation>, AnnotError> {
        let page_id = self.page_id(index)?;
        let doc = self.doc();
        let page_dict = doc.get_dictionary(page_id).map_err(pdf_err)?;

        let annots_obj = match page_dict.get_deref(b"Annots", doc) {
            Ok(obj) => obj,
            Err(_) => return Ok(Vec::new()),
        };
        let entries = annots_obj
            .as_array()
            .map_err(|_| AnnotError::Malformed("/Annots is not an array".to_string()))?;

        let mut annotations = Vec::new();
        for entry in entries {
            let dict = match entry {
                Object::Reference(id) => doc.get_dictionary(*id).ok(),
                Object::Dictionary(dict) => Some(dict),
                _ => None,
            };
            let Some(dict) = dict else { continue };
            if let Some(annot) = annotation_from_dict(dict, doc) {
                annotations.push(annot);
            }
        }
        Ok(annotations)
    }
}

/// Numeric value of an object, following one level of indirection.
fn resolved_number(obj: &Object, doc: &Document) -> Option<f64> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok().and_then(number),
        other => number(other),
    }
}

/// Four numbers of a /Rect or /L style array.
fn quad(dict: &Dictionary, key: &[u8], doc: &Document) -> Option<[f64; 4]> {
    let values = dict.get_deref(key, doc).ok()?.as_array().ok()?;
    let nums: Vec<f64> = values
        .iter()
        .filter_map(|obj| resolved_number(obj, doc))
        .collect();
    match nums.as_slice() {
        [a, b, c, d] => Some([*a, *b, *c, *d]),
        _ => None,
    }
}

/// Border width from /BS /W, falling back to the third /Border element.
fn border_width(dict: &Dictionary, doc: &Document) -> Option<f64> {
    if let Ok(bs) = dict.get_deref(b"BS", doc).and_then(Object::as_dict) {
        if let Some(w) = bs.get_deref(b"W", doc).ok().and_then(|obj| number(obj)) {
            return Some(w);
        }
    }
    let border = dict.get_deref(b"Border", doc).ok()?.as_array().ok()?;
    border.get(2).and_then(|obj| resolved_number(obj, doc))
}

/// Line-ending pair from /LE.
fn line_endings(dict: &Dictionary, doc: &Document) -> Option<(LineEnding, LineEnding)> {
    let values = dict.get_deref(b"LE", doc).ok()?.as_array().ok()?;
    let name = |obj: &Object| -> LineEnding {
        obj.as_name()
            .map(|bytes| LineEnding::from_name(&String::from_utf8_lossy(bytes)))
            .unwrap_or(LineEnding::None)
    };
    match values.as_slice() {
        [start, end] => Some((name(start), name(end))),
        _ => None,
    }
}

/// Font size from a default-appearance string like "0 g /Helv 12 Tf".
///
/// Only the Tf operand pair is interpreted; the rest of the string rides
/// along verbatim when an annotation is copied.
pub(crate) fn da_font_size(da: &str) -> Option<f64> {
    let tokens: Vec<&str> = da.split_whitespace().collect();
    let tf = tokens.iter().position(|t| *t == "Tf")?;
    tokens.get(tf.checked_sub(1)?)?.parse().ok()
}

/// Build an [`Annotation`] from an annotation dictionary.
///
/// Returns `None` when the dictionary lacks a usable /Subtype or /Rect.
pub(crate) fn annotation_from_dict(dict: &Dictionary, doc: &Document) -> Option<Annotation> {
    let subtype = dict
        .get_deref(b"Subtype", doc)
        .ok()
        .and_then(|obj| obj.as_name().ok())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())?;
    let [x0, y0, x1, y1] = quad(dict, b"Rect", doc)?;

    let mut annot = Annotation::new(&subtype, Rect::new(x0, y0, x1, y1));
    annot.contents = string_entry(dict, b"Contents", doc);
    annot.author = string_entry(dict, b"T", doc);
    annot.subject = string_entry(dict, b"Subj", doc);
    annot.modified = string_entry(dict, b"M", doc);
    annot.flags = dict
        .get_deref(b"F", doc)
        .ok()
        .and_then(|obj| obj.as_i64().ok())
        .unwrap_or(0);
    annot.stroke_color = dict
        .get_deref(b"C", doc)
        .ok()
        .and_then(|obj| obj.as_array().ok())
        .and_then(|values| color_from_array(values));
    annot.interior_color = dict
        .get_deref(b"IC", doc)
        .ok()
        .and_then(|obj| obj.as_array().ok())
        .and_then(|values| color_from_array(values));
    annot.opacity = dict
        .get_deref(b"CA", doc)
        .ok()
        .and_then(|obj| number(obj))
        .unwrap_or(1.0);
    annot.border_width = border_width(dict, doc);
    annot.line = quad(dict, b"L", doc);
    annot.line_endings = line_endings(dict, doc);
    annot.default_appearance = string_entry(dict, b"DA", doc);
    annot.font_size = annot.default_appearance.as_deref().and_then(da_font_size);
    Some(annot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{build_pdf, highlight_annot, square_annot, text_annot};
    use annotkit_core::{AnnotationKind, Color};
    use lopdf::dictionary;

    #[test]
    fn page_without_annots_is_empty() {
        let pdf = PdfFile::open_bytes(&build_pdf(&[("", Vec::new())])).unwrap();
        assert!(pdf.page_annotations(0).unwrap().is_empty());
    }

    #[test]
    fn text_annotation_fields() {
        let bytes = build_pdf(&[("", vec![text_annot("A comment", "Alice")])]);
        let pdf = PdfFile::open_bytes(&bytes).unwrap();
        let annots = pdf.page_annotations(0).unwrap();
        assert_eq!(annots.len(), 1);
        let a = &annots[0];
        assert_eq!(a.kind, AnnotationKind::Text);
        assert_eq!(a.contents.as_deref(), Some("A comment"));
        assert_eq!(a.author.as_deref(), Some("Alice"));
        assert_eq!(a.rect, Rect::new(100.0, 700.0, 120.0, 720.0));
    }

    #[test]
    fn square_annotation_style_fields() {
        let bytes = build_pdf(&[("", vec![square_annot()])]);
        let pdf = PdfFile::open_bytes(&bytes).unwrap();
        let a = &pdf.page_annotations(0).unwrap()[0];
        assert_eq!(a.kind, AnnotationKind::Square);
        assert_eq!(a.stroke_color, Some(Color::red()));
        assert_eq!(a.interior_color, Some(Color::gray(0.9)));
        assert_eq!(a.opacity, 0.5);
        assert_eq!(a.flags, 4);
        assert_eq!(a.border_width, Some(3.0));
    }

    #[test]
    fn highlight_is_detected() {
        let bytes = build_pdf(&[("", vec![highlight_annot()])]);
        let pdf = PdfFile::open_bytes(&bytes).unwrap();
        let a = &pdf.page_annotations(0).unwrap()[0];
        assert!(a.is_highlight());
    }

    #[test]
    fn line_annotation_endpoints_and_endings() {
        let line = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Line",
            "Rect" => vec![
                lopdf::Object::Integer(10),
                lopdf::Object::Integer(10),
                lopdf::Object::Integer(110),
                lopdf::Object::Integer(60),
            ],
            "L" => vec![
                lopdf::Object::Integer(10),
                lopdf::Object::Integer(10),
                lopdf::Object::Integer(110),
                lopdf::Object::Integer(60),
            ],
            "LE" => vec![
                lopdf::Object::Name(b"None".to_vec()),
                lopdf::Object::Name(b"ClosedArrow".to_vec()),
            ],
        };
        let bytes = build_pdf(&[("", vec![line])]);
        let pdf = PdfFile::open_bytes(&bytes).unwrap();
        let a = &pdf.page_annotations(0).unwrap()[0];
        assert_eq!(a.line, Some([10.0, 10.0, 110.0, 60.0]));
        assert_eq!(
            a.line_endings,
            Some((LineEnding::None, LineEnding::ClosedArrow))
        );
    }

    #[test]
    fn da_string_yields_font_size() {
        let freetext = dictionary! {
            "Type" => "Annot",
            "Subtype" => "FreeText",
            "Rect" => vec![
                lopdf::Object::Integer(10),
                lopdf::Object::Integer(10),
                lopdf::Object::Integer(200),
                lopdf::Object::Integer(40),
            ],
            "Contents" => lopdf::Object::string_literal("visible text"),
            "DA" => lopdf::Object::string_literal("0 0 0 rg /Helv 14 Tf"),
        };
        let bytes = build_pdf(&[("", vec![freetext])]);
        let pdf = PdfFile::open_bytes(&bytes).unwrap();
        let a = &pdf.page_annotations(0).unwrap()[0];
        assert_eq!(a.font_size, Some(14.0));
        assert_eq!(a.default_appearance.as_deref(), Some("0 0 0 rg /Helv 14 Tf"));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        // A dict with no /Rect cannot be described; only the valid
        // annotation survives.
        let no_rect = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Text",
        };
        let bytes = build_pdf(&[("", vec![no_rect, text_annot("kept", "Bob")])]);
        let pdf = PdfFile::open_bytes(&bytes).unwrap();
        let annots = pdf.page_annotations(0).unwrap();
        assert_eq!(annots.len(), 1);
        assert_eq!(annots[0].contents.as_deref(), Some("kept"));
    }

    #[test]
    fn da_font_size_parsing() {
        assert_eq!(da_font_size("/Helv 12 Tf 0 g"), Some(12.0));
        assert_eq!(da_font_size("0 0 1 rg /TimesRoman 9.5 Tf"), Some(9.5));
        assert_eq!(da_font_size("no tf here"), None);
        assert_eq!(da_font_size("Tf"), None);
    }

    #[test]
    fn border_width_falls_back_to_border_array() {
        let annot = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Square",
            "Rect" => vec![
                lopdf::Object::Integer(0),
                lopdf::Object::Integer(0),
                lopdf::Object::Integer(10),
                lopdf::Object::Integer(10),
            ],
            "Border" => vec![
                lopdf::Object::Integer(0),
                lopdf::Object::Integer(0),
                lopdf::Object::Integer(2),
            ],
        };
        let bytes = build_pdf(&[("", vec![annot])]);
        let pdf = PdfFile::open_bytes(&bytes).unwrap();
        let a = &pdf.page_annotations(0).unwrap()[0];
        assert_eq!(a.border_width, Some(2.0));
    }
}
