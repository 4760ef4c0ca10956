//! Small conversions between lopdf objects and plain values.

use annotkit_core::{AnnotError, Color};
use lopdf::{Document, Object};

/// Map a lopdf error into the workspace error type.
pub(crate) fn pdf_err(err: lopdf::Error) -> AnnotError {
    AnnotError::Parse(err.to_string())
}

/// Numeric value of an Integer or Real object.
pub(crate) fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// Decode a PDF string object to text.
///
/// UTF-16BE when the byte-order mark is present, Latin-1 otherwise. PDF
/// text strings outside font contexts (Contents, T, Subj, M, DA) use
/// PDFDocEncoding, for which Latin-1 is the practical reading.
pub(crate) fn decode_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        String::from_utf16_lossy(&utf16)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// String value of an entry, following one level of indirection.
pub(crate) fn string_entry(
    dict: &lopdf::Dictionary,
    key: &[u8],
    doc: &Document,
) -> Option<String> {
    match dict.get_deref(key, doc) {
        Ok(Object::String(bytes, _)) => Some(decode_string(bytes)),
        _ => None,
    }
}

/// Color from an array of 1 (gray) or 3 (RGB) components.
///
/// CMYK (4 components) is converted to RGB. Empty arrays (a legal "no
/// color" marker) and other lengths yield `None`.
pub(crate) fn color_from_array(values: &[Object]) -> Option<Color> {
    let nums: Vec<f64> = values.iter().filter_map(number).collect();
    if nums.len() != values.len() {
        return None;
    }
    match nums.as_slice() {
        [g] => Some(Color::gray(*g)),
        [r, g, b] => Some(Color::new(*r, *g, *b)),
        [c, m, y, k] => Some(Color::new(
            (1.0 - c) * (1.0 - k),
            (1.0 - m) * (1.0 - k),
            (1.0 - y) * (1.0 - k),
        )),
        _ => None,
    }
}

/// Build a PDF array object from a color.
pub(crate) fn color_to_array(color: Color) -> Object {
    Object::Array(vec![
        Object::Real(color.r as f32),
        Object::Real(color.g as f32),
        Object::Real(color.b as f32),
    ])
}
