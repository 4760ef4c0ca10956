//! Building annotation dictionaries and attaching them to pages.

use annotkit_core::{AnnotError, Annotation};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::value::{color_to_array, pdf_err};

/// Rebuild a PDF annotation dictionary from a descriptor.
///
/// Optional attributes are only written when set, so a copied annotation
/// carries exactly the entries its source had (plus the mandatory Type,
/// Subtype, and Rect).
pub(crate) fn annotation_dict(annot: &Annotation) -> Dictionary {
    let mut dict = dictionary! {
        "Type" => "Annot",
        "Subtype" => Object::Name(annot.raw_subtype.as_bytes().to_vec()),
        "Rect" => vec![
            Object::Real(annot.rect.x0 as f32),
            Object::Real(annot.rect.y0 as f32),
            Object::Real(annot.rect.x1 as f32),
            Object::Real(annot.rect.y1 as f32),
        ],
    };

    if let Some(ref contents) = annot.contents {
        dict.set("Contents", Object::string_literal(contents.as_str()));
    }
    if let Some(ref author) = annot.author {
        dict.set("T", Object::string_literal(author.as_str()));
    }
    if let Some(ref subject) = annot.subject {
        dict.set("Subj", Object::string_literal(subject.as_str()));
    }
    if let Some(ref modified) = annot.modified {
        dict.set("M", Object::string_literal(modified.as_str()));
    }
    if annot.flags != 0 {
        dict.set("F", Object::Integer(annot.flags));
    }
    if let Some(color) = annot.stroke_color {
        dict.set("C", color_to_array(color));
    }
    if let Some(color) = annot.interior_color {
        dict.set("IC", color_to_array(color));
    }
    if annot.opacity != 1.0 {
        dict.set("CA", Object::Real(annot.opacity as f32));
    }
    if let Some(width) = annot.border_width {
        dict.set("BS", dictionary! { "W" => Object::Real(width as f32) });
    }
    if let Some(line) = annot.line {
        dict.set(
            "L",
            Object::Array(line.iter().map(|&v| Object::Real(v as f32)).collect()),
        );
    }
    if let Some((start, end)) = annot.line_endings {
        dict.set(
            "LE",
            Object::Array(vec![
                Object::Name(start.pdf_name().as_bytes().to_vec()),
                Object::Name(end.pdf_name().as_bytes().to_vec()),
            ]),
        );
    }
    if let Some(ref da) = annot.default_appearance {
        dict.set("DA", Object::string_literal(da.as_str()));
    }

    dict
}

/// Register an annotation dictionary as an indirect object and reference it
/// from the page's /Annots array (creating the array when absent, following
/// an indirect /Annots reference when present).
pub(crate) fn append_annotation_dict(
    doc: &mut Document,
    page_id: ObjectId,
    dict: Dictionary,
) -> Result<(), AnnotError> {
    let annot_id = doc.add_object(dict);

    // Probe for an indirect /Annots array before taking a mutable borrow.
    let annots_ref: Option<ObjectId> = {
        let page = doc.get_dictionary(page_id).map_err(pdf_err)?;
        match page.get(b"Annots") {
            Ok(Object::Reference(id)) => Some(*id),
            _ => None,
        }
    };

    if let Some(array_id) = annots_ref {
        let obj = doc.get_object_mut(array_id).map_err(pdf_err)?;
        return match obj {
            Object::Array(entries) => {
                entries.push(Object::Reference(annot_id));
                Ok(())
            }
            _ => Err(AnnotError::Malformed(
                "/Annots reference does not point to an array".to_string(),
            )),
        };
    }

    let page = doc
        .get_object_mut(page_id)
        .map_err(pdf_err)?
        .as_dict_mut()
        .map_err(|_| AnnotError::Malformed("page object is not a dictionary".to_string()))?;
    match page.get_mut(b"Annots") {
        Ok(Object::Array(entries)) => entries.push(Object::Reference(annot_id)),
        Ok(_) => {
            return Err(AnnotError::Malformed(
                "/Annots is not an array".to_string(),
            ));
        }
        Err(_) => page.set("Annots", Object::Array(vec![Object::Reference(annot_id)])),
    }
    Ok(())
}
