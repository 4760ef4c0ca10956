//! Document wrapper over the lopdf object model.

use std::fs::File;
use std::path::Path;

use annotkit_core::{AnnotError, Rect};
use lopdf::{Document, Object, ObjectId};

use crate::value::{number, pdf_err};

/// US Letter, the fallback when no ancestor carries a MediaBox.
const DEFAULT_PAGE_SIZE: (f64, f64) = (612.0, 792.0);

/// A PDF document opened for annotation work.
///
/// Wraps a parsed [`lopdf::Document`] and provides page-indexed access.
/// Page indices are 0-based throughout the API; user-facing numbering is
/// the caller's concern.
///
/// # Example
///
/// ```ignore
/// let mut pdf = PdfFile::open("input.pdf")?;
/// for index in 0..pdf.page_count() {
///     let annots = pdf.page_annotations(index)?;
/// }
/// pdf.save("output.pdf")?;
/// ```
#[derive(Debug)]
pub struct PdfFile {
    doc: Document,
    page_ids: Vec<ObjectId>,
}

impl PdfFile {
    /// Open a PDF document from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AnnotError> {
        let doc = Document::load(path.as_ref()).map_err(pdf_err)?;
        Ok(Self::from_document(doc))
    }

    /// Open a PDF document from bytes.
    pub fn open_bytes(bytes: &[u8]) -> Result<Self, AnnotError> {
        let doc = Document::load_mem(bytes).map_err(pdf_err)?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: Document) -> Self {
        // get_pages keys are 1-based page numbers in document order.
        let page_ids = doc.get_pages().into_values().collect();
        Self { doc, page_ids }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Object id of a page by 0-based index.
    pub(crate) fn page_id(&self, index: usize) -> Result<ObjectId, AnnotError> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or(AnnotError::PageOutOfRange {
                index,
                page_count: self.page_ids.len(),
            })
    }

    pub(crate) fn doc(&self) -> &Document {
        &self.doc
    }

    pub(crate) fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Page size (width, height) in points from the effective MediaBox.
    ///
    /// MediaBox is inheritable, so absent a page-level entry the parent
    /// chain is consulted; documents with no MediaBox anywhere get US
    /// Letter.
    pub fn page_size(&self, index: usize) -> Result<(f64, f64), AnnotError> {
        let rect = self.media_box(index)?;
        Ok((rect.width(), rect.height()))
    }

    /// Effective MediaBox of a page, normalized.
    pub fn media_box(&self, index: usize) -> Result<Rect, AnnotError> {
        let page_id = self.page_id(index)?;
        let mut dict = self.doc.get_dictionary(page_id).map_err(pdf_err)?;

        // Walk the parent chain; a depth cap guards against reference cycles.
        for _ in 0..32 {
            if let Ok(obj) = dict.get_deref(b"MediaBox", &self.doc) {
                if let Ok(values) = obj.as_array() {
                    let nums: Vec<f64> = values.iter().filter_map(number).collect();
                    if let [x0, y0, x1, y1] = nums.as_slice() {
                        return Ok(Rect::new(*x0, *y0, *x1, *y1).normalized());
                    }
                }
            }
            match dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .ok()
                .and_then(|id| self.doc.get_dictionary(id).ok())
            {
                Some(parent) => dict = parent,
                None => break,
            }
        }

        let (w, h) = DEFAULT_PAGE_SIZE;
        Ok(Rect::new(0.0, 0.0, w, h))
    }

    /// Save the document to a file path.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), AnnotError> {
        let mut file = File::create(path.as_ref())?;
        self.doc.save_to(&mut file)?;
        Ok(())
    }

    /// Serialize the document to bytes.
    pub fn save_bytes(&mut self) -> Result<Vec<u8>, AnnotError> {
        let mut buf = Vec::new();
        self.doc.save_to(&mut buf)?;
        Ok(buf)
    }
}
