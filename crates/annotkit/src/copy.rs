//! Copying non-highlight annotations between documents.

use annotkit_core::{AnnotError, Annotation};

use crate::document::PdfFile;
use crate::write::{annotation_dict, append_annotation_dict};

/// Annotations gathered from a source document, grouped by page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedAnnotations {
    /// (0-based source page index, annotations on that page), only pages
    /// with at least one annotation to copy.
    pub by_page: Vec<(usize, Vec<Annotation>)>,
    /// Highlights seen and excluded by the filter.
    pub highlights_excluded: usize,
}

impl CollectedAnnotations {
    /// Total number of annotations selected for copying.
    pub fn total(&self) -> usize {
        self.by_page.iter().map(|(_, annots)| annots.len()).sum()
    }

    /// 0-based source page indices carrying annotations.
    pub fn pages(&self) -> Vec<usize> {
        self.by_page.iter().map(|(page, _)| *page).collect()
    }
}

/// Outcome of writing collected annotations into a target document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopySummary {
    /// Annotations written to the target.
    pub copied: usize,
    /// Annotations that failed to attach and were skipped.
    pub failed: usize,
    /// Source page indices dropped because the target has no such page.
    pub skipped_pages: Vec<usize>,
}

/// Gather every non-highlight annotation on the given source pages.
///
/// `pages` holds 0-based indices and must already be validated against the
/// source page count.
pub fn collect_annotations(
    source: &PdfFile,
    pages: &[usize],
) -> Result<CollectedAnnotations, AnnotError> {
    let mut collected = CollectedAnnotations::default();

    for &page in pages {
        let mut kept = Vec::new();
        for annot in source.page_annotations(page)? {
            if annot.is_highlight() {
                collected.highlights_excluded += 1;
            } else {
                kept.push(annot);
            }
        }
        if !kept.is_empty() {
            collected.by_page.push((page, kept));
        }
    }

    Ok(collected)
}

/// Write collected annotations onto the same page numbers of the target.
///
/// Pages past the end of the target are skipped (recorded in the summary)
/// rather than failing the copy; so is any single annotation the target
/// page refuses to accept.
pub fn copy_annotations(
    target: &mut PdfFile,
    collected: &CollectedAnnotations,
) -> Result<CopySummary, AnnotError> {
    let mut summary = CopySummary::default();
    let target_pages = target.page_count();

    for (page, annots) in &collected.by_page {
        if *page >= target_pages {
            summary.skipped_pages.push(*page);
            continue;
        }
        let page_id = target.page_id(*page)?;
        for annot in annots {
            match append_annotation_dict(target.doc_mut(), page_id, annotation_dict(annot)) {
                Ok(()) => summary.copied += 1,
                Err(_) => summary.failed += 1,
            }
        }
    }

    Ok(summary)
}
