//! annotkit: PDF annotation manipulation over the lopdf object model.
//!
//! This is the document layer of annotkit-rs. It opens documents, walks
//! pages and their `/Annots` arrays into [`Annotation`] descriptors, copies
//! annotations between documents, creates new annotations, and scans page
//! content streams into text spans and painted-object geometry for the
//! analysis tools.
//!
//! # Architecture
//!
//! - **annotkit-core**: backend-independent types and algorithms
//! - **annotkit** (this crate): lopdf-backed document access and mutation
//! - **annotkit-raster**: structural page rasterizer for visual differencing

mod annots;
mod content;
mod copy;
mod create;
mod document;
#[cfg(test)]
pub(crate) mod test_fixtures;
mod value;
mod write;

pub use annotkit_core::{Annotation, AnnotationKind, AnnotError, Color, LineEnding, Rect, TextSpan};

pub use content::{ImageBox, PageContent, PaintedBox};
pub use copy::{CollectedAnnotations, CopySummary, collect_annotations, copy_annotations};
pub use create::NewAnnotation;
pub use document::PdfFile;
