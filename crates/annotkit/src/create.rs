//! Creating new annotations from recreation requests.
//!
//! [`NewAnnotation`] is the unit of the recreate tool: the batch file is a
//! JSON list of these (serde-tagged by `type`), and the interactive menu
//! builds them from prompted values.

use annotkit_core::{AnnotError, Annotation, Color, LineEnding, Rect};

use crate::document::PdfFile;
use crate::write::{annotation_dict, append_annotation_dict};

/// Side of the square rect synthesized around a sticky-note anchor point.
const NOTE_ICON_SIZE: f64 = 20.0;

#[cfg(feature = "serde")]
fn default_author() -> String {
    "User".to_string()
}

#[cfg(feature = "serde")]
fn default_font_size() -> f64 {
    12.0
}

#[cfg(feature = "serde")]
fn default_border_width() -> f64 {
    2.0
}

#[cfg(feature = "serde")]
fn default_square_color() -> [f64; 3] {
    [1.0, 0.0, 0.0]
}

#[cfg(feature = "serde")]
fn default_arrow_color() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

/// An annotation to add to a document.
///
/// Coordinates are PDF points with the origin at the bottom-left of the
/// page; `page` is 1-based, as everywhere user-facing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum NewAnnotation {
    /// Sticky note (/Text) anchored at a point.
    Note {
        page: usize,
        x: f64,
        y: f64,
        contents: String,
        #[cfg_attr(feature = "serde", serde(default = "default_author"))]
        author: String,
    },
    /// Visible text (/FreeText) in a rectangle.
    FreeText {
        page: usize,
        rect: [f64; 4],
        contents: String,
        #[cfg_attr(feature = "serde", serde(default = "default_font_size"))]
        font_size: f64,
    },
    /// Rectangle outline (/Square).
    Square {
        page: usize,
        rect: [f64; 4],
        #[cfg_attr(feature = "serde", serde(default = "default_square_color"))]
        color: [f64; 3],
        #[cfg_attr(feature = "serde", serde(default = "default_border_width"))]
        width: f64,
    },
    /// Arrow (/Line with a closed-arrow ending).
    Arrow {
        page: usize,
        start: [f64; 2],
        end: [f64; 2],
        #[cfg_attr(feature = "serde", serde(default = "default_arrow_color"))]
        color: [f64; 3],
        #[cfg_attr(feature = "serde", serde(default = "default_border_width"))]
        width: f64,
    },
}

impl NewAnnotation {
    /// The 1-based page this annotation targets.
    pub fn page(&self) -> usize {
        match self {
            NewAnnotation::Note { page, .. }
            | NewAnnotation::FreeText { page, .. }
            | NewAnnotation::Square { page, .. }
            | NewAnnotation::Arrow { page, .. } => *page,
        }
    }

    /// Short label for reporting ("note", "free text", ...).
    pub fn kind_label(&self) -> &'static str {
        match self {
            NewAnnotation::Note { .. } => "note",
            NewAnnotation::FreeText { .. } => "free text",
            NewAnnotation::Square { .. } => "rectangle",
            NewAnnotation::Arrow { .. } => "arrow",
        }
    }

    /// Expand into a full annotation descriptor.
    fn to_annotation(&self) -> Annotation {
        match self {
            NewAnnotation::Note {
                x,
                y,
                contents,
                author,
                ..
            } => {
                let rect = Rect::new(*x, *y, x + NOTE_ICON_SIZE, y + NOTE_ICON_SIZE);
                let mut annot = Annotation::new("Text", rect);
                annot.contents = Some(contents.clone());
                annot.author = Some(author.clone());
                annot
            }
            NewAnnotation::FreeText {
                rect,
                contents,
                font_size,
                ..
            } => {
                let mut annot =
                    Annotation::new("FreeText", Rect::new(rect[0], rect[1], rect[2], rect[3]));
                annot.contents = Some(contents.clone());
                annot.font_size = Some(*font_size);
                annot.default_appearance = Some(format!("/Helv {font_size} Tf 0 g"));
                annot
            }
            NewAnnotation::Square {
                rect, color, width, ..
            } => {
                let mut annot =
                    Annotation::new("Square", Rect::new(rect[0], rect[1], rect[2], rect[3]));
                annot.stroke_color = Some(Color::new(color[0], color[1], color[2]));
                annot.border_width = Some(*width);
                annot
            }
            NewAnnotation::Arrow {
                start,
                end,
                color,
                width,
                ..
            } => {
                let rect = Rect::new(start[0], start[1], end[0], end[1]).normalized();
                let mut annot = Annotation::new("Line", rect);
                annot.line = Some([start[0], start[1], end[0], end[1]]);
                annot.line_endings = Some((LineEnding::None, LineEnding::ClosedArrow));
                annot.stroke_color = Some(Color::new(color[0], color[1], color[2]));
                annot.border_width = Some(*width);
                annot
            }
        }
    }
}

impl PdfFile {
    /// Append a new annotation to its target page.
    pub fn append_annotation(&mut self, new_annot: &NewAnnotation) -> Result<(), AnnotError> {
        let page = new_annot.page();
        if page == 0 {
            return Err(AnnotError::Other(
                "page 0 is invalid (pages start at 1)".to_string(),
            ));
        }
        let index = page - 1;
        if index >= self.page_count() {
            return Err(AnnotError::PageOutOfRange {
                index,
                page_count: self.page_count(),
            });
        }
        let page_id = self.page_id(index)?;
        append_annotation_dict(
            self.doc_mut(),
            page_id,
            annotation_dict(&new_annot.to_annotation()),
        )
    }
}
