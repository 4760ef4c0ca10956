//! PDF annotation descriptors.
//!
//! Provides [`Annotation`] and [`AnnotationKind`] for representing page
//! annotations together with the style attributes the copy tool preserves
//! (colors, border, opacity, line geometry, text appearance).

use crate::Color;
use crate::geometry::Rect;

/// Common PDF annotation subtypes.
///
/// Covers the annotation types the toolkit manipulates (PDF 1.7, Table 169).
/// Unknown or rare subtypes are represented as [`AnnotationKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnnotationKind {
    /// Text annotation (sticky note).
    Text,
    /// Link annotation.
    Link,
    /// Free text annotation (directly displayed text).
    FreeText,
    /// Line annotation (line or arrow).
    Line,
    /// Square annotation (rectangle shape).
    Square,
    /// Circle annotation (ellipse shape).
    Circle,
    /// Highlight markup annotation.
    Highlight,
    /// Underline markup annotation.
    Underline,
    /// Strikeout markup annotation.
    StrikeOut,
    /// Squiggly-underline markup annotation.
    Squiggly,
    /// Stamp annotation.
    Stamp,
    /// Ink annotation (freehand drawing).
    Ink,
    /// Popup annotation (associated with another annotation).
    Popup,
    /// Widget annotation (form field).
    Widget,
    /// Other / unknown annotation subtype.
    Other(String),
}

impl AnnotationKind {
    /// Parse an annotation kind from a PDF /Subtype name.
    pub fn from_subtype(subtype: &str) -> Self {
        match subtype {
            "Text" => Self::Text,
            "Link" => Self::Link,
            "FreeText" => Self::FreeText,
            "Line" => Self::Line,
            "Square" => Self::Square,
            "Circle" => Self::Circle,
            "Highlight" => Self::Highlight,
            "Underline" => Self::Underline,
            "StrikeOut" => Self::StrikeOut,
            "Squiggly" => Self::Squiggly,
            "Stamp" => Self::Stamp,
            "Ink" => Self::Ink,
            "Popup" => Self::Popup,
            "Widget" => Self::Widget,
            other => Self::Other(other.to_string()),
        }
    }

    /// The PDF /Subtype name for this kind.
    pub fn subtype(&self) -> &str {
        match self {
            Self::Text => "Text",
            Self::Link => "Link",
            Self::FreeText => "FreeText",
            Self::Line => "Line",
            Self::Square => "Square",
            Self::Circle => "Circle",
            Self::Highlight => "Highlight",
            Self::Underline => "Underline",
            Self::StrikeOut => "StrikeOut",
            Self::Squiggly => "Squiggly",
            Self::Stamp => "Stamp",
            Self::Ink => "Ink",
            Self::Popup => "Popup",
            Self::Widget => "Widget",
            Self::Other(name) => name,
        }
    }
}

/// Line-ending style for line/arrow annotations (/LE entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineEnding {
    /// No ending decoration.
    #[default]
    None,
    /// Open (two-stroke) arrowhead.
    OpenArrow,
    /// Closed (filled triangle) arrowhead.
    ClosedArrow,
    /// Square at the endpoint.
    Square,
    /// Circle at the endpoint.
    Circle,
    /// Diamond at the endpoint.
    Diamond,
    /// Short perpendicular bar.
    Butt,
    /// Slanted bar.
    Slash,
}

impl LineEnding {
    /// Parse from a PDF /LE name. Unknown names map to `None`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "OpenArrow" => Self::OpenArrow,
            "ClosedArrow" => Self::ClosedArrow,
            "Square" => Self::Square,
            "Circle" => Self::Circle,
            "Diamond" => Self::Diamond,
            "Butt" => Self::Butt,
            "Slash" => Self::Slash,
            _ => Self::None,
        }
    }

    /// The PDF name for this ending.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::OpenArrow => "OpenArrow",
            Self::ClosedArrow => "ClosedArrow",
            Self::Square => "Square",
            Self::Circle => "Circle",
            Self::Diamond => "Diamond",
            Self::Butt => "Butt",
            Self::Slash => "Slash",
        }
    }
}

/// A PDF annotation extracted from a page, with the style attributes needed
/// to rebuild an equivalent annotation in another document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    /// The annotation kind (parsed from /Subtype).
    pub kind: AnnotationKind,
    /// Raw /Subtype name as it appears in the PDF.
    pub raw_subtype: String,
    /// Annotation rectangle (/Rect), normalized.
    pub rect: Rect,
    /// Text contents (/Contents).
    pub contents: Option<String>,
    /// Author (/T).
    pub author: Option<String>,
    /// Subject (/Subj).
    pub subject: Option<String>,
    /// Modification date (/M, raw PDF date string).
    pub modified: Option<String>,
    /// Annotation flags (/F).
    pub flags: i64,
    /// Stroke color (/C).
    pub stroke_color: Option<Color>,
    /// Interior (fill) color (/IC).
    pub interior_color: Option<Color>,
    /// Opacity (/CA), 1.0 when absent.
    pub opacity: f64,
    /// Border width (/BS /W, or the third element of /Border).
    pub border_width: Option<f64>,
    /// Line endpoints (/L) for line/arrow annotations.
    pub line: Option<[f64; 4]>,
    /// Line-ending styles (/LE) for line/arrow annotations.
    pub line_endings: Option<(LineEnding, LineEnding)>,
    /// Font size parsed from the default-appearance string (/DA).
    pub font_size: Option<f64>,
    /// Raw default-appearance string (/DA) for text-bearing annotations.
    pub default_appearance: Option<String>,
}

impl Annotation {
    /// Create a bare annotation of the given subtype and rectangle.
    ///
    /// All optional style attributes start unset; `flags` is 0 and
    /// `opacity` is 1.0.
    pub fn new(subtype: &str, rect: Rect) -> Self {
        Self {
            kind: AnnotationKind::from_subtype(subtype),
            raw_subtype: subtype.to_string(),
            rect: rect.normalized(),
            contents: None,
            author: None,
            subject: None,
            modified: None,
            flags: 0,
            stroke_color: None,
            interior_color: None,
            opacity: 1.0,
            border_width: None,
            line: None,
            line_endings: None,
            font_size: None,
            default_appearance: None,
        }
    }

    /// Whether this annotation is a highlight markup annotation.
    ///
    /// The comparison is case-insensitive on the raw subtype, which is the
    /// filtering criterion of the copy tool.
    pub fn is_highlight(&self) -> bool {
        self.raw_subtype.eq_ignore_ascii_case("highlight")
    }
}
