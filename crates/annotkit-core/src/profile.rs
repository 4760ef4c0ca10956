//! Per-page text profiling.
//!
//! Tallies the fonts, sizes, and fill colors of a page's text spans and
//! picks the dominant value of each, which stands in for "the main document
//! text" when scoring spans as annotation suspects.

use std::collections::BTreeMap;

use crate::Color;
use crate::span::TextSpan;

/// Dominant text characteristics of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProfile {
    /// Most frequent font name.
    pub main_font: String,
    /// Most frequent font size, rounded to 0.1 pt.
    pub main_size: f64,
    /// Most frequent fill color.
    pub main_color: Color,
    /// Span count per font name.
    pub font_counts: BTreeMap<String, usize>,
    /// Span count per size in tenths of a point.
    pub size_counts: BTreeMap<i64, usize>,
}

/// Round a size to tenths of a point for counting.
pub(crate) fn size_key(size: f64) -> i64 {
    (size * 10.0).round() as i64
}

impl TextProfile {
    /// Build a profile from a page's spans. Returns `None` for a page with
    /// no text.
    pub fn from_spans(spans: &[TextSpan]) -> Option<Self> {
        if spans.is_empty() {
            return None;
        }

        let mut font_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut size_counts: BTreeMap<i64, usize> = BTreeMap::new();
        let mut color_counts: BTreeMap<(u8, u8, u8), (usize, Color)> = BTreeMap::new();

        for span in spans {
            *font_counts.entry(span.font.clone()).or_insert(0) += 1;
            *size_counts.entry(size_key(span.size)).or_insert(0) += 1;
            let color = span.effective_color();
            let entry = color_counts.entry(color.to_rgb8()).or_insert((0, color));
            entry.0 += 1;
        }

        let main_font = font_counts
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(font, _)| font.clone())?;
        let main_size = size_counts
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(key, _)| *key as f64 / 10.0)?;
        let main_color = color_counts
            .values()
            .max_by_key(|(count, _)| *count)
            .map(|(_, color)| *color)?;

        Some(Self {
            main_font,
            main_size,
            main_color,
            font_counts,
            size_counts,
        })
    }
}
