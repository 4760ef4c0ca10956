use crate::Color;
use crate::geometry::Rect;

/// A run of text shown by a single text-showing operator.
///
/// Span granularity (rather than per-character) is what the annotation-text
/// heuristics consume: one font, one size, one fill color per span.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextSpan {
    /// Decoded text content.
    pub text: String,
    /// Font name (BaseFont where resolvable, resource key otherwise).
    pub font: String,
    /// Font size in points.
    pub size: f64,
    /// Non-stroking (fill) color at the time of showing, if one was set.
    pub color: Option<Color>,
    /// Estimated bounding box in PDF user space (bottom-left origin).
    pub bbox: Rect,
}

impl TextSpan {
    /// Fill color, treating an unset color as black (the PDF default).
    pub fn effective_color(&self) -> Color {
        self.color.unwrap_or_default()
    }

    /// Text truncated for display, with an ellipsis past `max` chars.
    pub fn preview(&self, max: usize) -> String {
        if self.text.chars().count() > max {
            let cut: String = self.text.chars().take(max).collect();
            format!("{cut}...")
        } else {
            self.text.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            font: "Helvetica".to_string(),
            size: 12.0,
            color: None,
            bbox: Rect::new(0.0, 0.0, 10.0, 12.0),
        }
    }

    #[test]
    fn effective_color_defaults_to_black() {
        assert_eq!(span("x").effective_color(), Color::black());
    }

    #[test]
    fn effective_color_uses_set_color() {
        let mut s = span("x");
        s.color = Some(Color::red());
        assert_eq!(s.effective_color(), Color::red());
    }

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(span("hello").preview(50), "hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        let s = span("abcdefghij");
        assert_eq!(s.preview(4), "abcd...");
    }
}
