//! Annotation-suspect scoring for text spans.
//!
//! Each span is compared against the page's [`TextProfile`]; deviations in
//! font, size, color, and position accumulate a score, and spans at or above
//! the threshold are reported with the reasons that fired.

use std::fmt;

use crate::profile::TextProfile;
use crate::span::TextSpan;

/// A reason a span was flagged as a potential annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SuspectReason {
    /// Font differs from the page's dominant font.
    DifferentFont,
    /// Size differs from the dominant size by more than 2 pt.
    DifferentSize,
    /// Fill color differs from the dominant color.
    DifferentColor,
    /// Centered inside the outer 10% margin band of the page.
    InMargin,
    /// Shorter than 50 characters.
    ShortText,
    /// More than 3 pt smaller than the dominant size.
    SmallerText,
    /// More than 5 pt larger than the dominant size.
    LargerText,
}

impl SuspectReason {
    /// Score contribution of this reason.
    pub fn weight(&self) -> u32 {
        match self {
            SuspectReason::DifferentFont => 2,
            SuspectReason::DifferentSize => 2,
            SuspectReason::DifferentColor => 3,
            SuspectReason::InMargin => 2,
            SuspectReason::ShortText => 1,
            SuspectReason::SmallerText => 1,
            SuspectReason::LargerText => 1,
        }
    }
}

impl fmt::Display for SuspectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SuspectReason::DifferentFont => "different font",
            SuspectReason::DifferentSize => "different size",
            SuspectReason::DifferentColor => "different color",
            SuspectReason::InMargin => "in margin",
            SuspectReason::ShortText => "short text",
            SuspectReason::SmallerText => "smaller text",
            SuspectReason::LargerText => "larger text",
        };
        f.write_str(label)
    }
}

/// A span flagged as a potential annotation, with its score and reasons.
#[derive(Debug, Clone, PartialEq)]
pub struct SuspectSpan {
    /// The flagged span.
    pub span: TextSpan,
    /// Accumulated score.
    pub score: u32,
    /// Reasons that contributed to the score, in evaluation order.
    pub reasons: Vec<SuspectReason>,
    /// Whether the span sits in a page margin band.
    pub in_margin: bool,
}

/// Score every span against the page profile and return those reaching
/// `min_score`.
///
/// `page_width` and `page_height` are the page dimensions in points; the
/// margin test looks at the span's center against the outer 10% band on
/// each edge.
pub fn score_spans(
    spans: &[TextSpan],
    profile: &TextProfile,
    page_width: f64,
    page_height: f64,
    min_score: u32,
) -> Vec<SuspectSpan> {
    let mut suspects = Vec::new();

    for span in spans {
        if span.text.trim().is_empty() {
            continue;
        }

        let mut reasons = Vec::new();

        if span.font != profile.main_font {
            reasons.push(SuspectReason::DifferentFont);
        }
        if (span.size - profile.main_size).abs() > 2.0 {
            reasons.push(SuspectReason::DifferentSize);
        }
        if span.effective_color().to_rgb8() != profile.main_color.to_rgb8() {
            reasons.push(SuspectReason::DifferentColor);
        }

        let (cx, cy) = span.bbox.center();
        let in_margin = cx < page_width * 0.1
            || cx > page_width * 0.9
            || cy < page_height * 0.1
            || cy > page_height * 0.9;
        if in_margin {
            reasons.push(SuspectReason::InMargin);
        }

        if span.text.chars().count() < 50 {
            reasons.push(SuspectReason::ShortText);
        }
        if span.size < profile.main_size - 3.0 {
            reasons.push(SuspectReason::SmallerText);
        } else if span.size > profile.main_size + 5.0 {
            reasons.push(SuspectReason::LargerText);
        }

        let score: u32 = reasons.iter().map(SuspectReason::weight).sum();
        if score >= min_score {
            suspects.push(SuspectSpan {
                span: span.clone(),
                score,
                reasons,
                in_margin,
            });
        }
    }

    suspects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use crate::geometry::Rect;

    const PAGE_W: f64 = 595.0;
    const PAGE_H: f64 = 842.0;

    fn body_span(text: &str) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            font: "Helvetica".to_string(),
            size: 12.0,
            color: None,
            // Centered on the page, well clear of the margin bands.
            bbox: Rect::new(250.0, 400.0, 350.0, 412.0),
        }
    }

    fn profile_for(spans: &[TextSpan]) -> TextProfile {
        TextProfile::from_spans(spans).unwrap()
    }

    #[test]
    fn body_text_below_threshold() {
        // A long, profile-matching span only earns points for nothing:
        // 50+ chars, dominant font/size/color, center of page.
        let long = "x".repeat(60);
        let spans = vec![body_span(&long), body_span(&long)];
        let profile = profile_for(&spans);
        let suspects = score_spans(&spans, &profile, PAGE_W, PAGE_H, 3);
        assert!(suspects.is_empty());
    }

    #[test]
    fn different_color_and_short_text_reaches_threshold() {
        let long = "x".repeat(60);
        let mut marked = body_span("note!");
        marked.color = Some(Color::red());
        let spans = vec![body_span(&long), body_span(&long), marked];
        let profile = profile_for(&spans);
        let suspects = score_spans(&spans, &profile, PAGE_W, PAGE_H, 3);
        assert_eq!(suspects.len(), 1);
        // different color (3) + short text (1)
        assert_eq!(suspects[0].score, 4);
        assert!(suspects[0].reasons.contains(&SuspectReason::DifferentColor));
        assert!(suspects[0].reasons.contains(&SuspectReason::ShortText));
    }

    #[test]
    fn margin_span_is_flagged() {
        let long = "x".repeat(60);
        let mut margin = body_span(&long);
        margin.bbox = Rect::new(2.0, 400.0, 40.0, 412.0);
        let spans = vec![body_span(&long), body_span(&long), margin];
        let profile = profile_for(&spans);
        let suspects = score_spans(&spans, &profile, PAGE_W, PAGE_H, 2);
        assert_eq!(suspects.len(), 1);
        assert!(suspects[0].in_margin);
        assert_eq!(suspects[0].reasons, vec![SuspectReason::InMargin]);
    }

    #[test]
    fn smaller_and_larger_text_are_exclusive() {
        let long = "x".repeat(60);
        let mut small = body_span(&long);
        small.size = 8.0;
        let mut large = body_span(&long);
        large.size = 18.0;
        let spans = vec![body_span(&long), body_span(&long), small, large];
        let profile = profile_for(&spans);
        let suspects = score_spans(&spans, &profile, PAGE_W, PAGE_H, 3);
        assert_eq!(suspects.len(), 2);
        // 8pt: different size (2) + smaller text (1)
        assert!(suspects[0].reasons.contains(&SuspectReason::SmallerText));
        assert!(!suspects[0].reasons.contains(&SuspectReason::LargerText));
        // 18pt: different size (2) + larger text (1)
        assert!(suspects[1].reasons.contains(&SuspectReason::LargerText));
        assert!(!suspects[1].reasons.contains(&SuspectReason::SmallerText));
    }

    #[test]
    fn whitespace_spans_are_ignored() {
        let long = "x".repeat(60);
        let mut blank = body_span("   ");
        blank.color = Some(Color::red());
        let spans = vec![body_span(&long), blank];
        let profile = profile_for(&spans);
        let suspects = score_spans(&spans, &profile, PAGE_W, PAGE_H, 1);
        assert!(suspects.is_empty());
    }

    #[test]
    fn min_score_raises_the_bar() {
        let long = "x".repeat(60);
        let mut courier = body_span(&long);
        courier.font = "Courier".to_string();
        let spans = vec![body_span(&long), body_span(&long), courier];
        let profile = profile_for(&spans);
        // different font alone scores 2
        assert_eq!(score_spans(&spans, &profile, PAGE_W, PAGE_H, 2).len(), 1);
        assert!(score_spans(&spans, &profile, PAGE_W, PAGE_H, 3).is_empty());
    }
}
