//! Content-stream scanning into text spans and painted-object geometry.
//!
//! A deliberately small interpreter: it tracks the graphics state (CTM,
//! colors, line width) and text state (matrices, font, size, leading) far
//! enough to place every shown string, painted subpath, and image XObject
//! on the page as a bounding box. Glyph metrics are estimated, not
//! measured; the consumers are heuristics and structural rasterization,
//! not typography.

use annotkit_core::{AnnotError, Color, Rect, TextSpan};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object};

use crate::document::PdfFile;
use crate::value::{decode_string, number, pdf_err};

/// Nested Form XObjects deeper than this are ignored.
const MAX_FORM_DEPTH: usize = 8;

/// Width of a glyph as a fraction of the font size, used to estimate span
/// extents without font metrics.
const GLYPH_WIDTH_FACTOR: f64 = 0.5;

/// A painted subpath reduced to its device-space bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintedBox {
    /// Bounding box in PDF user space (bottom-left origin).
    pub bbox: Rect,
    /// Whether the path was stroked.
    pub stroke: bool,
    /// Whether the path was filled.
    pub fill: bool,
    /// Stroking color at paint time.
    pub stroke_color: Color,
    /// Non-stroking color at paint time.
    pub fill_color: Color,
    /// Line width at paint time (user-space units).
    pub line_width: f64,
}

/// An image XObject placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBox {
    /// Resource name of the XObject (e.g. "Im0").
    pub name: String,
    /// Unit image square mapped through the CTM.
    pub bbox: Rect,
}

/// Everything the scanner collects from one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    pub spans: Vec<TextSpan>,
    pub paths: Vec<PaintedBox>,
    pub images: Vec<ImageBox>,
}

/// 2x3 affine matrix `[a b c d e f]`, PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f64; 6]);

impl Matrix {
    fn identity() -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0])
    }

    fn translation(tx: f64, ty: f64) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// `self` applied first, then `other` (`self × other`).
    fn then(&self, other: &Matrix) -> Matrix {
        let a = self.0;
        let b = other.0;
        Matrix([
            a[0] * b[0] + a[1] * b[2],
            a[0] * b[1] + a[1] * b[3],
            a[2] * b[0] + a[3] * b[2],
            a[2] * b[1] + a[3] * b[3],
            a[4] * b[0] + a[5] * b[2] + b[4],
            a[4] * b[1] + a[5] * b[3] + b[5],
        ])
    }

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let m = self.0;
        (m[0] * x + m[2] * y + m[4], m[1] * x + m[3] * y + m[5])
    }

    /// Scale along the device y axis, used to size transformed text.
    fn vertical_scale(&self) -> f64 {
        let m = self.0;
        (m[1] * m[1] + m[3] * m[3]).sqrt()
    }
}

#[derive(Debug, Clone, Copy)]
struct GraphicsState {
    ctm: Matrix,
    stroke_color: Color,
    fill_color: Color,
    line_width: f64,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Matrix::identity(),
            stroke_color: Color::black(),
            fill_color: Color::black(),
            line_width: 1.0,
        }
    }
}

/// Strip a subset-tag prefix like "ABCDEF+" from a BaseFont name.
fn strip_subset_prefix(name: &str) -> &str {
    match name.split_once('+') {
        Some((prefix, rest))
            if prefix.len() == 6 && prefix.bytes().all(|b| b.is_ascii_uppercase()) =>
        {
            rest
        }
        _ => name,
    }
}

/// Resolve one level of indirection.
fn deref<'a>(obj: &'a Object, doc: &'a Document) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        other => other,
    }
}

struct Scanner<'a> {
    doc: &'a Document,
    gs: GraphicsState,
    gs_stack: Vec<GraphicsState>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    leading: f64,
    font_name: String,
    font_size: f64,
    path_points: Vec<(f64, f64)>,
    out: PageContent,
}

impl<'a> Scanner<'a> {
    fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            gs: GraphicsState::default(),
            gs_stack: Vec::new(),
            text_matrix: Matrix::identity(),
            line_matrix: Matrix::identity(),
            leading: 0.0,
            font_name: String::new(),
            font_size: 12.0,
            path_points: Vec::new(),
            out: PageContent::default(),
        }
    }

    fn walk(&mut self, content: &Content, resources: Option<&Dictionary>, depth: usize) {
        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "q" => self.gs_stack.push(self.gs),
                "Q" => {
                    if let Some(saved) = self.gs_stack.pop() {
                        self.gs = saved;
                    }
                }
                "cm" => {
                    if let Some(m) = matrix_operands(operands) {
                        self.gs.ctm = m.then(&self.gs.ctm);
                    }
                }
                "w" => {
                    if let Some(w) = operands.first().and_then(number) {
                        self.gs.line_width = w;
                    }
                }
                "g" => {
                    if let Some(level) = operands.first().and_then(number) {
                        self.gs.fill_color = Color::gray(level);
                    }
                }
                "G" => {
                    if let Some(level) = operands.first().and_then(number) {
                        self.gs.stroke_color = Color::gray(level);
                    }
                }
                "rg" => {
                    if let Some(c) = rgb_operands(operands) {
                        self.gs.fill_color = c;
                    }
                }
                "RG" => {
                    if let Some(c) = rgb_operands(operands) {
                        self.gs.stroke_color = c;
                    }
                }
                "k" => {
                    if let Some(c) = cmyk_operands(operands) {
                        self.gs.fill_color = c;
                    }
                }
                "K" => {
                    if let Some(c) = cmyk_operands(operands) {
                        self.gs.stroke_color = c;
                    }
                }
                "sc" | "scn" => {
                    if let Some(c) = component_color(operands) {
                        self.gs.fill_color = c;
                    }
                }
                "SC" | "SCN" => {
                    if let Some(c) = component_color(operands) {
                        self.gs.stroke_color = c;
                    }
                }

                // Path construction, in user space; transformed at paint time.
                "m" | "l" => {
                    if let (Some(x), Some(y)) = (
                        operands.first().and_then(number),
                        operands.get(1).and_then(number),
                    ) {
                        self.path_points.push((x, y));
                    }
                }
                "c" | "v" | "y" => {
                    let coords: Vec<f64> = operands.iter().filter_map(number).collect();
                    for pair in coords.chunks_exact(2) {
                        self.path_points.push((pair[0], pair[1]));
                    }
                }
                "re" => {
                    let coords: Vec<f64> = operands.iter().filter_map(number).collect();
                    if let [x, y, w, h] = coords.as_slice() {
                        self.path_points.push((*x, *y));
                        self.path_points.push((x + w, *y));
                        self.path_points.push((x + w, y + h));
                        self.path_points.push((*x, y + h));
                    }
                }
                "S" | "s" => self.paint_path(true, false),
                "f" | "F" | "f*" => self.paint_path(false, true),
                "B" | "B*" | "b" | "b*" => self.paint_path(true, true),
                "n" => self.path_points.clear(),

                // Text state and showing.
                "BT" => {
                    self.text_matrix = Matrix::identity();
                    self.line_matrix = Matrix::identity();
                }
                "ET" => {}
                "Tf" => {
                    if let Some(key) = operands.first().and_then(|o| o.as_name().ok()) {
                        self.font_name = resolve_font_name(self.doc, resources, key);
                    }
                    if let Some(size) = operands.get(1).and_then(number) {
                        self.font_size = size;
                    }
                }
                "TL" => {
                    if let Some(l) = operands.first().and_then(number) {
                        self.leading = l;
                    }
                }
                "Td" => {
                    if let (Some(tx), Some(ty)) = (
                        operands.first().and_then(number),
                        operands.get(1).and_then(number),
                    ) {
                        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
                        self.text_matrix = self.line_matrix;
                    }
                }
                "TD" => {
                    if let (Some(tx), Some(ty)) = (
                        operands.first().and_then(number),
                        operands.get(1).and_then(number),
                    ) {
                        self.leading = -ty;
                        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
                        self.text_matrix = self.line_matrix;
                    }
                }
                "Tm" => {
                    if let Some(m) = matrix_operands(operands) {
                        self.text_matrix = m;
                        self.line_matrix = m;
                    }
                }
                "T*" => self.next_line(),
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        let text = decode_string(bytes);
                        self.show_text(&text, 0.0);
                    }
                }
                "'" => {
                    self.next_line();
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        let text = decode_string(bytes);
                        self.show_text(&text, 0.0);
                    }
                }
                "\"" => {
                    self.next_line();
                    if let Some(Object::String(bytes, _)) = operands.get(2) {
                        let text = decode_string(bytes);
                        self.show_text(&text, 0.0);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(elements)) = operands.first() {
                        let mut text = String::new();
                        let mut kerning = 0.0;
                        for element in elements {
                            match element {
                                Object::String(bytes, _) => text.push_str(&decode_string(bytes)),
                                other => {
                                    if let Some(adjust) = number(other) {
                                        kerning -= adjust / 1000.0 * self.font_size;
                                    }
                                }
                            }
                        }
                        self.show_text(&text, kerning);
                    }
                }

                "Do" => {
                    if let Some(name) = operands.first().and_then(|o| o.as_name().ok()) {
                        self.run_xobject(name, resources, depth);
                    }
                }
                _ => {}
            }
        }
    }

    fn next_line(&mut self) {
        let ty = if self.leading != 0.0 {
            -self.leading
        } else {
            // No leading set; fall back to a conventional line height.
            -self.font_size * 1.2
        };
        self.line_matrix = Matrix::translation(0.0, ty).then(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn show_text(&mut self, text: &str, kerning: f64) {
        if text.is_empty() {
            return;
        }
        let combined = self.text_matrix.then(&self.gs.ctm);
        let (x, y) = combined.apply(0.0, 0.0);
        let scale = combined.vertical_scale();
        let size = self.font_size * scale;
        let advance =
            text.chars().count() as f64 * self.font_size * GLYPH_WIDTH_FACTOR + kerning;
        let width = advance.max(0.0) * scale;

        if !text.trim().is_empty() {
            self.out.spans.push(TextSpan {
                text: text.to_string(),
                font: self.font_name.clone(),
                size,
                color: Some(self.gs.fill_color),
                bbox: Rect::new(x, y, x + width, y + size),
            });
        }

        self.text_matrix = Matrix::translation(advance.max(0.0), 0.0).then(&self.text_matrix);
    }

    fn paint_path(&mut self, stroke: bool, fill: bool) {
        if self.path_points.is_empty() {
            return;
        }
        let points = std::mem::take(&mut self.path_points);
        let transformed: Vec<(f64, f64)> = points
            .iter()
            .map(|&(x, y)| self.gs.ctm.apply(x, y))
            .collect();
        let mut x0 = f64::INFINITY;
        let mut y0 = f64::INFINITY;
        let mut x1 = f64::NEG_INFINITY;
        let mut y1 = f64::NEG_INFINITY;
        for (x, y) in transformed {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }
        self.out.paths.push(PaintedBox {
            bbox: Rect::new(x0, y0, x1, y1),
            stroke,
            fill,
            stroke_color: self.gs.stroke_color,
            fill_color: self.gs.fill_color,
            line_width: self.gs.line_width,
        });
    }

    fn run_xobject(&mut self, name: &[u8], resources: Option<&Dictionary>, depth: usize) {
        let Some(resources) = resources else { return };
        let Some(xobjects) = resources
            .get(b"XObject")
            .ok()
            .map(|obj| deref(obj, self.doc))
            .and_then(|obj| obj.as_dict().ok())
        else {
            return;
        };
        let Some(stream) = xobjects
            .get(name)
            .ok()
            .map(|obj| deref(obj, self.doc))
            .and_then(|obj| obj.as_stream().ok())
        else {
            return;
        };

        let subtype = stream
            .dict
            .get(b"Subtype")
            .ok()
            .and_then(|o| o.as_name().ok())
            .unwrap_or(b"");

        match subtype {
            b"Image" => {
                let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
                let mut x0 = f64::INFINITY;
                let mut y0 = f64::INFINITY;
                let mut x1 = f64::NEG_INFINITY;
                let mut y1 = f64::NEG_INFINITY;
                for (cx, cy) in corners {
                    let (x, y) = self.gs.ctm.apply(cx, cy);
                    x0 = x0.min(x);
                    y0 = y0.min(y);
                    x1 = x1.max(x);
                    y1 = y1.max(y);
                }
                self.out.images.push(ImageBox {
                    name: String::from_utf8_lossy(name).into_owned(),
                    bbox: Rect::new(x0, y0, x1, y1),
                });
            }
            b"Form" => {
                if depth >= MAX_FORM_DEPTH {
                    return;
                }
                let Ok(bytes) = stream.decompressed_content() else {
                    return;
                };
                let Ok(content) = Content::decode(&bytes) else {
                    return;
                };
                // A form runs in its own graphics context, with its /Matrix
                // prepended to the CTM and its own /Resources when present.
                let saved = self.gs;
                if let Ok(matrix_obj) = stream.dict.get(b"Matrix") {
                    if let Object::Array(values) = deref(matrix_obj, self.doc) {
                        if let Some(m) = matrix_operands(values) {
                            self.gs.ctm = m.then(&self.gs.ctm);
                        }
                    }
                }
                let form_resources = stream
                    .dict
                    .get(b"Resources")
                    .ok()
                    .map(|obj| deref(obj, self.doc))
                    .and_then(|obj| obj.as_dict().ok());
                self.walk(&content, form_resources.or(Some(resources)), depth + 1);
                self.gs = saved;
            }
            _ => {}
        }
    }
}

fn matrix_operands(operands: &[Object]) -> Option<Matrix> {
    let nums: Vec<f64> = operands.iter().filter_map(number).collect();
    match nums.as_slice() {
        [a, b, c, d, e, f] => Some(Matrix([*a, *b, *c, *d, *e, *f])),
        _ => None,
    }
}

fn rgb_operands(operands: &[Object]) -> Option<Color> {
    let nums: Vec<f64> = operands.iter().filter_map(number).collect();
    match nums.as_slice() {
        [r, g, b] => Some(Color::new(*r, *g, *b)),
        _ => None,
    }
}

fn cmyk_operands(operands: &[Object]) -> Option<Color> {
    let nums: Vec<f64> = operands.iter().filter_map(number).collect();
    match nums.as_slice() {
        [c, m, y, k] => Some(Color::new(
            (1.0 - c) * (1.0 - k),
            (1.0 - m) * (1.0 - k),
            (1.0 - y) * (1.0 - k),
        )),
        _ => None,
    }
}

/// sc/scn operands: gray, RGB, or CMYK component counts.
fn component_color(operands: &[Object]) -> Option<Color> {
    let nums: Vec<f64> = operands.iter().filter_map(number).collect();
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

/// BaseFont name for a font resource key, subset prefix stripped; the
/// resource key itself when the font cannot be resolved.
fn resolve_font_name(doc: &Document, resources: Option<&Dictionary>, key: &[u8]) -> String {
    let fallback = || String::from_utf8_lossy(key).into_owned();
    let Some(resources) = resources else {
        return fallback();
    };
    let base = resources
        .get(b"Font")
        .ok()
        .map(|obj| deref(obj, doc))
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|fonts| fonts.get(key).ok())
        .map(|obj| deref(obj, doc))
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|font| font.get(b"BaseFont").ok())
        .and_then(|obj| obj.as_name().ok())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned());
    match base {
        Some(name) => strip_subset_prefix(&name).to_string(),
        None => fallback(),
    }
}

/// Content stream bytes of a page, concatenated and decompressed.
///
/// /Contents may be a single stream reference or an array of them.
fn page_content_bytes(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>, AnnotError> {
    let contents_obj = match page_dict.get(b"Contents") {
        Ok(obj) => obj,
        Err(_) => return Ok(Vec::new()),
    };

    let stream_bytes = |obj: &Object| -> Result<Vec<u8>, AnnotError> {
        let stream = deref(obj, doc)
            .as_stream()
            .map_err(|_| AnnotError::Malformed("/Contents is not a stream".to_string()))?;
        if stream.dict.get(b"Filter").is_ok() {
            stream
                .decompressed_content()
                .map_err(|e| AnnotError::Parse(format!("content stream: {e}")))
        } else {
            Ok(stream.content.clone())
        }
    };

    match contents_obj {
        Object::Array(items) => {
            let mut bytes = Vec::new();
            for item in items {
                let part = stream_bytes(item)?;
                if !bytes.is_empty() {
                    bytes.push(b' ');
                }
                bytes.extend_from_slice(&part);
            }
            Ok(bytes)
        }
        single => stream_bytes(single),
    }
}

impl PdfFile {
    /// Scan a page's content streams into spans, painted boxes, and image
    /// placements.
    pub fn page_content(&self, index: usize) -> Result<PageContent, AnnotError> {
        let page_id = self.page_id(index)?;
        let doc = self.doc();
        let page_dict = doc.get_dictionary(page_id).map_err(pdf_err)?;
        let bytes = page_content_bytes(doc, page_dict)?;
        let content = if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            Content {
                operations: Vec::new(),
            }
        } else {
            Content::decode(&bytes)
                .map_err(|e| AnnotError::Parse(format!("content stream: {e}")))?
        };

        let resources = self.page_resources(index);
        let mut scanner = Scanner::new(doc);
        scanner.walk(&content, resources, 0);
        Ok(scanner.out)
    }

    /// Text spans of a page (convenience over [`PdfFile::page_content`]).
    pub fn page_text_spans(&self, index: usize) -> Result<Vec<TextSpan>, AnnotError> {
        Ok(self.page_content(index)?.spans)
    }

    /// Resources dictionary for a page, handling inheritance via /Parent.
    fn page_resources(&self, index: usize) -> Option<&Dictionary> {
        let page_id = self.page_id(index).ok()?;
        let doc = self.doc();
        let mut dict = doc.get_dictionary(page_id).ok()?;
        for _ in 0..32 {
            if let Ok(obj) = dict.get(b"Resources") {
                return deref(obj, doc).as_dict().ok();
            }
            match dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .ok()
                .and_then(|id| doc.get_dictionary(id).ok())
            {
                Some(parent) => dict = parent,
                None => break,
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::text_page_pdf;

    fn spans_for(content: &str) -> Vec<TextSpan> {
        let pdf = PdfFile::open_bytes(&text_page_pdf(content)).unwrap();
        pdf.page_text_spans(0).unwrap()
    }

    fn content_for(content: &str) -> PageContent {
        let pdf = PdfFile::open_bytes(&text_page_pdf(content)).unwrap();
        pdf.page_content(0).unwrap()
    }

    #[test]
    fn simple_text_becomes_one_span() {
        let spans = spans_for("BT /F1 12 Tf 72 720 Td (Hello) Tj ET");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Hello");
        assert_eq!(spans[0].font, "Helvetica");
        assert_eq!(spans[0].size, 12.0);
        assert!((spans[0].bbox.x0 - 72.0).abs() < 0.01);
        assert!((spans[0].bbox.y0 - 720.0).abs() < 0.01);
    }

    #[test]
    fn fill_color_is_tracked() {
        let spans = spans_for("BT /F1 12 Tf 1 0 0 rg 72 720 Td (Red) Tj ET");
        assert_eq!(spans[0].color, Some(Color::red()));
    }

    #[test]
    fn gray_operator_sets_fill() {
        let spans = spans_for("BT /F1 12 Tf 0.5 g 72 720 Td (Gray) Tj ET");
        assert_eq!(spans[0].color, Some(Color::gray(0.5)));
    }

    #[test]
    fn td_moves_between_lines() {
        let spans = spans_for("BT /F1 12 Tf 72 720 Td (One) Tj 0 -20 Td (Two) Tj ET");
        assert_eq!(spans.len(), 2);
        assert!((spans[0].bbox.y0 - 720.0).abs() < 0.01);
        assert!((spans[1].bbox.y0 - 700.0).abs() < 0.01);
    }

    #[test]
    fn tm_positions_text() {
        let spans = spans_for("BT /F1 10 Tf 1 0 0 1 200 400 Tm (Here) Tj ET");
        assert!((spans[0].bbox.x0 - 200.0).abs() < 0.01);
        assert!((spans[0].bbox.y0 - 400.0).abs() < 0.01);
    }

    #[test]
    fn tm_scale_grows_effective_size() {
        let spans = spans_for("BT /F1 10 Tf 2 0 0 2 50 50 Tm (Big) Tj ET");
        assert!((spans[0].size - 20.0).abs() < 0.01);
    }

    #[test]
    fn tj_array_combines_into_one_span() {
        let spans = spans_for("BT /F1 12 Tf 72 720 Td [(Hel) -50 (lo)] TJ ET");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Hello");
    }

    #[test]
    fn whitespace_only_text_is_dropped() {
        let spans = spans_for("BT /F1 12 Tf 72 720 Td (   ) Tj ET");
        assert!(spans.is_empty());
    }

    #[test]
    fn filled_rect_is_collected() {
        let content = content_for("1 0 0 rg 100 100 50 25 re f");
        assert_eq!(content.paths.len(), 1);
        let p = &content.paths[0];
        assert!(p.fill && !p.stroke);
        assert_eq!(p.fill_color, Color::red());
        assert_eq!(p.bbox, Rect::new(100.0, 100.0, 150.0, 125.0));
    }

    #[test]
    fn stroked_line_is_collected() {
        let content = content_for("0 0 1 RG 3 w 10 10 m 110 60 l S");
        assert_eq!(content.paths.len(), 1);
        let p = &content.paths[0];
        assert!(p.stroke && !p.fill);
        assert_eq!(p.stroke_color, Color::blue());
        assert_eq!(p.line_width, 3.0);
        assert_eq!(p.bbox, Rect::new(10.0, 10.0, 110.0, 60.0));
    }

    #[test]
    fn cm_transforms_path_geometry() {
        let content = content_for("q 2 0 0 2 0 0 cm 10 10 20 20 re f Q");
        assert_eq!(content.paths[0].bbox, Rect::new(20.0, 20.0, 60.0, 60.0));
    }

    #[test]
    fn q_restores_graphics_state() {
        let content = content_for("q 1 0 0 rg Q 0 0 10 10 re f");
        assert_eq!(content.paths[0].fill_color, Color::black());
    }

    #[test]
    fn unpainted_path_is_discarded() {
        let content = content_for("10 10 20 20 re n");
        assert!(content.paths.is_empty());
    }

    #[test]
    fn empty_page_has_no_content() {
        let content = content_for("");
        assert_eq!(content, PageContent::default());
    }

    #[test]
    fn strip_subset_prefix_behavior() {
        assert_eq!(strip_subset_prefix("ABCDEF+Helvetica"), "Helvetica");
        assert_eq!(strip_subset_prefix("Helvetica"), "Helvetica");
        assert_eq!(strip_subset_prefix("Abc+Times"), "Abc+Times");
    }
}
