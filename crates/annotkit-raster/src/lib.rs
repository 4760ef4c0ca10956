//! annotkit-raster: structural page rasterizer.
//!
//! Renders a page's content objects — text spans, painted subpaths, image
//! placements — as filled and stroked boxes on a white canvas. This is not
//! a glyph-accurate PDF renderer: it exists so that two renders of "the
//! same" page can be pixel-diffed to surface content that only one of them
//! has (the flattened-annotation detector's job). Content objects are
//! exactly what flattening turns annotations into, so box-level geometry
//! is the signal, and glyph shapes would only add noise to the diff.

use annotkit::{PageContent, PdfFile};
use annotkit_core::{AnnotError, Color, GrayImage};
use tiny_skia::{IntSize, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Output resolution in dots per inch. PDF user space is 72 per inch.
    pub dpi: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { dpi: 150.0 }
    }
}

impl RenderOptions {
    /// Device pixels per PDF point.
    pub fn scale(&self) -> f64 {
        self.dpi / 72.0
    }
}

/// Gray value used for image placements, which carry no single color.
const IMAGE_GRAY: u8 = 128;

/// Render a page to a pixmap at the requested resolution.
pub fn render_page(
    pdf: &PdfFile,
    index: usize,
    options: &RenderOptions,
) -> Result<Pixmap, AnnotError> {
    let (page_w, page_h) = pdf.page_size(index)?;
    let content = pdf.page_content(index)?;

    let scale = options.scale();
    let width = ((page_w * scale).ceil() as u32).max(1);
    let height = ((page_h * scale).ceil() as u32).max(1);
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        AnnotError::Other(format!("cannot allocate {width}x{height} render target"))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    draw_content(&mut pixmap, &content, page_h, scale);
    Ok(pixmap)
}

/// Map a PDF user-space rect to device-space (left, top, right, bottom),
/// flipping y.
fn device_box(rect: &annotkit_core::Rect, page_h: f64, scale: f64) -> (f32, f32, f32, f32) {
    let r = rect.normalized();
    (
        (r.x0 * scale) as f32,
        ((page_h - r.y1) * scale) as f32,
        (r.x1 * scale) as f32,
        ((page_h - r.y0) * scale) as f32,
    )
}

fn solid_paint(color: Color) -> Paint<'static> {
    let (r, g, b) = color.to_rgb8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = false;
    paint
}

fn fill_box(pixmap: &mut Pixmap, l: f32, t: f32, r: f32, b: f32, color: Color) {
    // Degenerate boxes still deserve a mark one device pixel wide.
    let r = r.max(l + 0.5);
    let b = b.max(t + 0.5);
    if let Some(rect) = tiny_skia::Rect::from_ltrb(l, t, r, b) {
        let _ = pixmap.fill_rect(rect, &solid_paint(color), Transform::identity(), None);
    }
}

fn stroke_box(pixmap: &mut Pixmap, l: f32, t: f32, r: f32, b: f32, color: Color, width: f32) {
    let mut pb = PathBuilder::new();
    pb.move_to(l, t);
    pb.line_to(r, t);
    pb.line_to(r, b);
    pb.line_to(l, b);
    pb.close();
    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width: width.max(1.0),
            ..Stroke::default()
        };
        let _ = pixmap.stroke_path(&path, &solid_paint(color), &stroke, Transform::identity(), None);
    }
}

fn draw_content(pixmap: &mut Pixmap, content: &PageContent, page_h: f64, scale: f64) {
    for image in &content.images {
        let (l, t, r, b) = device_box(&image.bbox, page_h, scale);
        fill_box(pixmap, l, t, r, b, Color::gray(IMAGE_GRAY as f64 / 255.0));
    }

    for path in &content.paths {
        let (l, t, r, b) = device_box(&path.bbox, page_h, scale);
        if path.fill {
            fill_box(pixmap, l, t, r, b, path.fill_color);
        }
        if path.stroke {
            let width = (path.line_width * scale) as f32;
            stroke_box(pixmap, l, t, r, b, path.stroke_color, width);
        }
    }

    for span in &content.spans {
        let (l, t, r, b) = device_box(&span.bbox, page_h, scale);
        fill_box(pixmap, l, t, r, b, span.effective_color());
    }
}

/// Collapse a pixmap to a grayscale buffer (ITU-R BT.601 luma).
pub fn pixmap_to_gray(pixmap: &Pixmap) -> GrayImage {
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let pixels = pixmap
        .pixels()
        .iter()
        .map(|p| {
            let c = p.demultiply();
            let luma =
                0.299 * c.red() as f64 + 0.587 * c.green() as f64 + 0.114 * c.blue() as f64;
            luma.round().clamp(0.0, 255.0) as u8
        })
        .collect();
    GrayImage {
        width,
        height,
        pixels,
    }
}

/// Expand a grayscale buffer back into a pixmap, for saving analysis
/// images as PNG.
pub fn gray_to_pixmap(image: &GrayImage) -> Option<Pixmap> {
    let mut data = Vec::with_capacity(image.pixels.len() * 4);
    for &v in &image.pixels {
        data.extend_from_slice(&[v, v, v, 255]);
    }
    let size = IntSize::from_wh(image.width as u32, image.height as u32)?;
    Pixmap::from_vec(data, size)
}
