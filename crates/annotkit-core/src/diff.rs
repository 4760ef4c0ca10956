//! Visual differencing between two page renders.
//!
//! Operates on plain grayscale buffers so the analysis stays independent of
//! the rasterizer: absolute per-pixel difference, binary thresholding, and
//! 8-connected region labeling with aspect-ratio classification.

use std::collections::VecDeque;
use std::fmt;

use crate::geometry::PixelBox;

/// A grayscale image buffer, row-major, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl GrayImage {
    /// Create a black image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Create an image from an existing buffer.
    ///
    /// Returns `None` when the buffer length does not match the dimensions.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Pixel value at (x, y). Out-of-bounds reads return 0.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            0
        }
    }

    /// Set the pixel value at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = value;
        }
    }
}

/// Absolute per-pixel difference over the overlapping region of two images.
///
/// The result has the dimensions of the overlap (`min` of each axis), so
/// renders of slightly different page sizes compare over their common area.
pub fn absolute_diff(a: &GrayImage, b: &GrayImage) -> GrayImage {
    let width = a.width.min(b.width);
    let height = a.height.min(b.height);
    let mut out = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let d = a.get(x, y).abs_diff(b.get(x, y));
            out.set(x, y, d);
        }
    }
    out
}

/// Threshold a difference image into a binary mask (0 or 255).
pub fn threshold_mask(diff: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = GrayImage::new(diff.width, diff.height);
    for (i, &p) in diff.pixels.iter().enumerate() {
        if p > threshold {
            out.pixels[i] = 255;
        }
    }
    out
}

/// Shape classification of a difference region by aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionKind {
    /// Very elongated region (ratio > 5 or < 0.2).
    LineOrArrow,
    /// Near-square region (ratio 0.8 to 1.2).
    SquareOrCircle,
    /// Wide region (ratio > 2).
    TextOrRectangle,
    /// Anything else.
    Shape,
}

impl RegionKind {
    /// Classify a width-to-height ratio. The checks are ordered: elongation
    /// wins over squareness, squareness over wideness.
    pub fn classify(aspect_ratio: f64) -> Self {
        if aspect_ratio > 5.0 || aspect_ratio < 0.2 {
            RegionKind::LineOrArrow
        } else if (0.8..=1.2).contains(&aspect_ratio) {
            RegionKind::SquareOrCircle
        } else if aspect_ratio > 2.0 {
            RegionKind::TextOrRectangle
        } else {
            RegionKind::Shape
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            RegionKind::LineOrArrow => "line/arrow",
            RegionKind::SquareOrCircle => "square/circle",
            RegionKind::TextOrRectangle => "text/rectangle",
            RegionKind::Shape => "rectangle/shape",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A connected region of changed pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRegion {
    /// Bounding box in pixel coordinates.
    pub bounds: PixelBox,
    /// Number of changed pixels in the region.
    pub area: usize,
    /// Shape classification from the bounding-box aspect ratio.
    pub kind: RegionKind,
}

/// Label 8-connected regions of set pixels in a binary mask and return
/// those with at least `min_area` pixels, ordered top-to-bottom then
/// left-to-right by bounding-box origin.
pub fn find_regions(mask: &GrayImage, min_area: usize) -> Vec<DiffRegion> {
    let mut visited = vec![false; mask.pixels.len()];
    let mut regions = Vec::new();

    for start_y in 0..mask.height {
        for start_x in 0..mask.width {
            let start_idx = start_y * mask.width + start_x;
            if visited[start_idx] || mask.pixels[start_idx] == 0 {
                continue;
            }

            // Flood-fill one component, tracking its extent and pixel count.
            let mut queue = VecDeque::new();
            queue.push_back((start_x, start_y));
            visited[start_idx] = true;

            let (mut min_x, mut min_y) = (start_x, start_y);
            let (mut max_x, mut max_y) = (start_x, start_y);
            let mut area = 0usize;

            while let Some((x, y)) = queue.pop_front() {
                area += 1;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);

                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x as i64 + dx;
                        let ny = y as i64 + dy;
                        if nx < 0 || ny < 0 || nx as usize >= mask.width || ny as usize >= mask.height
                        {
                            continue;
                        }
                        let (nx, ny) = (nx as usize, ny as usize);
                        let idx = ny * mask.width + nx;
                        if !visited[idx] && mask.pixels[idx] != 0 {
                            visited[idx] = true;
                            queue.push_back((nx, ny));
                        }
                    }
                }
            }

            if area < min_area {
                continue;
            }

            let bounds = PixelBox::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1);
            regions.push(DiffRegion {
                bounds,
                area,
                kind: RegionKind::classify(bounds.aspect_ratio()),
            });
        }
    }

    regions.sort_by_key(|r| (r.bounds.y, r.bounds.x));
    regions
}
