use std::fs;
use std::path::Path;

use annotkit::PdfFile;
use annotkit_core::{GrayImage, absolute_diff, find_regions, threshold_mask};
use annotkit_raster::{RenderOptions, gray_to_pixmap, pixmap_to_gray, render_page};

use crate::cli::OutputFormat;
use crate::shared::open_pdf;

pub fn run(
    original: &Path,
    annotated: &Path,
    output_dir: &Path,
    dpi: f64,
    threshold: u8,
    min_area: usize,
    format: &OutputFormat,
) -> Result<(), i32> {
    let original_pdf = open_pdf(original)?;
    let annotated_pdf = open_pdf(annotated)?;
    let text_mode = matches!(format, OutputFormat::Text);

    fs::create_dir_all(output_dir).map_err(|e| {
        eprintln!("Error: cannot create output directory {}: {e}", output_dir.display());
        1
    })?;

    let page_count = original_pdf.page_count().min(annotated_pdf.page_count());
    if original_pdf.page_count() != annotated_pdf.page_count() {
        eprintln!(
            "Warning: page counts differ ({} vs {}); comparing the first {page_count} pages.",
            original_pdf.page_count(),
            annotated_pdf.page_count()
        );
    }
    if text_mode {
        println!("Analyzing {page_count} pages...");
    }

    let options = RenderOptions { dpi };
    let mut total_regions = 0usize;
    let mut json_entries: Vec<serde_json::Value> = Vec::new();

    for idx in 0..page_count {
        let render = |pdf: &PdfFile, which: &str| -> Result<GrayImage, i32> {
            render_page(pdf, idx, &options)
                .map(|pixmap| pixmap_to_gray(&pixmap))
                .map_err(|e| {
                    eprintln!("Error rendering {which} page {}: {e}", idx + 1);
                    1
                })
        };
        let gray_a = render(&original_pdf, "original")?;
        let gray_b = render(&annotated_pdf, "annotated")?;

        let diff = absolute_diff(&gray_a, &gray_b);
        let mask = threshold_mask(&diff, threshold);
        let regions = find_regions(&mask, min_area);

        if text_mode {
            println!();
            println!("Page {}:", idx + 1);
        }

        if regions.is_empty() {
            if text_mode {
                println!("  No significant differences found");
            }
            continue;
        }

        if text_mode {
            println!("  Found {} potential annotations:", regions.len());
        }
        for (n, region) in regions.iter().enumerate() {
            let b = &region.bounds;
            if text_mode {
                println!(
                    "    {}. {}: position ({}, {}), size {}x{}, area {}",
                    n + 1,
                    region.kind,
                    b.x,
                    b.y,
                    b.width,
                    b.height,
                    region.area
                );
            } else {
                json_entries.push(serde_json::json!({
                    "page": idx + 1,
                    "kind": region.kind.label(),
                    "x": b.x,
                    "y": b.y,
                    "width": b.width,
                    "height": b.height,
                    "area": region.area,
                    "aspect_ratio": b.aspect_ratio(),
                }));
            }
        }
        total_regions += regions.len();

        let diff_path = output_dir.join(format!("page_{}_differences.png", idx + 1));
        let mask_path = output_dir.join(format!("page_{}_threshold.png", idx + 1));
        save_gray_png(&diff, &diff_path)?;
        save_gray_png(&mask, &mask_path)?;
        if text_mode {
            println!(
                "  Saved analysis images: {}, {}",
                diff_path.display(),
                mask_path.display()
            );
        }
    }

    match format {
        OutputFormat::Text => {
            println!();
            println!(
                "SUMMARY: Found {total_regions} potential annotations across {page_count} pages"
            );
            println!("Analysis images saved in: {}/", output_dir.display());
        }
        OutputFormat::Json => {
            let json_str = serde_json::to_string(&json_entries).map_err(|e| {
                eprintln!("Error serializing JSON: {e}");
                1
            })?;
            println!("{json_str}");
        }
    }

    Ok(())
}

fn save_gray_png(image: &GrayImage, path: &Path) -> Result<(), i32> {
    let pixmap = gray_to_pixmap(image).ok_or_else(|| {
        eprintln!("Error: cannot build image buffer for {}", path.display());
        1
    })?;
    let bytes = pixmap.encode_png().map_err(|e| {
        eprintln!("Error encoding {}: {e}", path.display());
        1
    })?;
    fs::write(path, bytes).map_err(|e| {
        eprintln!("Error writing {}: {e}", path.display());
        1
    })
}
