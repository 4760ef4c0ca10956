use std::collections::BTreeMap;
use std::path::Path;

use annotkit::{Annotation, PdfFile};

use crate::cli::OutputFormat;
use crate::shared::{open_pdf, resolve_pages};

pub fn run(file: &Path, pages: Option<&str>, format: &OutputFormat) -> Result<(), i32> {
    let pdf = open_pdf(file)?;
    let page_indices = resolve_pages(pages, pdf.page_count())?;

    match format {
        OutputFormat::Text => write_text(file, &pdf, &page_indices),
        OutputFormat::Json => write_json(&pdf, &page_indices),
    }
}

fn annotation_status(annot: &Annotation) -> &'static str {
    if annot.is_highlight() {
        "EXCLUDED by copy (highlight)"
    } else {
        "INCLUDED by copy (not a highlight)"
    }
}

fn write_text(file: &Path, pdf: &PdfFile, page_indices: &[usize]) -> Result<(), i32> {
    println!("PDF: {}", file.display());
    println!("Total pages: {}", pdf.page_count());
    println!("{}", "-".repeat(50));

    let mut total = 0usize;
    let mut type_counts: BTreeMap<String, usize> = BTreeMap::new();

    for &idx in page_indices {
        let annots = pdf.page_annotations(idx).map_err(|e| {
            eprintln!("Error reading page {}: {e}", idx + 1);
            1
        })?;

        println!();
        println!("Page {}:", idx + 1);
        if annots.is_empty() {
            println!("  No annotations found on this page");
            continue;
        }

        for annot in &annots {
            let r = &annot.rect;
            println!(
                "  {} at ({:.1}, {:.1})-({:.1}, {:.1}), size {:.1} x {:.1}",
                annot.raw_subtype,
                r.x0,
                r.y0,
                r.x1,
                r.y1,
                r.width(),
                r.height()
            );
            match annot.contents.as_deref() {
                Some(contents) if !contents.is_empty() => {
                    println!("    Contents: '{contents}'");
                }
                _ => println!("    Contents: (empty)"),
            }
            if let Some(ref author) = annot.author {
                println!("    Author: {author}");
            }
            println!("    -> {}", annotation_status(annot));

            *type_counts.entry(annot.raw_subtype.clone()).or_insert(0) += 1;
            total += 1;
        }
        println!("  Page {} total: {} annotations", idx + 1, annots.len());
    }

    let highlights = type_counts
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case("highlight"))
        .map(|(_, count)| count)
        .sum::<usize>();

    println!();
    println!("{}", "-".repeat(50));
    println!("SUMMARY:");
    println!("Total annotations found: {total}");
    println!("Non-highlight annotations: {}", total - highlights);

    if type_counts.is_empty() {
        println!("No annotations detected in entire PDF!");
        println!();
        println!("Possible reasons:");
        println!("1. The shapes/text were drawn into the page content, not added as annotations");
        println!("2. They were added as form fields, not annotations");
        println!("3. The viewer renders them but they are not stored as annotations");
        println!("4. The annotations use a structure this tool does not recognize");
    } else {
        println!("Annotation types found:");
        for (name, count) in &type_counts {
            let status = if name.eq_ignore_ascii_case("highlight") {
                "EXCLUDED"
            } else {
                "INCLUDED"
            };
            println!("  {name}: {count} ({status})");
        }
    }

    Ok(())
}

fn annot_to_json(annot: &Annotation, page_num: usize) -> serde_json::Value {
    serde_json::json!({
        "page": page_num,
        "type": annot.raw_subtype,
        "x0": annot.rect.x0,
        "y0": annot.rect.y0,
        "x1": annot.rect.x1,
        "y1": annot.rect.y1,
        "width": annot.rect.width(),
        "height": annot.rect.height(),
        "contents": annot.contents,
        "author": annot.author,
        "subject": annot.subject,
        "included": !annot.is_highlight(),
    })
}

fn write_json(pdf: &PdfFile, page_indices: &[usize]) -> Result<(), i32> {
    let mut all_annots = Vec::new();

    for &idx in page_indices {
        let annots = pdf.page_annotations(idx).map_err(|e| {
            eprintln!("Error reading page {}: {e}", idx + 1);
            1
        })?;
        for annot in &annots {
            all_annots.push(annot_to_json(annot, idx + 1));
        }
    }

    let json_str = serde_json::to_string(&all_annots).map_err(|e| {
        eprintln!("Error serializing JSON: {e}");
        1
    })?;
    println!("{json_str}");
    Ok(())
}
