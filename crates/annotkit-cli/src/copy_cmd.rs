use std::path::Path;

use annotkit::{CollectedAnnotations, collect_annotations, copy_annotations};

use crate::shared::{ProgressReporter, open_pdf, page_list, resolve_pages};

pub fn run(
    source: &Path,
    target: &Path,
    output: &Path,
    pages: Option<&str>,
) -> Result<(), i32> {
    let source_pdf = open_pdf(source)?;
    let page_indices = resolve_pages(pages, source_pdf.page_count())?;

    println!(
        "Extracting non-highlight annotations from: {}",
        source.display()
    );

    let progress = ProgressReporter::new(page_indices.len());
    let mut collected = CollectedAnnotations::default();
    for (i, &page) in page_indices.iter().enumerate() {
        progress.report(i + 1);
        match collect_annotations(&source_pdf, std::slice::from_ref(&page)) {
            Ok(page_collected) => {
                collected.highlights_excluded += page_collected.highlights_excluded;
                collected.by_page.extend(page_collected.by_page);
            }
            Err(e) => {
                progress.finish();
                eprintln!("Error reading page {}: {e}", page + 1);
                return Err(1);
            }
        }
    }
    progress.finish();

    if collected.total() == 0 {
        if pages.is_some() {
            println!(
                "No non-highlight annotations found on pages {}.",
                page_list(&page_indices)
            );
        } else {
            println!("No non-highlight annotations found in source PDF.");
        }
        if collected.highlights_excluded > 0 {
            println!(
                "({} highlight annotations were excluded)",
                collected.highlights_excluded
            );
        }
        return Ok(());
    }

    println!(
        "Found {} annotations on pages: {}",
        collected.total(),
        page_list(&collected.pages())
    );

    let mut target_pdf = open_pdf(target)?;
    println!("Copying annotations to: {}", target.display());

    let summary = copy_annotations(&mut target_pdf, &collected).map_err(|e| {
        eprintln!("Error writing annotations: {e}");
        1
    })?;

    for page in &summary.skipped_pages {
        eprintln!(
            "Warning: source has annotations on page {} but target only has {} pages; skipping.",
            page + 1,
            target_pdf.page_count()
        );
    }
    if summary.failed > 0 {
        eprintln!(
            "Warning: {} annotations could not be attached and were skipped.",
            summary.failed
        );
    }

    target_pdf.save(output).map_err(|e| {
        eprintln!("Error saving output PDF: {e}");
        1
    })?;

    print!(
        "Successfully copied {} annotations to {}",
        summary.copied,
        output.display()
    );
    if collected.highlights_excluded > 0 {
        print!(" ({} highlights excluded)", collected.highlights_excluded);
    }
    println!();

    Ok(())
}
