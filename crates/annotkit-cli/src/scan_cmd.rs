use std::collections::BTreeMap;
use std::path::Path;

use annotkit_core::{SuspectSpan, TextProfile, score_spans};

use crate::cli::OutputFormat;
use crate::shared::{ProgressReporter, color_hex, open_pdf, resolve_pages};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    min_score: u32,
    format: &OutputFormat,
) -> Result<(), i32> {
    let pdf = open_pdf(file)?;
    let page_indices = resolve_pages(pages, pdf.page_count())?;
    let text_mode = matches!(format, OutputFormat::Text);

    if text_mode {
        println!(
            "Analyzing {} pages for potential annotation text...",
            page_indices.len()
        );
    }

    let progress = ProgressReporter::new(page_indices.len());
    let mut all_suspects: Vec<(usize, SuspectSpan)> = Vec::new();

    for (i, &idx) in page_indices.iter().enumerate() {
        progress.report(i + 1);

        let spans = pdf.page_text_spans(idx).map_err(|e| {
            progress.finish();
            eprintln!("Error reading page {}: {e}", idx + 1);
            1
        })?;
        let (width, height) = pdf.page_size(idx).map_err(|e| {
            progress.finish();
            eprintln!("Error reading page {}: {e}", idx + 1);
            1
        })?;

        if text_mode {
            println!();
            println!("Page {}:", idx + 1);
        }

        let Some(profile) = TextProfile::from_spans(&spans) else {
            if text_mode {
                println!("  No text on this page");
            }
            continue;
        };

        if text_mode {
            println!("  Main document characteristics:");
            println!("    Font: {}", profile.main_font);
            println!("    Size: {}", profile.main_size);
            println!("    Color: {}", color_hex(&profile.main_color));
        }

        let suspects = score_spans(&spans, &profile, width, height, min_score);
        if text_mode {
            if suspects.is_empty() {
                println!("  No potential annotation text found");
            } else {
                println!("  Found {} potential annotation texts:", suspects.len());
                for (n, suspect) in suspects.iter().enumerate() {
                    let span = &suspect.span;
                    let reasons: Vec<String> =
                        suspect.reasons.iter().map(|r| r.to_string()).collect();
                    println!("    {}. \"{}\"", n + 1, span.preview(50));
                    println!(
                        "       Position: ({:.0}, {:.0}) to ({:.0}, {:.0})",
                        span.bbox.x0, span.bbox.y0, span.bbox.x1, span.bbox.y1
                    );
                    println!(
                        "       Font: {} | Size: {} | Color: {}",
                        span.font,
                        span.size,
                        color_hex(&span.effective_color())
                    );
                    println!(
                        "       Score: {} | Reasons: {}",
                        suspect.score,
                        reasons.join(", ")
                    );
                }
            }
        }

        all_suspects.extend(suspects.into_iter().map(|s| (idx, s)));
    }
    progress.finish();

    match format {
        OutputFormat::Text => {
            println!();
            println!(
                "SUMMARY: Found {} potential annotation texts",
                all_suspects.len()
            );
            if !all_suspects.is_empty() {
                let mut fonts: BTreeMap<String, usize> = BTreeMap::new();
                let mut sizes: BTreeMap<String, usize> = BTreeMap::new();
                for (_, suspect) in &all_suspects {
                    *fonts.entry(suspect.span.font.clone()).or_insert(0) += 1;
                    *sizes
                        .entry(format!("{}", suspect.span.size))
                        .or_insert(0) += 1;
                }
                println!();
                println!("Most common annotation characteristics:");
                println!("  Fonts: {}", counts_line(&fonts));
                println!("  Sizes: {}", counts_line(&sizes));
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = all_suspects
                .iter()
                .map(|(idx, suspect)| {
                    let span = &suspect.span;
                    let reasons: Vec<String> =
                        suspect.reasons.iter().map(|r| r.to_string()).collect();
                    serde_json::json!({
                        "page": idx + 1,
                        "text": span.text,
                        "font": span.font,
                        "size": span.size,
                        "color": color_hex(&span.effective_color()),
                        "x0": span.bbox.x0,
                        "y0": span.bbox.y0,
                        "x1": span.bbox.x1,
                        "y1": span.bbox.y1,
                        "score": suspect.score,
                        "reasons": reasons,
                        "in_margin": suspect.in_margin,
                    })
                })
                .collect();
            let json_str = serde_json::to_string(&entries).map_err(|e| {
                eprintln!("Error serializing JSON: {e}");
                1
            })?;
            println!("{json_str}");
        }
    }

    Ok(())
}

fn counts_line(counts: &BTreeMap<String, usize>) -> String {
    counts
        .iter()
        .map(|(key, count)| format!("{key}: {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}
