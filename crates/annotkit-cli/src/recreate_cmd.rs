use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use annotkit::{NewAnnotation, PdfFile};
use serde::{Deserialize, Serialize};

use crate::shared::open_pdf;

/// On-disk batch format: `{"annotations": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct BatchFile {
    annotations: Vec<NewAnnotation>,
}

pub fn run(
    input: &Path,
    output: &Path,
    batch: Option<&Path>,
    export_template: Option<&Path>,
) -> Result<(), i32> {
    let mut pdf = open_pdf(input)?;

    let applied = match batch {
        Some(batch_path) => Some(run_batch(&mut pdf, batch_path)?),
        None => {
            let stdin = io::stdin();
            interactive_session(stdin.lock(), io::stdout(), &mut pdf).map_err(|e| {
                eprintln!("Error: {e}");
                1
            })?
        }
    };

    let Some(applied) = applied else {
        println!("Exiting without saving.");
        return Ok(());
    };

    pdf.save(output).map_err(|e| {
        eprintln!("Error saving output PDF: {e}");
        1
    })?;
    println!(
        "Saved PDF with {} annotations to: {}",
        applied.len(),
        output.display()
    );

    if let Some(template_path) = export_template {
        export_template_file(template_path, &applied)?;
    }

    Ok(())
}

fn run_batch(pdf: &mut PdfFile, batch_path: &Path) -> Result<Vec<NewAnnotation>, i32> {
    let text = fs::read_to_string(batch_path).map_err(|e| {
        eprintln!("Error reading batch file {}: {e}", batch_path.display());
        1
    })?;
    let batch: BatchFile = serde_json::from_str(&text).map_err(|e| {
        eprintln!("Error parsing batch file {}: {e}", batch_path.display());
        1
    })?;

    for annot in &batch.annotations {
        pdf.append_annotation(annot).map_err(|e| {
            eprintln!("Error adding {} on page {}: {e}", annot.kind_label(), annot.page());
            1
        })?;
        println!("Added {} on page {}", annot.kind_label(), annot.page());
    }

    println!("Loaded {} annotations from batch file", batch.annotations.len());
    Ok(batch.annotations)
}

fn export_template_file(path: &Path, annotations: &[NewAnnotation]) -> Result<(), i32> {
    let batch = BatchFile {
        annotations: annotations.to_vec(),
    };
    let json = serde_json::to_string_pretty(&batch).map_err(|e| {
        eprintln!("Error serializing template: {e}");
        1
    })?;
    fs::write(path, json).map_err(|e| {
        eprintln!("Error writing template {}: {e}", path.display());
        1
    })?;
    println!("Exported annotation template to: {}", path.display());
    Ok(())
}

/// Run the interactive menu. Returns the applied annotations, or `None`
/// when the user exits without saving (or input ends).
///
/// Generic over reader/writer so tests can drive the menu with a script.
fn interactive_session<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    pdf: &mut PdfFile,
) -> io::Result<Option<Vec<NewAnnotation>>> {
    writeln!(out, "PDF: {} pages", pdf.page_count())?;
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "INTERACTIVE ANNOTATION RECREATION")?;
    writeln!(out, "{}", "=".repeat(50))?;

    let mut applied = Vec::new();

    loop {
        writeln!(out)?;
        writeln!(out, "Options:")?;
        writeln!(out, "  1. Show page info")?;
        writeln!(out, "  2. Add note (sticky comment)")?;
        writeln!(out, "  3. Add free text (visible text)")?;
        writeln!(out, "  4. Add rectangle")?;
        writeln!(out, "  5. Add arrow")?;
        writeln!(out, "  6. Save and exit")?;
        writeln!(out, "  7. Exit without saving")?;

        let Some(choice) = prompt(&mut input, &mut out, "Choice (1-7): ")? else {
            return Ok(None);
        };

        let outcome = match choice.trim() {
            "1" => show_page_info(&mut input, &mut out, pdf),
            "2" => add_note(&mut input, &mut out, pdf, &mut applied),
            "3" => add_free_text(&mut input, &mut out, pdf, &mut applied),
            "4" => add_rectangle(&mut input, &mut out, pdf, &mut applied),
            "5" => add_arrow(&mut input, &mut out, pdf, &mut applied),
            "6" => return Ok(Some(applied)),
            "7" => return Ok(None),
            other => {
                writeln!(out, "Invalid choice: '{other}'. Please enter 1-7.")?;
                continue;
            }
        };

        match outcome {
            Ok(()) => {}
            Err(MenuError::Io(e)) => return Err(e),
            Err(MenuError::Input(msg)) => writeln!(out, "Invalid input: {msg}")?,
            Err(MenuError::Eof) => return Ok(None),
        }
    }
}

/// Why a single menu action stopped.
enum MenuError {
    Io(io::Error),
    Input(String),
    Eof,
}

impl From<io::Error> for MenuError {
    fn from(e: io::Error) -> Self {
        MenuError::Io(e)
    }
}

/// Print a prompt and read one line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn read_value<R: BufRead, W: Write, T: std::str::FromStr>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> Result<T, MenuError> {
    let Some(line) = prompt(input, out, label)? else {
        return Err(MenuError::Eof);
    };
    line.trim()
        .parse()
        .map_err(|_| MenuError::Input(format!("'{}' is not a valid value", line.trim())))
}

/// Read a value, falling back to `default` on an empty line.
fn read_value_or<R: BufRead, W: Write, T: std::str::FromStr>(
    input: &mut R,
    out: &mut W,
    label: &str,
    default: T,
) -> Result<T, MenuError> {
    let Some(line) = prompt(input, out, label)? else {
        return Err(MenuError::Eof);
    };
    let line = line.trim();
    if line.is_empty() {
        return Ok(default);
    }
    line.parse()
        .map_err(|_| MenuError::Input(format!("'{line}' is not a valid value")))
}

fn read_text<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> Result<String, MenuError> {
    match prompt(input, out, label)? {
        Some(line) => Ok(line),
        None => Err(MenuError::Eof),
    }
}

fn show_page_info<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    pdf: &PdfFile,
) -> Result<(), MenuError> {
    let page: usize = read_value(input, out, "Page number (1-based): ")?;
    if page == 0 || page > pdf.page_count() {
        return Err(MenuError::Input(format!(
            "page {page} does not exist (PDF has {} pages)",
            pdf.page_count()
        )));
    }
    let (w, h) = pdf
        .page_size(page - 1)
        .map_err(|e| MenuError::Input(e.to_string()))?;

    writeln!(out)?;
    writeln!(out, "Page {page} info:")?;
    writeln!(out, "  Dimensions: {w:.0} x {h:.0} points")?;
    writeln!(
        out,
        "  Coordinates: (0, 0) bottom-left to ({w:.0}, {h:.0}) top-right"
    )?;
    writeln!(out, "  Common positions:")?;
    writeln!(out, "    Bottom-left corner: (0, 0)")?;
    writeln!(out, "    Bottom-right corner: ({w:.0}, 0)")?;
    writeln!(out, "    Top-left corner: (0, {h:.0})")?;
    writeln!(out, "    Top-right corner: ({w:.0}, {h:.0})")?;
    writeln!(out, "    Center: ({:.0}, {:.0})", w / 2.0, h / 2.0)?;
    Ok(())
}

fn apply<W: Write>(
    out: &mut W,
    pdf: &mut PdfFile,
    applied: &mut Vec<NewAnnotation>,
    annot: NewAnnotation,
    placed: &str,
) -> Result<(), MenuError> {
    match pdf.append_annotation(&annot) {
        Ok(()) => {
            writeln!(out, "Added {} on page {} {placed}", annot.kind_label(), annot.page())?;
            applied.push(annot);
            Ok(())
        }
        Err(e) => Err(MenuError::Input(e.to_string())),
    }
}

fn add_note<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    pdf: &mut PdfFile,
    applied: &mut Vec<NewAnnotation>,
) -> Result<(), MenuError> {
    let page: usize = read_value(input, out, "Page number (1-based): ")?;
    let x: f64 = read_value(input, out, "X position: ")?;
    let y: f64 = read_value(input, out, "Y position: ")?;
    let contents = read_text(input, out, "Text content: ")?;
    let author_line = read_text(input, out, "Author (optional): ")?;
    let author = if author_line.trim().is_empty() {
        "User".to_string()
    } else {
        author_line.trim().to_string()
    };

    let placed = format!("at ({x}, {y})");
    apply(
        out,
        pdf,
        applied,
        NewAnnotation::Note {
            page,
            x,
            y,
            contents,
            author,
        },
        &placed,
    )
}

fn add_free_text<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    pdf: &mut PdfFile,
    applied: &mut Vec<NewAnnotation>,
) -> Result<(), MenuError> {
    let page: usize = read_value(input, out, "Page number (1-based): ")?;
    let x0: f64 = read_value(input, out, "Left X: ")?;
    let y0: f64 = read_value(input, out, "Bottom Y: ")?;
    let x1: f64 = read_value(input, out, "Right X: ")?;
    let y1: f64 = read_value(input, out, "Top Y: ")?;
    let contents = read_text(input, out, "Text content: ")?;
    let font_size: f64 = read_value_or(input, out, "Font size (12): ", 12.0)?;

    let placed = format!("in ({x0}, {y0})-({x1}, {y1})");
    apply(
        out,
        pdf,
        applied,
        NewAnnotation::FreeText {
            page,
            rect: [x0, y0, x1, y1],
            contents,
            font_size,
        },
        &placed,
    )
}

fn add_rectangle<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    pdf: &mut PdfFile,
    applied: &mut Vec<NewAnnotation>,
) -> Result<(), MenuError> {
    let page: usize = read_value(input, out, "Page number (1-based): ")?;
    let x0: f64 = read_value(input, out, "Left X: ")?;
    let y0: f64 = read_value(input, out, "Bottom Y: ")?;
    let x1: f64 = read_value(input, out, "Right X: ")?;
    let y1: f64 = read_value(input, out, "Top Y: ")?;
    let width: f64 = read_value_or(input, out, "Border width (2): ", 2.0)?;

    let placed = format!("at ({x0}, {y0})-({x1}, {y1})");
    apply(
        out,
        pdf,
        applied,
        NewAnnotation::Square {
            page,
            rect: [x0, y0, x1, y1],
            color: [1.0, 0.0, 0.0],
            width,
        },
        &placed,
    )
}

fn add_arrow<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    pdf: &mut PdfFile,
    applied: &mut Vec<NewAnnotation>,
) -> Result<(), MenuError> {
    let page: usize = read_value(input, out, "Page number (1-based): ")?;
    let x0: f64 = read_value(input, out, "Start X: ")?;
    let y0: f64 = read_value(input, out, "Start Y: ")?;
    let x1: f64 = read_value(input, out, "End X: ")?;
    let y1: f64 = read_value(input, out, "End Y: ")?;
    let width: f64 = read_value_or(input, out, "Line width (2): ", 2.0)?;

    let placed = format!("from ({x0}, {y0}) to ({x1}, {y1})");
    apply(
        out,
        pdf,
        applied,
        NewAnnotation::Arrow {
            page,
            start: [x0, y0],
            end: [x1, y1],
            color: [0.0, 0.0, 1.0],
            width,
        },
        &placed,
    )
}
