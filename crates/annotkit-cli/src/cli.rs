use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Copy, inspect, recreate, and heuristically detect PDF annotations.
#[derive(Debug, Parser)]
#[command(name = "annotkit", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Copy non-highlight annotations from a source PDF onto a target PDF
    Copy {
        /// PDF carrying the annotations to copy
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// PDF to copy the annotations onto
        #[arg(value_name = "TARGET")]
        target: PathBuf,

        /// Path for the resulting PDF
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Source page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show every annotation and whether the copy filter keeps it
    Inspect {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Detect flattened annotations by diffing renders of two PDFs
    Diff {
        /// The clean PDF, before annotating
        #[arg(value_name = "ORIGINAL")]
        original: PathBuf,

        /// The annotated (flattened) PDF
        #[arg(value_name = "ANNOTATED")]
        annotated: PathBuf,

        /// Directory for the per-page analysis images
        #[arg(long, value_name = "DIR", default_value = "annotation-analysis")]
        output_dir: PathBuf,

        /// Render resolution in dots per inch
        #[arg(long, default_value_t = 150.0)]
        dpi: f64,

        /// Minimum per-pixel difference (0-255) that counts as a change
        #[arg(long, default_value_t = 30)]
        threshold: u8,

        /// Minimum changed-pixel count for a region to be reported
        #[arg(long, default_value_t = 100)]
        min_area: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Flag text that looks like annotations (font/color/position heuristics)
    Scan {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Minimum suspicion score for a span to be reported
        #[arg(long, default_value_t = 3)]
        min_score: u32,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Recreate annotations on a PDF, interactively or from a batch file
    Recreate {
        /// PDF to annotate
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Path for the annotated PDF
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// JSON batch file with the annotations to add
        #[arg(long, value_name = "FILE")]
        batch: Option<PathBuf>,

        /// Write the session's annotations to a reusable batch file
        #[arg(long, value_name = "FILE")]
        export_template: Option<PathBuf>,
    },
}

/// Output format for analysis subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}
