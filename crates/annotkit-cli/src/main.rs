mod cli;
mod copy_cmd;
mod diff_cmd;
mod inspect_cmd;
mod page_range;
mod recreate_cmd;
mod scan_cmd;
mod shared;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Copy {
            ref source,
            ref target,
            ref output,
            ref pages,
        } => copy_cmd::run(source, target, output, pages.as_deref()),
        cli::Commands::Inspect {
            ref file,
            ref pages,
            ref format,
        } => inspect_cmd::run(file, pages.as_deref(), format),
        cli::Commands::Diff {
            ref original,
            ref annotated,
            ref output_dir,
            dpi,
            threshold,
            min_area,
            ref format,
        } => diff_cmd::run(original, annotated, output_dir, dpi, threshold, min_area, format),
        cli::Commands::Scan {
            ref file,
            ref pages,
            min_score,
            ref format,
        } => scan_cmd::run(file, pages.as_deref(), min_score, format),
        cli::Commands::Recreate {
            ref input,
            ref output,
            ref batch,
            ref export_template,
        } => recreate_cmd::run(input, output, batch.as_deref(), export_template.as_deref()),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
