use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use layout_pdf::{RenderOptions, render_json_file};

#[derive(Parser)]
#[command(version, about = "Paint a paginated layout bundle (JSON) into a PDF file")]
struct Args {
    /// Render bundle: blocks, measures, layout and optional header/footer
    input: PathBuf,

    /// Output path (defaults to the input path with a .pdf extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Deflate content streams and raw image planes
    #[arg(long)]
    compress: bool,

    /// Leave out PNGs that would need pixel decoding
    #[arg(long)]
    no_raster_fallback: bool,

    /// Log debug details (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let output = args.output.unwrap_or_else(|| args.input.with_extension("pdf"));
    // Without flags the bundle's own options apply.
    let overrides = (args.compress || args.no_raster_fallback).then_some(RenderOptions {
        compress_streams: args.compress,
        raster_fallback: !args.no_raster_fallback,
    });

    match render_json_file(&args.input, &output, overrides) {
        Ok(()) => {
            log::info!("Wrote {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error rendering {}: {e}", args.input.display());
            ExitCode::FAILURE
        }
    }
}
