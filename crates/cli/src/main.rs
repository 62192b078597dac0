//! CLI tool for reviewing PowerPoint slide content and density.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use slidecheck_core::{
    analyze, text_summary, DeckStatistics, Error, InMemoryJobStore, JobId, JobStore,
    PresentationAnalysis,
};
use slidecheck_pptx::PptxParser;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File extensions accepted as input.
const ALLOWED_EXTENSIONS: &[&str] = &["pptx"];

/// Review slide text density of PowerPoint presentations.
#[derive(Parser, Debug)]
#[command(name = "slidecheck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file(s) (.pptx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: print to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a plain-text slide summary instead of JSON
    #[arg(short, long)]
    summary: bool,

    /// Include deck statistics in the JSON report
    #[arg(long)]
    stats: bool,

    /// Emit compact JSON
    #[arg(long)]
    compact: bool,

    /// Largest accepted input file, in megabytes
    #[arg(long, env = "MAX_FILE_SIZE_MB", default_value = "50")]
    max_file_size_mb: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let parser = PptxParser::new();
    let store = InMemoryJobStore::new();

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &parser, &store) {
            Ok(output) => match args.output.as_ref() {
                Some(dir) => {
                    let output_path = get_output_path(input_path, dir, args.summary)?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
                None => print!("{}", output),
            },
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    log::debug!("{} analyses stored", store.len());

    Ok(())
}

/// Analyze a single presentation and render its report.
fn process_file(
    input_path: &Path,
    args: &Args,
    parser: &PptxParser,
    store: &impl JobStore,
) -> Result<String> {
    validate_input(input_path, args.max_file_size_mb)?;

    let presentation = parser.open(input_path)?;
    let job_id = JobId::new();
    store.put(job_id, analyze(&presentation));

    let analysis = store
        .get(&job_id)
        .with_context(|| format!("Job {} missing from store", job_id))?;

    if args.verbose {
        eprintln!("  Job {}: {} slides", job_id, analysis.metadata.total_slides);
    }

    if args.summary {
        return Ok(text_summary(analysis.slide_records()));
    }

    render_json(&job_id, &presentation.filename, &analysis, args)
}

/// Reject inputs with the wrong extension or above the size limit.
fn validate_input(input_path: &Path, max_file_size_mb: u64) -> slidecheck_core::Result<()> {
    let extension = input_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(Error::UnsupportedFormat(format!(
            "'{}'. Only .pptx files are supported.",
            input_path.display()
        )));
    }

    // Missing files fall through to the parser, which reports a load error.
    if let Ok(metadata) = std::fs::metadata(input_path) {
        let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);
        log::info!("Received file: {} ({:.2}MB)", input_path.display(), size_mb);

        if size_mb > max_file_size_mb as f64 {
            return Err(Error::InvalidInput(format!(
                "File too large ({:.2}MB). Maximum size is {}MB.",
                size_mb, max_file_size_mb
            )));
        }
    }

    Ok(())
}

/// Serialize the report for one job.
fn render_json(
    job_id: &JobId,
    filename: &str,
    analysis: &PresentationAnalysis,
    args: &Args,
) -> Result<String> {
    let mut report = json!({
        "job_id": job_id,
        "filename": filename,
        "status": "completed",
        "analysis": analysis,
    });

    if args.stats {
        report["statistics"] = serde_json::to_value(DeckStatistics::from_slides(
            analysis.slide_records(),
        ))?;
    }

    let mut output = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    output.push('\n');

    Ok(output)
}

/// Determine the output path for a processed file.
fn get_output_path(input_path: &Path, output_dir: &Path, summary: bool) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let extension = if summary { "txt" } else { "json" };

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    Ok(output_dir.join(format!("{}.{}", stem, extension)))
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
