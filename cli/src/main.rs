//! docoutline CLI - PDF outline extraction and section ranking tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docoutline::batch::{collect_documents, process_directory_with_progress};
use docoutline::relevance::{load_job, load_persona};
use docoutline::{
    analyze_collection, document_info, extract_outline, render, BatchOptions, ErrorMode,
    JsonFormat, RelevanceOptions,
};

#[derive(Parser)]
#[command(name = "docoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF outlines and rank sections for a reader persona", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the heading outline of a PDF as JSON
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory for the JSON outlines
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,

        /// Stop at the first document that fails
        #[arg(long)]
        strict: bool,
    },

    /// Rank sections of a document collection for a persona and job
    Analyze {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Persona JSON file
        #[arg(long, value_name = "FILE", env = "DOCOUTLINE_PERSONA")]
        persona: PathBuf,

        /// Job description text file
        #[arg(long, value_name = "FILE", env = "DOCOUTLINE_JOB")]
        job: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            compact,
        }) => cmd_outline(&input, output.as_deref(), compact),
        Some(Commands::Batch {
            input,
            output,
            compact,
            sequential,
            strict,
        }) => cmd_batch(&input, &output, compact, sequential, strict),
        Some(Commands::Analyze {
            input,
            persona,
            job,
            output,
            compact,
        }) => cmd_analyze(&input, &persona, &job, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: print the outline if input is provided
            if let Some(input) = cli.input {
                cmd_outline(&input, None, false)
            } else {
                println!("{}", "Usage: docoutline <FILE>".yellow());
                println!("       docoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn emit(json: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = extract_outline(input)?;
    let json = render::to_json(&outline, json_format(compact))?;
    emit(&json, output)
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    compact: bool,
    sequential: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = BatchOptions::new()
        .with_json_format(json_format(compact))
        .with_parallel(!sequential);
    if strict {
        options = options.with_error_mode(ErrorMode::Strict);
    }

    let total = collect_documents(input)?.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let summary = process_directory_with_progress(input, output, &options, |path| {
        if let Some(name) = path.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    });
    pb.finish_and_clear();
    let summary = summary?;

    println!("\n{}", "Outlines:".green().bold());
    for entry in &summary.processed {
        let name = entry.output.file_name().unwrap_or_default().to_string_lossy();
        println!(
            "  {} {} ({} headings, {} sections)",
            "├─".dimmed(),
            name,
            entry.headings,
            entry.sections
        );
    }
    for failure in &summary.failures {
        println!(
            "  {} {}: {}",
            "✗".red(),
            failure.input.display(),
            failure.error
        );
    }

    println!(
        "\n{} {} of {} documents processed",
        "Done!".green().bold(),
        summary.processed.len(),
        summary.total()
    );

    Ok(())
}

fn cmd_analyze(
    input: &Path,
    persona: &Path,
    job: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let persona = load_persona(persona)?;
    let job = load_job(job)?;

    let report = analyze_collection(input, &persona, &job, &RelevanceOptions::default())?;

    for diagnostic in &report.diagnostics {
        eprintln!("{} {}", "Warning:".yellow(), diagnostic);
    }

    let json = render::to_json(&report, json_format(compact))?;
    emit(&json, output)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let info = document_info(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), info.filename);
    println!("{}: {}", "Title".bold(), info.title);
    println!("{}: {}", "Pages".bold(), info.page_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and section ranking tool");
    println!();
    println!("License: MIT");
}
