//! pdfoutline CLI - PDF heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::source::DocumentSource;
use pdfoutline::{
    batch, render, DocumentReport, JsonFormat, LopdfSource, OutlineConfig, OutlineExtractor,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer the title and H1-H3 outline of PDF documents", long_about = None)]
struct Cli {
    /// Input PDF file or directory of PDFs
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (single PDF) or directory (batch)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE", env = "PDFOUTLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Process batch documents one at a time
    #[arg(long, global = true)]
    sequential: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract outlines for every PDF in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,
    },

    /// Extract the outline of one PDF as JSON
    Extract {
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

    /// Show font statistics and metadata
    Stats {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = run(cli);

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult {
    if let Some(Commands::Version) = cli.command {
        cmd_version();
        return Ok(());
    }

    let extractor = build_extractor(cli.config.as_deref(), cli.sequential)?;

    match cli.command {
        Some(Commands::Batch { input, output }) => cmd_batch(&extractor, &input, &output),
        Some(Commands::Extract {
            input,
            output,
            compact,
        }) => cmd_extract(&extractor, &input, output.as_deref(), compact),
        Some(Commands::Stats { input }) => cmd_stats(&extractor, &input),
        Some(Commands::Version) => Ok(()),
        None => match cli.input {
            Some(input) if input.is_dir() => {
                let output = cli.output.unwrap_or_else(|| PathBuf::from("output"));
                cmd_batch(&extractor, &input, &output)
            }
            Some(input) => cmd_extract(&extractor, &input, cli.output.as_deref(), false),
            None => {
                println!("{}", "Usage: pdfoutline <INPUT> [OUTPUT]".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        },
    }
}

fn build_extractor(
    config: Option<&Path>,
    sequential: bool,
) -> Result<OutlineExtractor, pdfoutline::Error> {
    let mut config = match config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            OutlineConfig::from_json_file(path)?
        }
        None => OutlineConfig::default(),
    };
    if sequential {
        config = config.sequential();
    }
    OutlineExtractor::with_config(config)
}

fn cmd_batch(extractor: &OutlineExtractor, input: &Path, output: &Path) -> CliResult {
    if !input.is_dir() {
        return Err(format!("Input directory not found: {}", input.display()).into());
    }

    let total = batch::pdf_files(input)?.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = batch::process_directory(input, output, extractor, |doc: &DocumentReport| {
        let name = doc
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(name);
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} documents, {} headings",
        "Processed".green().bold(),
        report.len(),
        report.total_headings()
    );
    for doc in &report.documents {
        let marker = if doc.is_ok() { "✓".green() } else { "✗".red() };
        println!(
            "  {} {} {}",
            marker,
            doc.output.display(),
            format!("({} headings)", doc.headings).dimmed()
        );
    }
    for doc in report.failures() {
        if let Some(ref error) = doc.error {
            eprintln!("{} {}: {}", "Failed".red(), doc.input.display(), error);
        }
    }

    Ok(())
}

fn cmd_extract(
    extractor: &OutlineExtractor,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> CliResult {
    let outline = extractor.try_extract_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = render::to_json(&outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_stats(extractor: &OutlineExtractor, input: &Path) -> CliResult {
    let source = LopdfSource::open(input)?;
    let stats = extractor.font_stats(&source);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), source.version());
    println!("{}: {}", "Pages".bold(), source.page_count());
    if let Some(title) = source.title() {
        println!("{}: {}", "Title".bold(), title);
    }

    println!();
    println!("{}", "Font Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {:.2}", "Average".bold(), stats.avg);
    println!("{}: {:.2}", "75th percentile".bold(), stats.q75);
    println!("{}: {:.2}", "90th percentile".bold(), stats.q90);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline extraction tool");
    println!();
    println!("License: MIT");
}
