use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

mod output;

use output::ColorMode;
use paperdigest_core::{Config, PdfBackend};
use paperdigest_pdf_lopdf::LopdfBackend;
use paperdigest_pipeline::PaperProcessor;

/// Research paper section summarizer - extract and summarize the
/// canonical sections of an academic PDF
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize the sections of a PDF research paper
    Summarize {
        /// Path to the PDF file
        file_path: PathBuf,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Local directory with pre-downloaded model files
        #[arg(long)]
        model_dir: Option<PathBuf>,

        /// Print the summary object as JSON
        #[arg(long)]
        json: bool,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extract and print segmented sections without summarizing
        #[arg(long)]
        sections_only: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Summarize {
            file_path,
            no_color,
            model_dir,
            json,
            output,
            sections_only,
        } => {
            if sections_only {
                sections(&file_path, no_color, json, output)
            } else {
                summarize(&file_path, no_color, model_dir, json, output)
            }
        }
    }
}

fn summarize(
    file_path: &Path,
    no_color: bool,
    model_dir: Option<PathBuf>,
    json: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Resolve configuration: CLI flags > env vars > defaults
    let mut config = Config::from_env();
    if model_dir.is_some() {
        config.model_dir = model_dir;
    }

    let use_color = !no_color && output.is_none();
    let color = ColorMode(use_color);
    let mut writer = open_writer(output)?;

    let data = std::fs::read(file_path)?;

    eprintln!("Loading model {}...", config.model_id);
    let processor = PaperProcessor::from_config(&config)?;

    eprintln!("Summarizing {}...", file_path.display());
    let summaries = processor.process(&data)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summaries)?)?;
    } else {
        output::print_summaries(&mut *writer, &summaries, color)?;
    }
    Ok(())
}

/// Extract and segment without loading the model.
fn sections(
    file_path: &Path,
    no_color: bool,
    json: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let use_color = !no_color && output.is_none();
    let color = ColorMode(use_color);
    let mut writer = open_writer(output)?;

    let data = std::fs::read(file_path)?;
    let backend = LopdfBackend::new();
    let text = backend.extract_text(&data)?;
    let sections = paperdigest_parsing::segment_sections(&text);

    if json {
        let object: serde_json::Map<String, serde_json::Value> = sections
            .iter()
            .map(|(kind, text)| (kind.as_str().to_string(), text.into()))
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&object)?)?;
    } else {
        output::print_sections(&mut *writer, &sections, color)?;
    }
    Ok(())
}

fn open_writer(output: Option<PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    Ok(if let Some(path) = output {
        Box::new(std::fs::File::create(path)?)
    } else {
        Box::new(std::io::stdout())
    })
}
