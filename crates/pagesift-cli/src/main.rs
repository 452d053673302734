// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagesift — local PDF page tools
//
// Entry point. Parses arguments, initialises logging, loads configuration,
// runs one tool, and turns its outcome into a single user-facing message.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pagesift_core::AppConfig;
use pagesift_core::config::default_config_path;
use pagesift_core::error::Result;
use pagesift_core::human_errors::humanize_error;
use pagesift_document::PageImageFormat;
use tracing_subscriber::EnvFilter;

/// Local PDF page tools: blank page removal, page deletion, reversal,
/// annotation and metadata stripping, and format conversion.
#[derive(Debug, Parser)]
#[command(name = "pagesift", version, about)]
struct Cli {
    /// Configuration file (defaults to the per-user config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report which pages are blank without writing a document.
    Analyze(AnalyzeArgs),
    /// Write a copy of the document without its blank pages.
    RemoveBlank(RemoveBlankArgs),
    /// Write a copy of the document without the given pages.
    DeletePages(DeletePagesArgs),
    /// Write a copy of the document with the page order reversed.
    Reverse(EditArgs),
    /// Write a copy of the document without the given annotation types.
    RemoveAnnotations(RemoveAnnotationsArgs),
    /// Write a copy of the document without its metadata.
    RemoveMetadata(EditArgs),
    /// Combine page images into one PDF, one page per image.
    ImagesToPdf(ImagesToPdfArgs),
    /// Render every page of a PDF to a JPEG or PNG file.
    PdfToImages(PdfToImagesArgs),
    /// Write a greyscale copy of the document.
    Greyscale(EditArgs),
    /// Write the default configuration file.
    InitConfig(InitConfigArgs),
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// One PDF, or one image per page in page order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Minimum blankness percentage (0-100) for a page to count as blank.
    #[arg(short, long, allow_negative_numbers = true)]
    sensitivity: Option<i64>,

    /// Print a JSON report with every page's score.
    #[arg(long)]
    json: bool,

    /// Write thumbnails of the blank pages into this directory.
    #[arg(long, value_name = "DIR")]
    thumbnails: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct RemoveBlankArgs {
    /// One PDF, or one image per page in page order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Minimum blankness percentage (0-100) for a page to count as blank.
    #[arg(short, long, allow_negative_numbers = true)]
    sensitivity: Option<i64>,

    /// Output PDF.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write thumbnails of the removed pages into this directory.
    #[arg(long, value_name = "DIR")]
    thumbnails: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct EditArgs {
    /// Source PDF.
    input: PathBuf,

    /// Output PDF.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct DeletePagesArgs {
    #[command(flatten)]
    edit: EditArgs,

    /// Pages to delete, e.g. "1, 3-5".
    #[arg(short, long)]
    pages: String,
}

#[derive(Debug, Args)]
struct RemoveAnnotationsArgs {
    #[command(flatten)]
    edit: EditArgs,

    /// Limit to these pages, e.g. "1, 3-5" (default: every page).
    #[arg(short, long)]
    pages: Option<String>,

    /// Annotation subtypes to remove, e.g. "Link,Highlight".
    #[arg(short, long, value_delimiter = ',', required = true)]
    types: Vec<String>,
}

#[derive(Debug, Args)]
struct ImagesToPdfArgs {
    /// Page images, in page order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output PDF.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct PdfToImagesArgs {
    /// Source PDF.
    input: PathBuf,

    /// Directory for the page images (defaults to `<name>-images/`).
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Image format.
    #[arg(short, long, value_enum, default_value_t = ImageFormatArg::Jpg)]
    format: ImageFormatArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ImageFormatArg {
    #[value(alias = "jpeg")]
    Jpg,
    Png,
}

impl From<ImageFormatArg> for PageImageFormat {
    fn from(arg: ImageFormatArg) -> Self {
        match arg {
            ImageFormatArg::Jpg => Self::Jpeg,
            ImageFormatArg::Png => Self::Png,
        }
    }
}

#[derive(Debug, Args)]
struct InitConfigArgs {
    /// Where to write the file (defaults to the per-user config.json).
    path: Option<PathBuf>,

    /// Replace an existing file.
    #[arg(long)]
    force: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!(command = ?cli.command, "Pagesift starting");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let human = humanize_error(&err);
            if err.is_benign() {
                println!("{}\n{}", human.message, human.suggestion);
                ExitCode::SUCCESS
            } else {
                tracing::error!(error = %err, "tool failed");
                eprintln!("{}\n{}", human.message, human.suggestion);
                ExitCode::FAILURE
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&PathBuf>) -> Result<AppConfig> {
    match explicit {
        Some(path) => AppConfig::load(path),
        None => AppConfig::load_or_default(default_config_path()),
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Command::InitConfig(args) = &cli.command {
        let path = args.path.clone().unwrap_or_else(default_config_path);
        return commands::init_config(&path, args.force);
    }

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Analyze(args) => {
            let options = commands::AnalyzeOptions {
                sensitivity: args.sensitivity,
                json: args.json,
                thumbnails: args.thumbnails,
            };
            commands::analyze(&args.inputs, &options, &config).await
        }
        Command::RemoveBlank(args) => {
            let options = commands::RemoveBlankOptions {
                sensitivity: args.sensitivity,
                output: args.output,
                thumbnails: args.thumbnails,
            };
            commands::remove_blank(&args.inputs, &options, &config).await
        }
        Command::DeletePages(args) => {
            commands::delete_pages(&args.edit.input, args.edit.output, &args.pages)
        }
        Command::Reverse(args) => commands::reverse(&args.input, args.output),
        Command::RemoveAnnotations(args) => commands::remove_annotations(
            &args.edit.input,
            args.edit.output,
            args.pages.as_deref(),
            &args.types,
        ),
        Command::RemoveMetadata(args) => commands::remove_metadata(&args.input, args.output),
        Command::ImagesToPdf(args) => commands::images_to_pdf(&args.inputs, args.output, &config),
        Command::PdfToImages(args) => {
            commands::pdf_to_images(&args.input, args.output_dir, args.format.into()).await
        }
        Command::Greyscale(args) => commands::greyscale(&args.input, args.output).await,
        Command::InitConfig(_) => Ok(()),
    }
}
