// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use docx_formatter::utils::logging::{format_info, format_success};
use docx_formatter::{Config, DocumentProcessor, PreviewRenderer, Validator};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "docx_formatter")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Removes empty and unwanted paragraphs from .docx documents", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server exposing POST /process-document
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Filter a local .docx file and write the cleaned copy
    Process {
        input: PathBuf,

        /// Paragraphs containing this text (any case) are removed
        #[arg(short, long)]
        filter: Option<String>,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also write the HTML preview to this file
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },

    /// Print the HTML preview of a .docx file
    Preview { input: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    docx_formatter::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using defaults and environment",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Serve { host, port } => {
            cmd_serve(config, host, port).await?;
        }
        Commands::Process {
            input,
            filter,
            output,
            html,
        } => {
            cmd_process(&config, &input, filter.as_deref(), output, html)?;
        }
        Commands::Preview { input } => {
            cmd_preview(&config, &input)?;
        }
    }

    Ok(())
}

async fn cmd_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate().context("Invalid server settings")?;

    info!("Starting docx formatter server");
    docx_formatter::serve(&config)
        .await
        .context("Server terminated with an error")?;

    Ok(())
}

fn cmd_process(
    config: &Config,
    input: &Path,
    filter: Option<&str>,
    output: Option<PathBuf>,
    html: Option<PathBuf>,
) -> Result<()> {
    let start_time = Instant::now();
    let bytes = read_document(config, input)?;

    let processor = DocumentProcessor::new(config);
    let processed = processor
        .process(&bytes, filter)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    let output = output.unwrap_or_else(|| default_output_path(input));
    std::fs::write(&output, &processed.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if let Some(html_path) = html {
        std::fs::write(&html_path, &processed.html_content)
            .with_context(|| format!("Failed to write {}", html_path.display()))?;
        println!(
            "{}",
            format_info(&format!("Preview written to {}", html_path.display()))
        );
    }

    println!(
        "{}",
        format_success(&format!(
            "{} -> {}: removed {} of {} paragraphs ({} empty, {} matching) in {:.2}s",
            input.display(),
            output.display(),
            processed.stats.removed(),
            processed.stats.total,
            processed.stats.removed_empty,
            processed.stats.removed_matching,
            start_time.elapsed().as_secs_f64()
        ))
    );
    println!(
        "{}",
        format_info(&format!("sha256 {}", processed.content_hash))
    );

    Ok(())
}

fn cmd_preview(config: &Config, input: &Path) -> Result<()> {
    let bytes = read_document(config, input)?;
    let html = PreviewRenderer::new(config.preview.escape_html)
        .with_unpacked_limit(config.processing.max_unpacked_bytes())
        .try_render(&bytes)
        .with_context(|| format!("Failed to render preview of {}", input.display()))?;

    println!("{}", html);
    Ok(())
}

fn read_document(config: &Config, input: &Path) -> Result<Vec<u8>> {
    Validator::validate_document_path(input, &config.processing.allowed_extension)?;
    std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    input.with_file_name(format!("{}_cleaned.docx", stem))
}
