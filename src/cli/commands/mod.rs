//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod extract;
mod serve;
mod tools;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::load_settings;
use crate::models::{ExtractionStrategy, OutputFormat};

#[derive(Parser)]
#[command(name = "lipikar")]
#[command(about = "Extract Bangla and English text from PDFs")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a PDF
    Extract {
        /// PDF to read
        input: PathBuf,
        /// Output path (default: input with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Extraction strategy
        #[arg(short, long, value_enum)]
        strategy: ExtractionStrategy,
        /// Output format
        #[arg(short, long, value_enum, default_value = "txt")]
        format: OutputFormat,
        /// API key for the vision model strategy
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Detect the script of a PDF (from its text layer) or an image
    Detect {
        /// PDF or image file
        input: PathBuf,
    },

    /// Convert legacy-encoded (Bijoy) text to Unicode
    ConvertLegacy {
        /// Text file to convert
        input: PathBuf,
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that the external tools are installed
    Tools,

    /// Start the upload-and-download web interface
    Serve {
        /// Address to bind to (port, host, or host:port)
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: String,
        /// Directory for uploads and results (overrides config)
        #[arg(long)]
        upload_dir: Option<PathBuf>,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Extract {
            input,
            output,
            strategy,
            format,
            api_key,
        } => extract::cmd_extract(&settings, input, output, strategy, format, api_key).await,
        Commands::Detect { input } => extract::cmd_detect(&settings, input).await,
        Commands::ConvertLegacy { input, output } => {
            extract::cmd_convert_legacy(&input, output.as_deref())
        }
        Commands::Tools => tools::cmd_tools(&settings),
        Commands::Serve { bind, upload_dir } => {
            let mut settings = settings;
            if let Some(dir) = upload_dir {
                settings.upload_dir = dir;
            }
            serve::cmd_serve(&settings, &bind).await
        }
    }
}
