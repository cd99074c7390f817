mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pdftab",
    version,
    about = "Extract table-like rows from a directory of PDFs into one CSV file"
)]
struct Cli {
    /// Show debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract rows from every PDF in a directory into one delimited file
    Extract {
        /// Directory containing the PDF files
        input_dir: PathBuf,

        /// Output CSV file (".csv" is appended when no extension is given)
        #[arg(short = 'o', long = "out", value_name = "FILE")]
        out: PathBuf,

        #[command(flatten)]
        options: ExtractOptions,

        /// Summary format: table (default) or json
        #[arg(long, default_value = "table")]
        output_format: String,
    },
    /// List the PDF files that would be processed, in processing order
    Scan {
        /// Directory containing the PDF files
        input_dir: PathBuf,
    },
    /// Print the rows extracted from a single PDF
    Rows {
        /// Path to a PDF file
        pdf_file: PathBuf,

        #[command(flatten)]
        options: ExtractOptions,
    },
}

/// Settings shared by the commands that run pdftotext.
#[derive(clap::Args)]
pub struct ExtractOptions {
    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Field delimiter (overrides config)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// pdftotext binary to use (overrides config)
    #[arg(long, value_name = "PATH")]
    pdftotext: Option<PathBuf>,

    /// Run pdftotext without -layout
    #[arg(long)]
    no_layout: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input_dir,
            out,
            options,
            output_format,
        } => commands::extract::run(input_dir, out, &options, &output_format),
        Commands::Scan { input_dir } => commands::scan::run(&input_dir),
        Commands::Rows { pdf_file, options } => commands::rows::run(&pdf_file, &options),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
