//! # mdjson CLI
//!
//! Command-line interface for the mdjson Markdown to JSON converter.

mod agent;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mdjson")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a YAML or JSON conversion options file
    #[arg(long, env = "MDJSON_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Markdown document to the JSON content model
    Convert {
        /// Markdown file to read (defaults to stdin)
        input: Option<PathBuf>,

        /// Base URI replacing the IIIF storage prefix of images
        #[arg(long)]
        iiif: Option<String>,

        /// Node kinds whose payload is base64 encoded (comma separated: table,code)
        #[arg(long, value_delimiter = ',')]
        encode: Vec<String>,

        /// Substitution applied to converted text, as PATTERN=>REPLACEMENT (repeatable)
        #[arg(long = "regex")]
        regexes: Vec<String>,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,

        /// Wrap the output in a versioned envelope
        #[arg(long)]
        envelope: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only ever carries JSON
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Convert {
            input,
            iiif,
            encode,
            regexes,
            pretty,
            envelope,
        } => {
            let opts = commands::ConvertArgs {
                input,
                iiif,
                encode,
                regexes,
                pretty,
                envelope,
            };
            commands::convert_document(cli.config.as_deref(), opts)
        }
    }
}
