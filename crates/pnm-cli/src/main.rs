//! pnm - plain-text Netpbm processing CLI
//!
//! Loads P1/P2/P3 images, applies catalogue transforms, converts between
//! the three variants, and writes the result back as plain text.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pnm")]
#[command(author, version, about = "Plain-text Netpbm processing CLI")]
#[command(long_about = "
Process plain-text Netpbm images (P1 bitmap, P2 graymap, P3 pixmap).

Examples:
  pnm info scan.pgm                    # Show image metadata
  pnm ops                              # List every transform
  pnm ops --binary                     # Transforms for bitmap images
  pnm convert scan.pgm out.ppm --to p3
  pnm apply negative scan.pgm -o neg
  pnm apply gaussian scan.pgm -o soft --param 5x5
  pnm apply threshold photo.ppm -o mask --param 50%
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert between the three plain-text variants
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// List the transform catalogue
    Ops(OpsArgs),

    /// Apply a transform to an image
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input image
    input: PathBuf,

    /// Output path (extension appended when missing)
    output: PathBuf,

    /// Target variant
    #[arg(long, value_parser = ["p1", "p2", "p3"])]
    to: String,
}

#[derive(Args)]
struct OpsArgs {
    /// Only transforms applicable to binary (P1) images
    #[arg(long, conflicts_with = "toned")]
    binary: bool,

    /// Only transforms applicable to toned (P2/P3) images
    #[arg(long)]
    toned: bool,
}

#[derive(Args)]
struct ApplyArgs {
    /// Transform name (see `pnm ops`)
    name: String,

    /// Input image
    input: PathBuf,

    /// Output path (extension appended when missing)
    #[arg(short, long)]
    output: PathBuf,

    /// Parameter, by option label or value (see `pnm ops`)
    #[arg(short, long)]
    param: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Convert(args) => commands::convert::run(args),
        Commands::Ops(args) => commands::ops::run(args),
        Commands::Apply(args) => commands::apply::run(args),
    }
}
