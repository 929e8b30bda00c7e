//! trainyard CLI - build the toy locomotive and export it.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use trainyard::{LocomotiveConfig, build_locomotive_assembly_with, export_to_path};

#[derive(Parser)]
#[command(name = "trainyard")]
#[command(about = "Assemble a procedural toy locomotive", long_about = None)]
struct Cli {
    /// TOML file overriding the reference parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (format determined by extension: .stl, .obj)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sides per cylinder
    #[arg(short, long)]
    segments: Option<u32>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => LocomotiveConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => LocomotiveConfig::default(),
    };
    if let Some(segments) = cli.segments {
        config.segments = segments;
    }

    if cli.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let loco = build_locomotive_assembly_with(&config).context("failed to build locomotive")?;
    println!("{}", loco.summary());

    if let Some(output) = &cli.output {
        let written = export_to_path(&loco, output)
            .with_context(|| format!("failed to export to {}", output.display()))?;
        for path in written {
            println!("wrote {}", path.display());
        }
    }

    Ok(())
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
