//! Toy Robot Simulator
//!
//! Runs commands from the file named on the command line, or reads them
//! from stdin when no file is given or the file does not exist.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use robosim::{CommandStream, LineReader, OutputFormat, SimConfig};

#[derive(Parser)]
#[command(name = "robosim")]
#[command(about = "Toy robot simulator - moves a robot around a table top")]
#[command(version)]
struct Args {
    /// File of commands to run, one per line
    file: Option<PathBuf>,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Table width, overriding the configuration
    #[arg(long)]
    width: Option<u32>,

    /// Table height, overriding the configuration
    #[arg(long)]
    height: Option<u32>,

    /// Output format: text, json
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Show debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn get_config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| std::env::var_os("ROBOSIM_CONFIG").map(PathBuf::from))
    }

    fn load_config(&self) -> Result<SimConfig> {
        let mut config = match self.get_config_path() {
            Some(path) => SimConfig::load_from_path(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => SimConfig::default(),
        };

        if let Some(width) = self.width {
            config.table.width = width;
        }
        if let Some(height) = self.height {
            config.table.height = height;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout only carries command output
    let default_filter = if args.verbose { "robosim=debug" } else { "robosim=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = args.load_config()?;
    info!(
        "Table {}x{}, output format {}",
        config.table.width, config.table.height, config.output.format
    );

    let mut stream = CommandStream::from_config(&config, io::stdout().lock(), io::stderr())
        .context("Failed to set up simulator session")?;

    let mut input = LineReader::new(io::stdin().lock());
    let mode = stream
        .run(args.file.as_deref(), &mut input)
        .context("Simulator session failed")?;

    info!("Completed {:?} session", mode);
    Ok(())
}
