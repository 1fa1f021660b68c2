mod capture;
mod core;
mod shared;
mod ui;
mod utils;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::shared::config::{CollectorConfig, ConfigOverrides};
use crate::shared::constants;

#[derive(Parser)]
#[command(author, version, about = "Webcam capture tool that files labelled snapshots by category", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct SessionArgs {
    /// Key/value settings file (ignored when missing)
    #[arg(long, default_value = constants::CONFIG_FILE)]
    config: PathBuf,
    /// Camera device index
    #[arg(short, long)]
    camera: Option<i32>,
    /// Root directory for the category folders
    #[arg(short, long)]
    base_dir: Option<PathBuf>,
    /// Comma separated category list, e.g. "mug,watch,spoon"
    #[arg(long)]
    categories: Option<String>,
}

impl SessionArgs {
    fn resolve(&self) -> Result<CollectorConfig> {
        let overrides = ConfigOverrides {
            base_dir: self.base_dir.clone(),
            camera_index: self.camera,
            categories: self.categories.clone(),
        };
        Ok(CollectorConfig::load(&self.config, &overrides)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Live webcam feed; capture labelled snapshots
    Collect {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Create the base directory and one folder per category
    Setup {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Print the configured categories in picker order
    Categories {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Open the camera once and print what it delivers as JSON
    Probe {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// List files in a directory with names cut at a marker
    Normalize {
        #[arg(short, long, default_value = constants::NORMALIZE_DEFAULT_DIR)]
        dir: PathBuf,
        #[arg(short, long, default_value = constants::NORMALIZE_MARKER)]
        marker: String,
        /// Print a JSON array instead of the debug list
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // 1. Initialize Logger (error.log / debug.log)
    crate::utils::logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Collect { session } => {
            let config = session.resolve()?;
            crate::core::launcher::run_collect(&config)?;
        }
        Commands::Setup { session } => {
            let config = session.resolve()?;
            crate::core::launcher::run_setup(&config)?;
        }
        Commands::Categories { session } => {
            let config = session.resolve()?;
            for category in config.categories.iter() {
                println!("{}", category);
            }
        }
        Commands::Probe { session } => {
            let config = session.resolve()?;
            crate::core::launcher::run_probe(config.camera_index)?;
        }
        Commands::Normalize { dir, marker, json } => {
            crate::core::launcher::run_normalize(dir, marker, *json)?;
        }
    }

    Ok(())
}
