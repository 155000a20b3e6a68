// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stocktake::builder::{self, ConfigureMakeInstall};
use stocktake::catalog::HttpCatalog;
use stocktake::config::Config;
use stocktake::manifest::{CategoryFilter, Manifest};
use stocktake::render::{self, RenderOptions};
use stocktake::resolver::{self, ResolutionRequest};
use tracing::info;

#[derive(Parser)]
#[command(name = "stocktake")]
#[command(author, version, about = "Package inventory reporter for local and remote state", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List packages in a category with installed and remote versions
    List {
        /// Category to report on
        #[arg(value_enum)]
        category: CategoryFilter,

        /// Force machine-readable output
        #[arg(long)]
        dump: bool,

        /// Omit version columns (implies machine-readable output)
        #[arg(long)]
        no_version: bool,

        /// Skip the remote catalog entirely
        #[arg(long)]
        local: bool,
    },
    /// Build and install a package source tree via configure/make/install
    Build {
        /// Directory containing the configured source tree
        source_dir: PathBuf,

        /// Install prefix passed to configure
        #[arg(long, default_value = "/usr/local")]
        prefix: PathBuf,

        /// Library directory passed to configure
        #[arg(long)]
        libdir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Root configuration is required before any command runs.
    let config = Config::from_env()?;

    match cli.command {
        Some(Commands::List {
            category,
            dump,
            no_version,
            local,
        }) => {
            let manifest = Manifest::load(&config.manifest_path())?;
            let catalog = HttpCatalog::new(&config.catalog_url);

            let request = ResolutionRequest {
                filter: category,
                local_only: local,
            };
            let records = resolver::resolve(&request, &config, &manifest, &catalog)?;

            let options = RenderOptions {
                machine_readable: dump,
                show_version: !no_version,
            };
            for line in render::format_records(&records, &options) {
                println!("{}", line);
            }

            Ok(())
        }
        Some(Commands::Build {
            source_dir,
            prefix,
            libdir,
        }) => {
            info!("Building source tree at {}", source_dir.display());

            let libdir = libdir.unwrap_or_else(|| prefix.join("lib"));
            let mut steps = ConfigureMakeInstall::new(&source_dir);
            builder::run_build(&mut steps, &prefix, &libdir)?;

            println!("Installed from {} to {}", source_dir.display(), prefix.display());
            Ok(())
        }
        None => {
            println!("Stocktake v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'stocktake --help' for usage information");
            Ok(())
        }
    }
}
