// dexpreopt-clc - Print class loader contexts for dexpreopted modules
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dexpreopt_clc::{generate_class_loader_context, GeneratedContext, ModuleConfig};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dexpreopt-clc")]
#[command(about = "Compute dexpreopt class loader contexts", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the dex2oat class loader context flags
    Context {
        /// Module description (TOML)
        config: PathBuf,
        /// Emit machine-readable JSON instead of the raw flags
        #[arg(long)]
        json: bool,
    },
    /// Print the libraries the manifest fixer adds as <uses-library>
    UsesLibs {
        /// Module description (TOML)
        config: PathBuf,
    },
    /// Print the build paths the dexpreopt rule depends on
    Paths {
        /// Module description (TOML)
        config: PathBuf,
    },
}

#[derive(Serialize)]
struct ContextReport<'a> {
    module: &'a str,
    known: bool,
    flags: &'a str,
    build_paths: &'a [PathBuf],
    uses_libs: &'a [String],
}

fn main() {
    if let Err(error) = real_main() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Context { config, json } => {
            let (module, generated) = load_and_generate(&config)?;
            if json {
                let report = ContextReport {
                    module: module.name(),
                    known: generated.is_known(),
                    flags: generated.dex2oat_args(),
                    build_paths: generated.build_paths(),
                    uses_libs: generated.uses_libs(),
                };
                let payload = serde_json::to_string_pretty(&report)
                    .context("failed to serialize class loader context")?;
                println!("{payload}");
            } else {
                println!("{}", generated.dex2oat_args());
            }
        }
        Commands::UsesLibs { config } => {
            let (_, generated) = load_and_generate(&config)?;
            for library in generated.uses_libs() {
                println!("{library}");
            }
        }
        Commands::Paths { config } => {
            let (_, generated) = load_and_generate(&config)?;
            for path in generated.build_paths() {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_and_generate(path: &Path) -> Result<(ModuleConfig, GeneratedContext)> {
    let module = ModuleConfig::load_from_path(path)?;
    let library_paths = module
        .library_paths()
        .with_context(|| format!("invalid libraries for module '{}'", module.name()))?;
    let generated = generate_class_loader_context(&module, &library_paths)
        .with_context(|| format!("cannot compute class loader context for '{}'", module.name()))?;
    tracing::info!(
        module = %module.name(),
        known = generated.is_known(),
        "computed class loader context"
    );
    Ok((module, generated))
}
