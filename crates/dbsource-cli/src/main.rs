//! dbsource CLI - validate datasource profiles and render connection URLs
//! and cache keys.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dbsource::{DataSourceError, Dispatcher, EngineKind, Profiles};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dbsource")]
#[command(about = "Datasource configuration toolkit: validate profiles, render URLs and cache keys")]
#[command(version)]
struct Cli {
    /// Path to YAML profiles file
    #[arg(short, long, default_value = "datasources.yaml")]
    config: PathBuf,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: trace, debug, info, warn, error
    #[arg(long, default_value = "warn")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every profile in the configuration file
    Validate,

    /// Print the connection URL for a profile
    Url {
        /// Profile name
        profile: String,
    },

    /// Print the pooling/cache key for a profile
    Id {
        /// Profile name
        profile: String,
    },

    /// Print the persisted descriptor JSON for a profile
    Descriptor {
        /// Profile name
        profile: String,
    },

    /// List supported engines and their default ports
    Engines,

    /// Write a starter profiles file
    Init {
        /// Output path [default: the --config path]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file without confirmation
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), DataSourceError> {
    let cli = Cli::parse();

    // Handle init separately (doesn't need an existing config, and keeps the
    // terminal clean for the overwrite prompt)
    if let Commands::Init { output, force } = &cli.command {
        let path = output.clone().unwrap_or_else(|| cli.config.clone());
        return init_profiles(&path, *force);
    }

    setup_logging(&cli.verbosity, &cli.log_format).map_err(DataSourceError::config)?;

    // Engines is static information; don't require a config file for it
    if let Commands::Engines = cli.command {
        for kind in EngineKind::ALL {
            println!("{:<12} default port {}", kind.as_str(), kind.default_port());
        }
        return Ok(());
    }

    let profiles = Profiles::load(&cli.config)?;
    info!(
        "loaded {} profile(s) from {:?}",
        profiles.datasources.len(),
        cli.config
    );

    match cli.command {
        Commands::Init { .. } | Commands::Engines => unreachable!(), // handled above
        Commands::Validate => {
            println!(
                "{} datasource profile(s) OK (hash {})",
                profiles.datasources.len(),
                &profiles.hash()[..12]
            );
        }
        Commands::Url { profile } => {
            let descriptor = Dispatcher::build_descriptor(profiles.get(&profile)?)?;
            println!("{}", descriptor.url()?);
        }
        Commands::Id { profile } => {
            let params = profiles.get(&profile)?;
            let descriptor = Dispatcher::build_descriptor(params)?;
            println!("{}", Dispatcher::unique_id(&descriptor, params.engine)?);
        }
        Commands::Descriptor { profile } => {
            let descriptor = Dispatcher::build_descriptor(profiles.get(&profile)?)?;
            println!("{}", descriptor.to_json()?);
        }
    }

    Ok(())
}

fn init_profiles(path: &Path, force: bool) -> Result<(), DataSourceError> {
    if path.exists() && !force {
        let overwrite = dialoguer::Confirm::new()
            .with_prompt(format!("{} exists, overwrite?", path.display()))
            .default(false)
            .interact()
            .map_err(|e| DataSourceError::config(e.to_string()))?;
        if !overwrite {
            println!("aborted");
            return Ok(());
        }
    }
    std::fs::write(path, dbsource::profiles::EXAMPLE)?;
    println!("wrote starter profiles to {}", path.display());
    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity {
        "trace" | "debug" | "info" | "warn" | "error" => verbosity,
        other => return Err(format!("unknown verbosity '{other}'")),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        "json" => builder.json().try_init().map_err(|e| e.to_string()),
        "text" => builder.try_init().map_err(|e| e.to_string()),
        other => Err(format!("unknown log format '{other}' (expected text or json)")),
    }
}
