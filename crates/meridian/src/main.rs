// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meridian - browse and compare treatment modalities from the command line.
//!
//! This is the binary entry point. It loads configuration, bootstraps the
//! plugin registry from the built-in catalog, and dispatches a subcommand.

mod bootstrap;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use meridian_config::MeridianConfig;
use meridian_core::PatientData;

/// Meridian - treatment modality registry.
#[derive(Parser, Debug)]
#[command(name = "meridian", version, about, long_about = None)]
struct Cli {
    /// Emit JSON instead of human-readable output.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered modalities.
    List,
    /// Show registry totals and the load report.
    Stats,
    /// Show the routes contributed by every modality.
    Routes,
    /// Show navigation entries.
    Nav,
    /// Show modality cards for an indication.
    Cards {
        /// Indication key, e.g. "headache".
        indication: String,
    },
    /// Compare modalities treating an indication.
    Compare { indication: String },
    /// Screen a patient against modality contraindications.
    Safety {
        /// Only check this modality.
        #[arg(long)]
        plugin: Option<String>,
        /// Patient condition (repeatable).
        #[arg(long = "condition")]
        conditions: Vec<String>,
        /// Current medication (repeatable).
        #[arg(long = "medication")]
        medications: Vec<String>,
        #[arg(long)]
        pregnant: bool,
        #[arg(long)]
        age: Option<u32>,
    },
    /// Search modalities by name, protocol, technique, or synonym.
    Search { query: String },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => meridian_config::load_and_validate_path(path),
        None => meridian_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            meridian_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    if let Err(e) = run(cli, config).await {
        eprintln!("meridian: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: MeridianConfig) -> Result<(), meridian_core::MeridianError> {
    let out = commands::Output::new(cli.json, cli.plain);

    let Some(command) = cli.command else {
        println!("meridian: use --help for available commands");
        return Ok(());
    };
    if let Commands::Config = command {
        return commands::show_config(&config, out);
    }

    let app = bootstrap::bootstrap(&config).await?;
    match command {
        Commands::List => commands::list(&app, out),
        Commands::Stats => commands::stats(&app, out),
        Commands::Routes => commands::routes(&app, out),
        Commands::Nav => commands::nav(&app, out),
        Commands::Cards { indication } => commands::cards(&app, &indication, out),
        Commands::Compare { indication } => commands::compare(&app, &indication, out),
        Commands::Safety {
            plugin,
            conditions,
            medications,
            pregnant,
            age,
        } => {
            let patient = PatientData {
                conditions,
                medications,
                pregnancy: pregnant,
                age,
            };
            commands::safety(&app, plugin.as_deref(), &patient, out)
        }
        Commands::Search { query } => commands::search(&app, &query, out),
        Commands::Config => commands::show_config(&config, out),
    }
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "meridian={log_level},meridian_plugin={log_level},meridian_compose={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn safety_flags_parse() {
        let cli = Cli::try_parse_from([
            "meridian",
            "--json",
            "safety",
            "--condition",
            "diabetes",
            "--condition",
            "hypertension",
            "--pregnant",
            "--age",
            "40",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Some(Commands::Safety {
                conditions,
                pregnant,
                age,
                plugin,
                ..
            }) => {
                assert_eq!(conditions, vec!["diabetes", "hypertension"]);
                assert!(pregnant);
                assert_eq!(age, Some(40));
                assert!(plugin.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = meridian_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.app.name, "meridian");
    }
}
