// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! pipeconf - build, register, and inspect pipeline configurations.
//!
//! This is the binary entry point.

mod check;
mod text_model;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pipeconf_config::PipeconfConfig;
use pipeconf_registry::search_catalog;

/// pipeconf - build, register, and inspect pipeline configurations.
#[derive(Parser, Debug)]
#[command(name = "pipeconf", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Activate every configured pipeconf against a resource directory and report.
    Check {
        /// Resource directory (defaults to `resources.dir`).
        #[arg(long)]
        resources: Option<PathBuf>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the built-in pipeconfs.
    Catalog {
        /// Only show entries whose id or description contains this text.
        query: Option<String>,
        /// Print the manifests as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration.
    Config,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => pipeconf_config::load_and_validate_path(path),
        None => pipeconf_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            pipeconf_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    match cli.command {
        Some(Commands::Check { resources, json }) => {
            match check::run_check(&config, resources, json) {
                Ok(summary) if summary.all_failed() => std::process::exit(2),
                Ok(_) => {}
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Catalog { query, json }) => {
            print_catalog(query.as_deref().unwrap_or(""), json)
        }
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("pipeconf: use --help for available commands");
        }
    }
}

fn print_catalog(query: &str, json: bool) {
    let manifests = search_catalog(query);
    if json {
        match serde_json::to_string_pretty(&manifests) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("error: cannot render catalog: {e}");
                std::process::exit(1);
            }
        }
        return;
    }
    for manifest in manifests {
        println!("{}  {}", manifest.id, manifest.description);
        for artifact in &manifest.artifacts {
            println!("    {:<14} {}", artifact.kind.to_string(), artifact.resource);
        }
    }
}

fn print_config(config: &PipeconfConfig) {
    match toml::to_string_pretty(config) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => {
            eprintln!("error: cannot render configuration: {e}");
            std::process::exit(1);
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pipeconf={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
