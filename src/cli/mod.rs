//! CLI command definitions and handlers

mod analyze;
mod eval;
mod init;

use crate::config::{load_config_file, load_project_config, ProjectConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// contract-risk - Explainable contract risk scoring
#[derive(Parser, Debug)]
#[command(name = "contract-risk")]
#[command(
    version,
    about = "Score contract text for legal risk with explainable findings",
    long_about = "Extracts clause signals from contract text, maps them to findings with \
evidence and recommendations, and combines them into a 0-100 risk score with a full \
scoring breakdown and audit trail.",
    after_help = "\
Examples:
  contract-risk analyze msa.txt                    Analyze an uploaded file
  cat msa.txt | contract-risk analyze --title MSA  Analyze pasted text
  contract-risk analyze msa.txt --format json      JSON output for scripting
  contract-risk analyze msa.txt --save             Persist the run under logs/
  contract-risk eval                               Run the bundled evaluation cases
  contract-risk init                               Write an example contract-risk.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Path to a contract-risk.toml (default: ./contract-risk.toml, then user config)
    #[arg(long, global = true, env = "CONTRACT_RISK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one contract and print the result
    #[command(after_help = "\
Examples:
  contract-risk analyze contract.txt                 Read a file (source type: upload)
  contract-risk analyze - < contract.txt             Read stdin (source type: paste)
  contract-risk analyze contract.txt -f json -o r.json   Write JSON to a file")]
    Analyze {
        /// Contract text file. Omit or pass `-` to read stdin.
        file: Option<PathBuf>,

        /// Contract title (default: file name, or "Untitled" for stdin)
        #[arg(long, short = 't')]
        title: Option<String>,

        /// Output format: text or json (default: config output.format)
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Persist the run as JSON under output.runs_dir
        #[arg(long)]
        save: bool,
    },

    /// Evaluate the model against labeled cases
    Eval {
        /// JSON file with labeled cases
        #[arg(default_value = crate::eval::DEFAULT_CASES_PATH)]
        cases: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an example contract-risk.toml in the current directory
    Init,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            file,
            title,
            format,
            output,
            save,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            analyze::run(
                &config,
                analyze::AnalyzeArgs {
                    file,
                    title,
                    format,
                    output,
                    save,
                },
            )
        }

        Commands::Eval { cases, json } => {
            let config = resolve_config(cli.config.as_deref())?;
            eval::run(&config, &cases, json)
        }

        Commands::Init => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            init::run(&cwd)
        }
    }
}

fn resolve_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    let config = match explicit {
        Some(path) => load_config_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            load_project_config(&cwd)?
        }
    };
    Ok(config)
}
