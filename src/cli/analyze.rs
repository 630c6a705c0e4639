//! Analyze command - score one contract

use crate::config::ProjectConfig;
use crate::models::SourceType;
use crate::pipeline::{ContractRiskModel, RuleBasedModel};
use crate::reporters::{self, OutputFormat};
use crate::store::RunStore;
use anyhow::{Context, Result};
use console::style;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const UNTITLED: &str = "Untitled";

pub(super) struct AnalyzeArgs {
    pub file: Option<PathBuf>,
    pub title: Option<String>,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub save: bool,
}

pub(super) fn run(config: &ProjectConfig, args: AnalyzeArgs) -> Result<()> {
    let (text, source_type, default_title) = read_input(args.file.as_deref())?;
    let title = args
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(default_title);

    let format_name = args.format.as_deref().unwrap_or(&config.output.format);
    let format = OutputFormat::from_str(format_name)?;
    debug!("Rendering '{}' as {}", title, format);

    let model = RuleBasedModel::new().with_weights(config.scoring.weights);
    let result = model.analyze(&text, &title, source_type)?;

    if args.save {
        let store = RunStore::init(&config.output.runs_dir)?;
        let path = store.save_run(&result.run_id, &result)?;
        eprintln!(
            "{} Saved run to {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let output = reporters::report_with_format(&result, format)?;
    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
            std::fs::write(&path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            // stderr keeps stdout clean for piping
            eprintln!(
                "Report written to: {}",
                style(path.display()).cyan()
            );
        }
        None => println!("{}", output),
    }

    Ok(())
}

/// Read the contract text. A file path is an upload, stdin is a paste.
fn read_input(file: Option<&Path>) -> Result<(String, SourceType, String)> {
    match file {
        Some(path) if path != Path::new("-") => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read contract {}", path.display()))?;
            let title = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| UNTITLED.to_string());
            debug!("Read {} bytes from {}", text.len(), path.display());
            Ok((text, SourceType::Upload, title))
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read contract from stdin")?;
            debug!("Read {} bytes from stdin", text.len());
            Ok((text, SourceType::Paste, UNTITLED.to_string()))
        }
    }
}
