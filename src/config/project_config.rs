//! Project-level configuration support
//!
//! Loads configuration from `contract-risk.toml` in the working directory,
//! falling back to `~/.config/contract-risk/config.toml`.
//!
//! # Configuration Format
//!
//! ```toml
//! # contract-risk.toml
//!
//! [scoring]
//! weights = { Low = 10, Medium = 20, High = 35, Critical = 50 }
//!
//! [output]
//! runs_dir = "logs"
//! format = "text"
//! ```
//!
//! A missing file means defaults. A file that exists but does not parse,
//! or carries weights that do not strictly increase, is an error.

use crate::error::ConfigError;
use crate::scoring::SeverityWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name searched in the working directory
pub const CONFIG_FILE_NAME: &str = "contract-risk.toml";

/// Overrides `output.runs_dir`
pub const RUNS_DIR_ENV: &str = "CONTRACT_RISK_RUNS_DIR";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Scoring customization
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Severity weights (validated on load)
    #[serde(default)]
    pub weights: SeverityWeights,
}

/// Where and how results are written
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory for persisted runs (default: ./logs)
    #[serde(default = "default_runs_dir")]
    pub runs_dir: PathBuf,

    /// Default report format: text or json
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            runs_dir: default_runs_dir(),
            format: default_format(),
        }
    }
}

fn default_runs_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_format() -> String {
    "text".to_string()
}

impl ProjectConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.display().to_string(),
            source,
        })
    }

    /// Apply environment overrides (highest priority)
    fn apply_env(self) -> Self {
        self.with_runs_dir_override(std::env::var_os(RUNS_DIR_ENV).map(PathBuf::from))
    }

    fn with_runs_dir_override(mut self, runs_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = runs_dir {
            self.output.runs_dir = dir;
        }
        self
    }
}

/// User-level config path
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("contract-risk").join("config.toml"))
}

/// Load configuration from an explicit file. The file must exist.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = ProjectConfig::from_toml_str(&content, path)?;
    debug!("Loaded config from {}", path.display());
    Ok(config.apply_env())
}

/// Load configuration for a working directory.
///
/// Search order: `<dir>/contract-risk.toml`, then the user config, then
/// defaults. Environment overrides apply in every case.
pub fn load_project_config(dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let candidates = std::iter::once(dir.join(CONFIG_FILE_NAME)).chain(user_config_path());
    for path in candidates {
        if path.is_file() {
            return load_config_file(&path);
        }
    }
    debug!("No config file found, using defaults");
    Ok(ProjectConfig::default().apply_env())
}

/// Example file written by `contract-risk init`
pub const EXAMPLE_CONFIG: &str = r#"# contract-risk configuration

[scoring]
# Weight per severity. Must strictly increase Low < Medium < High < Critical.
weights = { Low = 10, Medium = 20, High = 35, Critical = 50 }

[output]
# Directory for saved runs (one JSON file per run)
runs_dir = "logs"

# Default report format: text or json
format = "text"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert_eq!(config.scoring.weights, SeverityWeights::default());
        assert_eq!(config.output.runs_dir, PathBuf::from("logs"));
        assert_eq!(config.output.format, "text");
    }

    #[test]
    fn test_example_config_parses_to_defaults() {
        let config = ProjectConfig::from_toml_str(EXAMPLE_CONFIG, Path::new("example")).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config =
            ProjectConfig::from_toml_str("[output]\nformat = \"json\"\n", Path::new("t")).unwrap();
        assert_eq!(config.output.format, "json");
        assert_eq!(config.output.runs_dir, PathBuf::from("logs"));
        assert_eq!(config.scoring.weights, SeverityWeights::default());
    }

    #[test]
    fn test_custom_weights() {
        let toml_str = r#"
[scoring]
weights = { Low = 5, Medium = 15, High = 40, Critical = 60 }
"#;
        let config = ProjectConfig::from_toml_str(toml_str, Path::new("t")).unwrap();
        assert_eq!(
            config.scoring.weights,
            SeverityWeights::new(5, 15, 40, 60).unwrap()
        );
    }

    #[test]
    fn test_non_increasing_weights_fail_fast() {
        let toml_str = r#"
[scoring]
weights = { Low = 50, Medium = 20, High = 35, Critical = 10 }
"#;
        let err = ProjectConfig::from_toml_str(toml_str, Path::new("bad.toml")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("bad.toml"), "{msg}");
        assert!(msg.contains("strictly increase"), "{msg}");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = ProjectConfig::from_toml_str("this is [[ not valid", Path::new("t"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[output]\nruns_dir = \"runs\"\nformat = \"json\"\n",
        )
        .unwrap();
        let config = load_project_config(dir.path()).unwrap();
        let expected_runs_dir = std::env::var_os(RUNS_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("runs"));
        assert_eq!(config.output.runs_dir, expected_runs_dir);
        assert_eq!(config.output.format, "json");
        assert_eq!(config.scoring.weights, SeverityWeights::default());
    }

    #[test]
    fn test_runs_dir_override_replaces_file_value() {
        let config = ProjectConfig::from_toml_str("[output]\nruns_dir = \"runs\"\n", Path::new("t"))
            .unwrap()
            .with_runs_dir_override(Some(PathBuf::from("/tmp/elsewhere")));
        assert_eq!(config.output.runs_dir, PathBuf::from("/tmp/elsewhere"));

        let untouched = ProjectConfig::default().with_runs_dir_override(None);
        assert_eq!(untouched.output.runs_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_file(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
