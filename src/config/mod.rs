//! Configuration module for contract-risk
//!
//! This module handles:
//! - Project-level configuration (contract-risk.toml)
//! - User-level fallback (~/.config/contract-risk/config.toml)
//! - Scoring weight overrides
//! - Output defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, user_config_path, OutputConfig, ProjectConfig,
    ScoringConfig, CONFIG_FILE_NAME, EXAMPLE_CONFIG, RUNS_DIR_ENV,
};
