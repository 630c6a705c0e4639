//! Run persistence
//!
//! Writes one JSON file per analysis run, keyed by date and run id:
//! `<runs_dir>/<YYYYMMDD>_<run_id>.json`. Files are never overwritten.
//! The directory is created once by [`RunStore::init`], called from the
//! process entry point.

use crate::pipeline::{Clock, SystemClock};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct RunStore<C = SystemClock> {
    dir: PathBuf,
    clock: C,
}

impl RunStore {
    /// Create the output directory (if needed) and open the store
    pub fn init(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::init_with_clock(dir, SystemClock)
    }
}

impl<C: Clock> RunStore<C> {
    pub fn init_with_clock(dir: impl Into<PathBuf>, clock: C) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create runs directory {}", dir.display()))?;
        Ok(Self { dir, clock })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a run would be written to today
    pub fn path_for(&self, run_id: &str) -> PathBuf {
        let date = self.clock.now().format("%Y%m%d");
        self.dir.join(format!("{date}_{run_id}.json"))
    }

    /// Persist a payload. Fails if a file for this run already exists.
    pub fn save_run<T: Serialize + ?Sized>(&self, run_id: &str, payload: &T) -> Result<PathBuf> {
        if run_id.is_empty() || run_id.contains(['/', '\\']) || run_id.contains("..") {
            anyhow::bail!("Invalid run id '{}'", run_id);
        }
        let path = self.path_for(run_id);
        let json = serde_json::to_string_pretty(payload).context("Failed to serialize run")?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Saved run {} to {}", run_id, path.display());
        Ok(path)
    }
}
