//! Injected time and run-id sources
//!
//! The only side effects of an analysis are reading the clock and drawing
//! a random run-id suffix. Both sit behind traits so tests can pin them.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Generates run identifiers
pub trait RunIdSource: Send + Sync {
    /// Produce an id for a run that started at `started`
    fn next_id(&self, started: DateTime<Utc>) -> String;
}

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 4;

/// `2026-10-18T09-30-00Z_k3x9`: start time plus a random suffix.
/// Not security-sensitive; the suffix only separates runs in the same second.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRunIds;

impl RunIdSource for RandomRunIds {
    fn next_id(&self, started: DateTime<Utc>) -> String {
        let mut rng = rand::rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();
        format!("{}_{}", run_id_timestamp(started), suffix)
    }
}

/// Deterministic ids (`<timestamp>_0001`, `_0002`, ...) for tests and replays
#[derive(Debug, Default)]
pub struct SequentialRunIds {
    next: AtomicU64,
}

impl SequentialRunIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunIdSource for SequentialRunIds {
    fn next_id(&self, started: DateTime<Utc>) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}_{:04}", run_id_timestamp(started), n)
    }
}

fn run_id_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H-%M-%SZ").to_string()
}

/// ISO-8601 UTC with a `Z` suffix, as written into audit events
pub fn iso_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
