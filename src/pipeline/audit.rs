//! Append-only audit trail of pipeline milestones

use super::clock::{iso_timestamp, Clock};
use crate::models::AuditEvent;
use serde_json::Value;

pub const UPLOAD_RECEIVED: &str = "UPLOAD_RECEIVED";
pub const FEATURES_EXTRACTED: &str = "FEATURES_EXTRACTED";
pub const SCORING_COMPLETED: &str = "SCORING_COMPLETED";
pub const ANALYSIS_COMPLETED: &str = "ANALYSIS_COMPLETED";

/// Collects events for one run. Events can only be appended.
pub struct AuditTrail<'a> {
    clock: &'a dyn Clock,
    events: Vec<AuditEvent>,
}

impl<'a> AuditTrail<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self {
            clock,
            events: Vec::with_capacity(4),
        }
    }

    /// Stamp and append an event
    pub fn record(&mut self, event: &str, details: Option<Value>) {
        self.events.push(AuditEvent {
            ts: iso_timestamp(self.clock.now()),
            event: event.to_string(),
            details,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<AuditEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_events_keep_insertion_order() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap());
        let mut trail = AuditTrail::new(&clock);
        trail.record(UPLOAD_RECEIVED, Some(json!({"source_type": "paste"})));
        trail.record(ANALYSIS_COMPLETED, None);
        assert_eq!(trail.len(), 2);

        let events = trail.into_events();
        assert_eq!(events[0].event, UPLOAD_RECEIVED);
        assert_eq!(events[0].ts, "2026-01-02T03:04:05.000000Z");
        assert_eq!(events[0].details, Some(json!({"source_type": "paste"})));
        assert_eq!(events[1].event, ANALYSIS_COMPLETED);
        assert!(events[1].details.is_none());
    }
}
