use std::time::Duration;

use tracing::{Level, event};

use crate::backoff::BackoffKind;
use crate::errors::Error;

/// Structured events for one schedule generation.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleTelemetry {
    kind: BackoffKind,
}

impl ScheduleTelemetry {
    pub fn new(kind: BackoffKind) -> Self {
        Self { kind }
    }

    pub fn emit_generated(&self, delays: &[Duration], fast_first: bool, seeded: bool) {
        let total: Duration = delays
            .iter()
            .fold(Duration::ZERO, |acc, d| acc.saturating_add(*d));
        event!(
            Level::DEBUG,
            kind = %self.kind,
            retry_count = delays.len() as u64,
            fast_first,
            seeded,
            total_delay_ms = u64::try_from(total.as_millis()).unwrap_or(u64::MAX),
            "backoff.generated"
        );
    }

    pub fn emit_rejected(&self, error: &Error) {
        event!(
            Level::WARN,
            kind = %self.kind,
            param = error.param().unwrap_or("unknown"),
            error = %error,
            "backoff.rejected"
        );
    }
}
