//! Delay schedule generators.
//!
//! Every generator validates its arguments up front, builds its own RNG (when
//! it needs one) and returns the whole schedule as a `Vec<Duration>` of
//! exactly `retry_count` entries. With `fast_first` the first entry is zero
//! and consumes one retry slot.

mod aws_jitter;
mod decorrelated;
mod linear;
mod plan;

use std::time::Duration;

use jiff::SignedDuration;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::errors::Error;

pub use aws_jitter::aws_decorrelated_jitter_backoff;
pub use decorrelated::decorrelated_jitter_backoff_v2;
pub use linear::{constant_backoff, exponential_backoff, linear_backoff};
pub use plan::{BackoffKind, BackoffPlan};
pub(crate) use plan::{DEFAULT_EXPONENTIAL_FACTOR, DEFAULT_LINEAR_FACTOR};

pub(crate) fn non_negative(param: &'static str, value: SignedDuration) -> Result<Duration, Error> {
    if value.is_negative() {
        return Err(Error::invalid(param, format!("must be >= 0, got {value:?}")));
    }
    Ok(value.unsigned_abs())
}

pub(crate) fn retry_slots(retry_count: i32) -> Result<usize, Error> {
    usize::try_from(retry_count)
        .map_err(|_| Error::invalid("retry_count", format!("must be >= 0, got {retry_count}")))
}

/// Fresh per-call generator; never shared so a seed always replays the same stream.
pub(crate) fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Allocates the schedule and returns the first step index to compute.
pub(crate) fn start_schedule(count: usize, fast_first: bool) -> (Vec<Duration>, usize) {
    let mut delays = Vec::with_capacity(count);
    if fast_first && count > 0 {
        delays.push(Duration::ZERO);
        return (delays, 1);
    }
    (delays, 0)
}

/// Negative and NaN values clamp to zero; values past `Duration::MAX` saturate.
pub(crate) fn duration_from_nanos(nanos: f64) -> Duration {
    if nanos.is_nan() || nanos <= 0.0 {
        return Duration::ZERO;
    }
    if nanos < u64::MAX as f64 {
        return Duration::from_nanos(nanos.round() as u64);
    }
    Duration::try_from_secs_f64(nanos / 1e9).unwrap_or(Duration::MAX)
}

pub(crate) fn nanos_f64(duration: Duration) -> f64 {
    duration.as_nanos() as f64
}
