//! Deterministic schedules: constant, linear and exponential.

use std::time::Duration;

use jiff::SignedDuration;

use crate::errors::Error;
use crate::telemetry::ScheduleTelemetry;

use super::{BackoffKind, duration_from_nanos, nanos_f64, non_negative, retry_slots, start_schedule};

/// Repeats `delay` for every retry.
pub fn constant_backoff(
    delay: SignedDuration,
    retry_count: i32,
    fast_first: bool,
) -> Result<Vec<Duration>, Error> {
    let telemetry = ScheduleTelemetry::new(BackoffKind::Constant);
    let (delay, count) = non_negative("delay", delay)
        .and_then(|delay| Ok((delay, retry_slots(retry_count)?)))
        .inspect_err(|err| telemetry.emit_rejected(err))?;

    let (mut delays, start) = start_schedule(count, fast_first);
    delays.extend(std::iter::repeat_n(delay, count - start));

    telemetry.emit_generated(&delays, fast_first, false);
    Ok(delays)
}

/// Grows by `factor * initial_delay` per retry: `d, d + f*d, d + 2f*d, ...`.
///
/// A `factor` of zero degenerates to a constant schedule.
pub fn linear_backoff(
    initial_delay: SignedDuration,
    retry_count: i32,
    factor: f64,
    fast_first: bool,
) -> Result<Vec<Duration>, Error> {
    let telemetry = ScheduleTelemetry::new(BackoffKind::Linear);
    let (initial, count) = validate_growth(initial_delay, retry_count, factor, 0.0)
        .inspect_err(|err| telemetry.emit_rejected(err))?;

    let initial = nanos_f64(initial);
    let (mut delays, start) = start_schedule(count, fast_first);
    for k in 0..count - start {
        delays.push(duration_from_nanos(initial * (1.0 + factor * k as f64)));
    }

    telemetry.emit_generated(&delays, fast_first, false);
    Ok(delays)
}

/// Multiplies the delay by `factor` per retry: `d, f*d, f^2*d, ...`.
pub fn exponential_backoff(
    initial_delay: SignedDuration,
    retry_count: i32,
    factor: f64,
    fast_first: bool,
) -> Result<Vec<Duration>, Error> {
    let telemetry = ScheduleTelemetry::new(BackoffKind::Exponential);
    let (initial, count) = validate_growth(initial_delay, retry_count, factor, 1.0)
        .inspect_err(|err| telemetry.emit_rejected(err))?;

    let mut current = nanos_f64(initial);
    let (mut delays, start) = start_schedule(count, fast_first);
    for _ in start..count {
        delays.push(duration_from_nanos(current));
        current *= factor;
    }

    telemetry.emit_generated(&delays, fast_first, false);
    Ok(delays)
}

fn validate_growth(
    initial_delay: SignedDuration,
    retry_count: i32,
    factor: f64,
    min_factor: f64,
) -> Result<(Duration, usize), Error> {
    let initial = non_negative("initial_delay", initial_delay)?;
    let count = retry_slots(retry_count)?;
    if !factor.is_finite() || factor < min_factor {
        return Err(Error::invalid(
            "factor",
            format!("must be a finite value >= {min_factor}, got {factor}"),
        ));
    }
    Ok((initial, count))
}
