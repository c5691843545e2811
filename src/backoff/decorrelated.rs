use std::time::Duration;

use jiff::SignedDuration;
use rand::Rng;

use crate::errors::Error;
use crate::telemetry::ScheduleTelemetry;

use super::{
    BackoffKind, duration_from_nanos, nanos_f64, non_negative, retry_slots, rng_for,
    start_schedule,
};

/// Steepness of the `tanh(sqrt(p * t))` ramp.
const P_FACTOR: f64 = 4.0;
/// Brings the median of the first jittered delay close to `mean_first_delay`.
const RP_SCALING_FACTOR: f64 = 1.0 / 1.4;

/// Generates a decorrelated-jitter schedule whose delays grow roughly
/// exponentially from `mean_first_delay`.
///
/// Step `i` samples `t = i + u` with `u` uniform in `[0, 1)` and emits the
/// increase of `2^t * tanh(sqrt(4t))` over the previous sample, scaled by the
/// mean first delay. Consecutive samples never overlap, so the curve gives
/// monotone increments and the jitter stays decorrelated from the prior
/// value. For the `t`-th jittered delay (1-based) the result never exceeds
/// `mean_first_delay * 2^(t+1)` when `t < 2`, or
/// `mean_first_delay * (2^(t+1) - 2^(t-1))` otherwise.
///
/// A `seed` makes the schedule reproducible; without one the generator draws
/// from OS entropy.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `mean_first_delay` or `retry_count` is
/// negative.
///
/// # Examples
///
/// ```rust
/// use jiff::SignedDuration;
/// use retry_delays::decorrelated_jitter_backoff_v2;
///
/// let delays =
///     decorrelated_jitter_backoff_v2(SignedDuration::from_secs(1), 5, Some(42), true).unwrap();
/// assert_eq!(delays.len(), 5);
/// assert!(delays[0].is_zero());
/// ```
pub fn decorrelated_jitter_backoff_v2(
    mean_first_delay: SignedDuration,
    retry_count: i32,
    seed: Option<u64>,
    fast_first: bool,
) -> Result<Vec<Duration>, Error> {
    let telemetry = ScheduleTelemetry::new(BackoffKind::DecorrelatedJitterV2);
    let (mean, count) = validate(mean_first_delay, retry_count)
        .inspect_err(|err| telemetry.emit_rejected(err))?;

    let mut rng = rng_for(seed);
    let base = nanos_f64(mean);
    let (mut delays, start) = start_schedule(count, fast_first);
    let mut prev = 0.0_f64;
    for i in start..count {
        let t = i as f64 + rng.gen_range(0.0..1.0);
        let next = 2f64.powf(t) * (P_FACTOR * t).sqrt().tanh();
        // inf - inf once the curve overflows
        let step = if next.is_infinite() {
            f64::INFINITY
        } else {
            next - prev
        };
        delays.push(duration_from_nanos(step * RP_SCALING_FACTOR * base));
        prev = next;
    }

    telemetry.emit_generated(&delays, fast_first, seed.is_some());
    Ok(delays)
}

fn validate(
    mean_first_delay: SignedDuration,
    retry_count: i32,
) -> Result<(Duration, usize), Error> {
    let mean = non_negative("mean_first_delay", mean_first_delay)?;
    let count = retry_slots(retry_count)?;
    Ok((mean, count))
}
