use std::time::Duration;

use jiff::SignedDuration;
use rand::Rng;

use crate::errors::Error;
use crate::telemetry::ScheduleTelemetry;

use super::{
    BackoffKind, duration_from_nanos, nanos_f64, non_negative, retry_slots, rng_for,
    start_schedule,
};

/// AWS-style decorrelated jitter: each delay is drawn uniformly from
/// `[min_delay, min(max_delay, 3 * previous)]`, starting from `min_delay`.
///
/// With a zero `min_delay` the schedule stays at zero.
pub fn aws_decorrelated_jitter_backoff(
    min_delay: SignedDuration,
    max_delay: SignedDuration,
    retry_count: i32,
    seed: Option<u64>,
    fast_first: bool,
) -> Result<Vec<Duration>, Error> {
    let telemetry = ScheduleTelemetry::new(BackoffKind::AwsDecorrelatedJitter);
    let (min, max, count) = validate(min_delay, max_delay, retry_count)
        .inspect_err(|err| telemetry.emit_rejected(err))?;

    let mut rng = rng_for(seed);
    let (min, max) = (nanos_f64(min), nanos_f64(max));
    let (mut delays, start) = start_schedule(count, fast_first);
    let mut current = min;
    for _ in start..count {
        let ceiling = max.min(current * 3.0);
        current = if ceiling > min {
            rng.gen_range(min..ceiling)
        } else {
            min
        };
        delays.push(duration_from_nanos(current));
    }

    telemetry.emit_generated(&delays, fast_first, seed.is_some());
    Ok(delays)
}

fn validate(
    min_delay: SignedDuration,
    max_delay: SignedDuration,
    retry_count: i32,
) -> Result<(Duration, Duration, usize), Error> {
    let min = non_negative("min_delay", min_delay)?;
    if max_delay < min_delay {
        return Err(Error::invalid(
            "max_delay",
            format!("must be >= min_delay ({min_delay:?}), got {max_delay:?}"),
        ));
    }
    let count = retry_slots(retry_count)?;
    Ok((min, max_delay.unsigned_abs(), count))
}
