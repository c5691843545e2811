use std::time::Duration;

use jiff::SignedDuration;

use retry_delays::decorrelated_jitter_backoff_v2;
use retry_delays::errors::Error;

use crate::bounds::{assert_delay_within_bound, upper_limit_factor};

#[test]
fn upper_limit_factor_matches_table() {
    let factors: Vec<u128> = (1..=6).map(upper_limit_factor).collect();
    assert_eq!(factors, vec![4, 6, 12, 24, 48, 96]);
}

#[test]
fn negative_mean_first_delay_is_rejected() {
    let err = decorrelated_jitter_backoff_v2(SignedDuration::from_nanos(-100), 3, Some(1), false)
        .expect_err("negative delay must fail");
    assert!(matches!(
        err,
        Error::InvalidArgument {
            param: "mean_first_delay",
            ..
        }
    ));
}

#[test]
fn negative_retry_count_is_rejected() {
    let err = decorrelated_jitter_backoff_v2(SignedDuration::from_secs(1), -1, Some(1), false)
        .expect_err("negative retry count must fail");
    assert!(matches!(
        err,
        Error::InvalidArgument {
            param: "retry_count",
            ..
        }
    ));
}

#[test]
fn zero_retries_gives_empty_schedule() {
    let delays =
        decorrelated_jitter_backoff_v2(SignedDuration::from_secs(2), 0, Some(1), false).unwrap();
    assert!(delays.is_empty());
}

#[test]
fn fast_first_starts_with_zero() {
    let mean = Duration::from_secs(2);
    let delays =
        decorrelated_jitter_backoff_v2(SignedDuration::from_secs(2), 10, Some(1), true).unwrap();
    assert_eq!(delays.len(), 10);
    assert_eq!(delays[0], Duration::from_millis(0));
    for (t, delay) in (1..).zip(delays.iter().skip(1)) {
        assert_delay_within_bound(t, *delay, mean);
    }
}

#[test]
fn delays_are_within_range() {
    let mean = Duration::from_secs(1);
    let delays =
        decorrelated_jitter_backoff_v2(SignedDuration::from_secs(1), 6, Some(23456), false)
            .unwrap();
    assert_eq!(delays.len(), 6);
    for (t, delay) in (1..).zip(delays) {
        assert_delay_within_bound(t, delay, mean);
    }
}

#[test]
fn delays_are_within_range_for_many_seeds() {
    let mean = Duration::from_secs(3);
    for seed in 0..1000 {
        let delays =
            decorrelated_jitter_backoff_v2(SignedDuration::from_secs(3), 6, Some(seed), false)
                .unwrap();
        assert_eq!(delays.len(), 6, "seed {seed}");
        for (t, delay) in (1..).zip(delays) {
            assert_delay_within_bound(t, delay, mean);
        }
    }
}

#[test]
fn long_schedules_stay_within_range() {
    let mean = Duration::from_secs(1);
    let delays =
        decorrelated_jitter_backoff_v2(SignedDuration::from_secs(1), 40, Some(1), false).unwrap();
    assert_eq!(delays.len(), 40);
    for (t, delay) in (1..).zip(delays) {
        assert!(delay < Duration::MAX, "try {t} saturated");
        assert_delay_within_bound(t, delay, mean);
    }
}

#[test]
fn same_seed_replays_same_schedule() {
    let first =
        decorrelated_jitter_backoff_v2(SignedDuration::from_millis(750), 8, Some(42), false)
            .unwrap();
    let second =
        decorrelated_jitter_backoff_v2(SignedDuration::from_millis(750), 8, Some(42), false)
            .unwrap();
    assert_eq!(first, second);
}

#[test]
fn different_seeds_diverge() {
    let a = decorrelated_jitter_backoff_v2(SignedDuration::from_secs(1), 6, Some(1), false)
        .unwrap();
    let b = decorrelated_jitter_backoff_v2(SignedDuration::from_secs(1), 6, Some(2), false)
        .unwrap();
    assert_ne!(a, b);
}

#[test]
fn schedule_grows_on_average() {
    let mut totals = [Duration::ZERO; 5];
    for seed in 0..200 {
        let delays =
            decorrelated_jitter_backoff_v2(SignedDuration::from_secs(1), 5, Some(seed), false)
                .unwrap();
        for (total, delay) in totals.iter_mut().zip(delays) {
            *total += delay;
        }
    }
    assert!(totals.windows(2).all(|w| w[0] < w[1]), "{totals:?}");
}
