use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

use super::{
    aws_decorrelated_jitter_backoff, constant_backoff, decorrelated_jitter_backoff_v2,
    exponential_backoff, linear_backoff,
};

pub(crate) const DEFAULT_LINEAR_FACTOR: f64 = 1.0;
pub(crate) const DEFAULT_EXPONENTIAL_FACTOR: f64 = 2.0;

/// Names the delay generator behind a [`BackoffPlan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackoffKind {
    Constant,
    Linear,
    Exponential,
    AwsDecorrelatedJitter,
    DecorrelatedJitterV2,
}

impl BackoffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackoffKind::Constant => "constant",
            BackoffKind::Linear => "linear",
            BackoffKind::Exponential => "exponential",
            BackoffKind::AwsDecorrelatedJitter => "aws_decorrelated_jitter",
            BackoffKind::DecorrelatedJitterV2 => "decorrelated_jitter_v2",
        }
    }
}

impl fmt::Display for BackoffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackoffKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "constant" => Ok(BackoffKind::Constant),
            "linear" => Ok(BackoffKind::Linear),
            "exponential" => Ok(BackoffKind::Exponential),
            "aws_decorrelated_jitter" => Ok(BackoffKind::AwsDecorrelatedJitter),
            "decorrelated_jitter_v2" => Ok(BackoffKind::DecorrelatedJitterV2),
            other => Err(Error::Config(format!(
                "Unknown backoff kind '{}'; expected one of 'constant', 'linear', \
                 'exponential', 'aws_decorrelated_jitter' or 'decorrelated_jitter_v2'",
                other
            ))),
        }
    }
}

fn default_linear_factor() -> f64 {
    DEFAULT_LINEAR_FACTOR
}

fn default_exponential_factor() -> f64 {
    DEFAULT_EXPONENTIAL_FACTOR
}

/// A delay schedule described as data, e.g. loaded from a config file.
///
/// Durations accept jiff's serde formats, such as `"PT2S"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackoffPlan {
    Constant {
        delay: SignedDuration,
        retry_count: i32,
        #[serde(default)]
        fast_first: bool,
    },
    Linear {
        initial_delay: SignedDuration,
        retry_count: i32,
        #[serde(default = "default_linear_factor")]
        factor: f64,
        #[serde(default)]
        fast_first: bool,
    },
    Exponential {
        initial_delay: SignedDuration,
        retry_count: i32,
        #[serde(default = "default_exponential_factor")]
        factor: f64,
        #[serde(default)]
        fast_first: bool,
    },
    AwsDecorrelatedJitter {
        min_delay: SignedDuration,
        max_delay: SignedDuration,
        retry_count: i32,
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default)]
        fast_first: bool,
    },
    DecorrelatedJitterV2 {
        mean_first_delay: SignedDuration,
        retry_count: i32,
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default)]
        fast_first: bool,
    },
}

impl BackoffPlan {
    pub fn kind(&self) -> BackoffKind {
        match self {
            BackoffPlan::Constant { .. } => BackoffKind::Constant,
            BackoffPlan::Linear { .. } => BackoffKind::Linear,
            BackoffPlan::Exponential { .. } => BackoffKind::Exponential,
            BackoffPlan::AwsDecorrelatedJitter { .. } => BackoffKind::AwsDecorrelatedJitter,
            BackoffPlan::DecorrelatedJitterV2 { .. } => BackoffKind::DecorrelatedJitterV2,
        }
    }

    pub fn retry_count(&self) -> i32 {
        match self {
            BackoffPlan::Constant { retry_count, .. }
            | BackoffPlan::Linear { retry_count, .. }
            | BackoffPlan::Exponential { retry_count, .. }
            | BackoffPlan::AwsDecorrelatedJitter { retry_count, .. }
            | BackoffPlan::DecorrelatedJitterV2 { retry_count, .. } => *retry_count,
        }
    }

    /// Generates the schedule. Jittered plans without a seed differ per call.
    pub fn delays(&self) -> Result<Vec<Duration>, Error> {
        match *self {
            BackoffPlan::Constant {
                delay,
                retry_count,
                fast_first,
            } => constant_backoff(delay, retry_count, fast_first),
            BackoffPlan::Linear {
                initial_delay,
                retry_count,
                factor,
                fast_first,
            } => linear_backoff(initial_delay, retry_count, factor, fast_first),
            BackoffPlan::Exponential {
                initial_delay,
                retry_count,
                factor,
                fast_first,
            } => exponential_backoff(initial_delay, retry_count, factor, fast_first),
            BackoffPlan::AwsDecorrelatedJitter {
                min_delay,
                max_delay,
                retry_count,
                seed,
                fast_first,
            } => aws_decorrelated_jitter_backoff(
                min_delay,
                max_delay,
                retry_count,
                seed,
                fast_first,
            ),
            BackoffPlan::DecorrelatedJitterV2 {
                mean_first_delay,
                retry_count,
                seed,
                fast_first,
            } => decorrelated_jitter_backoff_v2(mean_first_delay, retry_count, seed, fast_first),
        }
    }
}
