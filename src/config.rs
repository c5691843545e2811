//! read a backoff plan from a file or the environment

use std::fmt::Display;
use std::str::FromStr;

use jiff::SignedDuration;

use crate::backoff::{
    BackoffKind, BackoffPlan, DEFAULT_EXPONENTIAL_FACTOR, DEFAULT_LINEAR_FACTOR,
};
use crate::errors::Error;

pub const ENV_KIND: &str = "BACKOFF_KIND";
pub const ENV_DELAY: &str = "BACKOFF_DELAY";
pub const ENV_MAX_DELAY: &str = "BACKOFF_MAX_DELAY";
pub const ENV_RETRY_COUNT: &str = "BACKOFF_RETRY_COUNT";
pub const ENV_FACTOR: &str = "BACKOFF_FACTOR";
pub const ENV_SEED: &str = "BACKOFF_SEED";
pub const ENV_FAST_FIRST: &str = "BACKOFF_FAST_FIRST";

pub enum ConfigLocation {
    /// JSON document holding a serialized [`BackoffPlan`].
    File(String),
    /// `BACKOFF_*` variables.
    Env,
}

/// Loads a plan without validating its values; validation happens when the
/// plan generates delays.
pub fn read_config(loc: ConfigLocation) -> Result<BackoffPlan, Error> {
    let plan = match loc {
        ConfigLocation::File(path) => {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        }
        ConfigLocation::Env => read_config_from_env()?,
    };
    tracing::debug!(kind = %plan.kind(), retry_count = plan.retry_count(), "backoff.config_loaded");
    Ok(plan)
}

fn read_config_from_env() -> Result<BackoffPlan, Error> {
    let kind: BackoffKind = required(ENV_KIND)?;
    // BACKOFF_DELAY is the base delay: the mean for v2, the minimum for AWS jitter.
    let delay: SignedDuration = required(ENV_DELAY)?;
    let retry_count: i32 = required(ENV_RETRY_COUNT)?;
    let fast_first: bool = optional(ENV_FAST_FIRST)?.unwrap_or(false);

    let plan = match kind {
        BackoffKind::Constant => BackoffPlan::Constant {
            delay,
            retry_count,
            fast_first,
        },
        BackoffKind::Linear => BackoffPlan::Linear {
            initial_delay: delay,
            retry_count,
            factor: optional(ENV_FACTOR)?.unwrap_or(DEFAULT_LINEAR_FACTOR),
            fast_first,
        },
        BackoffKind::Exponential => BackoffPlan::Exponential {
            initial_delay: delay,
            retry_count,
            factor: optional(ENV_FACTOR)?.unwrap_or(DEFAULT_EXPONENTIAL_FACTOR),
            fast_first,
        },
        BackoffKind::AwsDecorrelatedJitter => BackoffPlan::AwsDecorrelatedJitter {
            min_delay: delay,
            max_delay: required(ENV_MAX_DELAY)?,
            retry_count,
            seed: optional(ENV_SEED)?,
            fast_first,
        },
        BackoffKind::DecorrelatedJitterV2 => BackoffPlan::DecorrelatedJitterV2 {
            mean_first_delay: delay,
            retry_count,
            seed: optional(ENV_SEED)?,
            fast_first,
        },
    };
    Ok(plan)
}

fn required<T>(name: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: Display,
{
    optional(name)?.ok_or_else(|| Error::Config(format!("Missing {} env var", name)))
}

fn optional<T>(name: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid {} env var '{}': {}", name, raw, e))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(Error::Config(format!("Unreadable {} env var: {}", name, e))),
    }
}
