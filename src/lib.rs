//! Retry delay schedules.
//!
//! Each generator turns a handful of parameters into the full list of delays
//! a retry policy should wait between attempts. Nothing here sleeps or
//! retries; callers own the loop.
//!
//! ```rust
//! use jiff::SignedDuration;
//! use retry_delays::decorrelated_jitter_backoff_v2;
//!
//! let delays = decorrelated_jitter_backoff_v2(SignedDuration::from_secs(1), 6, Some(7), false)?;
//! assert_eq!(delays.len(), 6);
//! # Ok::<(), retry_delays::Error>(())
//! ```

pub mod backoff;
pub mod config;
pub mod errors;
pub mod telemetry;

pub use backoff::{
    BackoffKind, BackoffPlan, aws_decorrelated_jitter_backoff, constant_backoff,
    decorrelated_jitter_backoff_v2, exponential_backoff, linear_backoff,
};
pub use config::{ConfigLocation, read_config};
pub use errors::Error;
