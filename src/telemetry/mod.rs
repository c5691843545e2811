pub mod schedule;

pub use schedule::ScheduleTelemetry;
