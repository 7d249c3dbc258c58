//! Tracing setup and the on-disk application logs.

pub mod files;
pub mod subscriber;

pub use files::{LogContents, LogFiles, NO_ENTRIES_PLACEHOLDER};
pub use subscriber::{LogConfig, ObservabilityError, init};
