// abtr_core/src/errors.rs

use thiserror::Error;

/// Errors raised while validating the arbiter configuration.
/// These are the only failures in the library: once an `Arbiter` exists,
/// ingress and ticks are total.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("commands_hz must be a finite, positive rate (got {0})")]
    NonPositiveFrequency(f64),

    #[error("commands_hz {0} gives a tick period that is zero or does not fit a Duration")]
    PeriodOutOfRange(f64),

    #[error("frame_id must not be empty")]
    EmptyFrameId,
}
