// abtr_core/src/arbiter/config.rs

use std::time::Duration;

use crate::buffer::BufferMode;
use crate::errors::ConfigError;
use crate::types::Stream;

/// Default output rate, in Hz.
pub const DEFAULT_COMMANDS_HZ: f64 = 10.0;
/// Default frame attached to every emitted command.
pub const DEFAULT_FRAME_ID: &str = "base_link";

/// Everything the arbiter needs to know at construction time.
/// None of it can change once the arbiter is running.
#[derive(Debug, Clone, PartialEq)]
pub struct ArbiterConfig {
    /// Tick rate in Hz. Must be finite and strictly positive.
    pub commands_hz: f64,
    pub a_mode: BufferMode,
    pub b_mode: BufferMode,
    pub frame_id: String,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            commands_hz: DEFAULT_COMMANDS_HZ,
            a_mode: BufferMode::Unbuffered,
            b_mode: BufferMode::Buffered,
            frame_id: DEFAULT_FRAME_ID.to_string(),
        }
    }
}

impl ArbiterConfig {
    pub fn with_commands_hz(mut self, commands_hz: f64) -> Self {
        self.commands_hz = commands_hz;
        self
    }

    pub fn with_modes(mut self, a_mode: BufferMode, b_mode: BufferMode) -> Self {
        self.a_mode = a_mode;
        self.b_mode = b_mode;
        self
    }

    pub fn with_frame_id(mut self, frame_id: impl Into<String>) -> Self {
        self.frame_id = frame_id.into();
        self
    }

    pub fn mode(&self, stream: Stream) -> BufferMode {
        match stream {
            Stream::A => self.a_mode,
            Stream::B => self.b_mode,
        }
    }

    /// Checks the configuration and returns the tick period it implies.
    pub fn validate(&self) -> Result<Duration, ConfigError> {
        // `is_finite` is false for NaN as well.
        if !self.commands_hz.is_finite() || self.commands_hz <= 0.0 {
            return Err(ConfigError::NonPositiveFrequency(self.commands_hz));
        }
        if self.frame_id.trim().is_empty() {
            return Err(ConfigError::EmptyFrameId);
        }
        // Very high rates round down to a zero period.
        match Duration::try_from_secs_f64(1.0 / self.commands_hz) {
            Ok(period) if !period.is_zero() => Ok(period),
            _ => Err(ConfigError::PeriodOutOfRange(self.commands_hz)),
        }
    }
}
