// abtr_node/src/errors.rs

use abtr_core::errors::ConfigError;
use thiserror::Error;

/// Everything that can stop the node from starting. Once the Bevy app is
/// running there are no fallible operations left.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("invalid arbiter configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    #[error("playback entry #{index}: offset {at} s must be a finite, non-negative time")]
    InvalidPlaybackOffset { index: usize, at: f64 },

    #[error("duration_seconds {0} must be a finite, non-negative time")]
    InvalidRunDuration(f64),
}
