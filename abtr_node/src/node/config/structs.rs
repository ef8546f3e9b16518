// abtr_node/src/node/config/structs.rs

use std::time::Duration;

use abtr_core::arbiter::{ArbiterConfig, DEFAULT_COMMANDS_HZ, DEFAULT_FRAME_ID};
use abtr_core::buffer::BufferMode;
use abtr_core::messages::VelocityCommand;
use abtr_core::types::Stream;
use nalgebra::Vector3;
use serde::Deserialize;

use crate::errors::NodeError;

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

/// # ArbiterNodeConfig
/// The root of the data parsed from `abtr.toml` (plus `ABTR_*` env vars).
/// Every field is optional in the file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ArbiterNodeConfig {
    /// Output rate in Hz.
    #[serde(default = "default_commands_hz")]
    pub commands_hz: f64,

    #[serde(default)]
    pub cmd_vel_a_buffered: bool,

    #[serde(default = "default_true")]
    pub cmd_vel_b_buffered: bool,

    /// Log every tick's decision at info level instead of debug.
    #[serde(default)]
    pub stats_logged: bool,

    /// Frame attached to every merged command.
    #[serde(default = "default_base_link")]
    pub frame_id: String,

    /// Stop after this long. `None` runs until Ctrl-C.
    #[serde(default)]
    pub duration_seconds: Option<f64>,

    // The TOML has `[[playback]]`, which becomes a Vec of PlaybackEntry structs.
    #[serde(default)]
    pub playback: Vec<PlaybackEntry>,
}

impl Default for ArbiterNodeConfig {
    fn default() -> Self {
        Self {
            commands_hz: default_commands_hz(),
            cmd_vel_a_buffered: false,
            cmd_vel_b_buffered: default_true(),
            stats_logged: false,
            frame_id: default_base_link(),
            duration_seconds: None,
            playback: Vec::new(),
        }
    }
}

fn default_commands_hz() -> f64 {
    DEFAULT_COMMANDS_HZ
}

fn default_true() -> bool {
    true
}

fn default_base_link() -> String {
    DEFAULT_FRAME_ID.to_string()
}

impl ArbiterNodeConfig {
    /// The part of the config the pure arbiter cares about.
    pub fn arbiter_config(&self) -> ArbiterConfig {
        ArbiterConfig::default()
            .with_commands_hz(self.commands_hz)
            .with_modes(
                BufferMode::from_buffered(self.cmd_vel_a_buffered),
                BufferMode::from_buffered(self.cmd_vel_b_buffered),
            )
            .with_frame_id(self.frame_id.clone())
    }

    /// The run limit as a `Duration`, if one is set.
    /// `validate` rejects limits that do not convert.
    pub fn run_duration(&self) -> Option<Duration> {
        self.duration_seconds
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Checks the node-only parts of the config. The arbiter part is checked
    /// by `Arbiter::new`.
    pub fn validate(&self) -> Result<(), NodeError> {
        if let Some(secs) = self.duration_seconds {
            if self.run_duration().is_none() {
                return Err(NodeError::InvalidRunDuration(secs));
            }
        }
        for (index, entry) in self.playback.iter().enumerate() {
            if entry.offset().is_none() {
                return Err(NodeError::InvalidPlaybackOffset {
                    index,
                    at: entry.at,
                });
            }
        }
        Ok(())
    }
}

// =========================================================================
// == Playback ==
// =========================================================================

/// One scripted command, fed into `stream` `at` seconds after startup.
/// Stands in for a real transport when running the node on its own.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PlaybackEntry {
    pub stream: Stream,
    /// Seconds after the playback worker starts.
    #[serde(default)]
    pub at: f64,
    #[serde(default)]
    pub linear: [f64; 3],
    #[serde(default)]
    pub angular: [f64; 3],
}

impl PlaybackEntry {
    pub fn command(&self) -> VelocityCommand {
        VelocityCommand::new(Vector3::from(self.linear), Vector3::from(self.angular))
    }

    pub fn offset(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.at).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arbiter_config_mapping() {
        let config = ArbiterNodeConfig {
            commands_hz: 5.0,
            cmd_vel_a_buffered: true,
            cmd_vel_b_buffered: false,
            frame_id: "odom".into(),
            ..Default::default()
        };
        let arbiter_config = config.arbiter_config();
        assert_eq!(arbiter_config.commands_hz, 5.0);
        assert_eq!(arbiter_config.a_mode, BufferMode::Buffered);
        assert_eq!(arbiter_config.b_mode, BufferMode::Unbuffered);
        assert_eq!(arbiter_config.frame_id, "odom");
    }

    #[test]
    fn test_playback_entry_command() {
        let entry = PlaybackEntry {
            stream: Stream::B,
            at: 0.5,
            linear: [1.0, 2.0, 3.0],
            angular: [4.0, 5.0, 6.0],
        };
        assert_eq!(
            entry.command(),
            VelocityCommand::from_components([1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        );
        assert_eq!(entry.offset(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_validate_rejects_negative_offset() {
        let config = ArbiterNodeConfig {
            playback: vec![
                PlaybackEntry {
                    stream: Stream::A,
                    at: 0.0,
                    linear: [0.0; 3],
                    angular: [0.0; 3],
                },
                PlaybackEntry {
                    stream: Stream::A,
                    at: -1.0,
                    linear: [0.0; 3],
                    angular: [0.0; 3],
                },
            ],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NodeError::InvalidPlaybackOffset { index: 1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unusable_run_duration() {
        let mut config = ArbiterNodeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.run_duration(), None);

        config.duration_seconds = Some(2.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.run_duration(), Some(Duration::from_secs(2)));

        for secs in [-5.0, f64::NAN, f64::INFINITY] {
            config.duration_seconds = Some(secs);
            assert!(
                matches!(config.validate(), Err(NodeError::InvalidRunDuration(_))),
                "duration {secs} should be rejected"
            );
        }
    }
}
