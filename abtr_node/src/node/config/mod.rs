// abtr_node/src/node/config/mod.rs

//! This module handles loading and validating the node configuration from
//! disk and the environment.

pub mod structs;

use bevy::log::{info, warn};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use crate::cli::Cli;
use crate::errors::NodeError;
pub use structs::{ArbiterNodeConfig, PlaybackEntry};

/// Prefix for environment overrides, e.g. `ABTR_COMMANDS_HZ=20`.
pub const ENV_PREFIX: &str = "ABTR_";

/// Builds the layered figment: TOML file, then `ABTR_*` environment variables.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Loads the config file at `path`. A missing file is not an error: every
/// field has a default.
pub fn load_config(path: &Path) -> Result<ArbiterNodeConfig, NodeError> {
    if path.exists() {
        info!("Loading configuration from: {:?}", path);
    } else {
        warn!(
            "Config file not found at {:?}, using defaults and environment only.",
            path
        );
    }
    let config: ArbiterNodeConfig = figment_for(path).extract()?;
    config.validate()?;
    Ok(config)
}

/// File + environment + command line, in increasing priority. The merged
/// result is validated again, since flags can bring in new values.
pub fn resolve_config(cli: &Cli) -> Result<ArbiterNodeConfig, NodeError> {
    let mut config = load_config(&cli.config)?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use abtr_core::types::Stream;
    use clap::Parser;
    use figment::Jail;

    #[test]
    fn test_missing_file_gives_defaults() {
        Jail::expect_with(|_jail| {
            let config = load_config(Path::new("does_not_exist.toml")).unwrap();
            assert_eq!(config, ArbiterNodeConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "abtr.toml",
                r#"
                commands_hz = 20.0
                cmd_vel_a_buffered = true
                frame_id = "odom"

                [[playback]]
                stream = "B"
                at = 0.25
                linear = [0.5, 0.0, 0.0]

                [[playback]]
                stream = "A"
                angular = [0.0, 0.0, 1.0]
                "#,
            )?;
            jail.set_env("ABTR_COMMANDS_HZ", "40.0");

            let config = load_config(Path::new("abtr.toml")).unwrap();
            assert_eq!(config.commands_hz, 40.0);
            assert!(config.cmd_vel_a_buffered);
            assert!(config.cmd_vel_b_buffered);
            assert_eq!(config.frame_id, "odom");
            assert_eq!(config.playback.len(), 2);
            assert_eq!(config.playback[0].stream, Stream::B);
            assert_eq!(config.playback[0].at, 0.25);
            assert_eq!(config.playback[1].stream, Stream::A);
            assert_eq!(config.playback[1].at, 0.0);
            assert_eq!(config.playback[1].angular, [0.0, 0.0, 1.0]);
            Ok(())
        });
    }

    #[test]
    fn test_cli_beats_env_and_file() {
        Jail::expect_with(|jail| {
            jail.create_file("abtr.toml", "commands_hz = 20.0")?;
            jail.set_env("ABTR_COMMANDS_HZ", "40.0");

            let cli = Cli::parse_from(["abtr_node", "--config", "abtr.toml", "--commands-hz", "5"]);
            let config = resolve_config(&cli).unwrap();
            assert_eq!(config.commands_hz, 5.0);
            Ok(())
        });
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("abtr.toml", "command_hz = 20.0")?;
            let result = load_config(Path::new("abtr.toml"));
            assert!(matches!(result, Err(NodeError::Load(_))));
            Ok(())
        });
    }

    #[test]
    fn test_unknown_stream_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("abtr.toml", "[[playback]]\nstream = \"C\"\n")?;
            let result = load_config(Path::new("abtr.toml"));
            assert!(matches!(result, Err(NodeError::Load(_))));
            Ok(())
        });
    }

    #[test]
    fn test_negative_playback_offset_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("abtr.toml", "[[playback]]\nstream = \"A\"\nat = -2.0\n")?;
            let result = load_config(Path::new("abtr.toml"));
            assert!(matches!(
                result,
                Err(NodeError::InvalidPlaybackOffset { index: 0, .. })
            ));
            Ok(())
        });
    }

    #[test]
    fn test_negative_run_duration_in_file_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("abtr.toml", "duration_seconds = -3.0")?;
            let result = load_config(Path::new("abtr.toml"));
            assert!(matches!(result, Err(NodeError::InvalidRunDuration(d)) if d == -3.0));
            Ok(())
        });
    }

    #[test]
    fn test_bad_duration_flag_is_rejected_after_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file("abtr.toml", "duration_seconds = 3.0")?;

            let cli = Cli::parse_from(["abtr_node", "--config", "abtr.toml", "--duration", "-1"]);
            let result = resolve_config(&cli);
            assert!(matches!(result, Err(NodeError::InvalidRunDuration(d)) if d == -1.0));

            let cli = Cli::parse_from(["abtr_node", "--config", "abtr.toml", "--duration", "2.5"]);
            let config = resolve_config(&cli).unwrap();
            assert_eq!(config.duration_seconds, Some(2.5));
            Ok(())
        });
    }
}
