// abtr_node/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

use crate::node::config::structs::ArbiterNodeConfig;

/// abtr: merges two velocity command streams into one, A over B.
///
/// Values given here win over the config file and `ABTR_*` environment
/// variables.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the TOML configuration file. A missing file means defaults.
    #[arg(short, long, default_value = "config/abtr.toml")]
    pub config: PathBuf,

    /// Output rate in Hz.
    #[arg(long, allow_hyphen_values = true)]
    pub commands_hz: Option<f64>,

    /// Keep stream A's backlog across ticks (`true`/`false`).
    #[arg(long)]
    pub a_buffered: Option<bool>,

    /// Keep stream B's backlog across ticks (`true`/`false`).
    #[arg(long)]
    pub b_buffered: Option<bool>,

    /// Log every tick's decision at info level.
    #[arg(long, default_value_t = false)]
    pub stats_logged: bool,

    /// Stop after this many seconds instead of waiting for Ctrl-C.
    #[arg(long, allow_hyphen_values = true)]
    pub duration: Option<f64>,
}

impl Cli {
    /// Layers the command-line values on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut ArbiterNodeConfig) {
        if let Some(hz) = self.commands_hz {
            config.commands_hz = hz;
        }
        if let Some(buffered) = self.a_buffered {
            config.cmd_vel_a_buffered = buffered;
        }
        if let Some(buffered) = self.b_buffered {
            config.cmd_vel_b_buffered = buffered;
        }
        if self.stats_logged {
            config.stats_logged = true;
        }
        if let Some(duration) = self.duration {
            config.duration_seconds = Some(duration);
        }
    }
}
