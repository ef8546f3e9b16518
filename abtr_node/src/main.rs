// abtr_node/src/main.rs

//! Headless arbiter node.
//!
//! 1. Resolve the configuration (file, `ABTR_*` env, command line).
//! 2. Build and validate the arbiter. An invalid rate stops here.
//! 3. Run a Bevy app whose loop ticks the arbiter at `commands_hz` until
//!    Ctrl-C or the configured duration.
//!
//! `cargo run -p abtr_node -- --config config/abtr.toml --stats-logged`

use std::process::ExitCode;
use std::sync::Arc;

use bevy::app::{ScheduleRunnerPlugin, TerminalCtrlCHandlerPlugin};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;

use abtr_core::arbiter::Arbiter;
use abtr_node::cli::Cli;
use abtr_node::errors::NodeError;
use abtr_node::node::config::{resolve_config, ArbiterNodeConfig};
use abtr_node::node::core::resources::{runner_wait, OutputSinks};
use abtr_node::node::plugins::output::LogSink;
use abtr_node::AbtrNodePlugin;

fn build(cli: &Cli) -> Result<(ArbiterNodeConfig, Arc<Arbiter>), NodeError> {
    let config = resolve_config(cli)?;
    let arbiter = Arbiter::new(config.arbiter_config())?;
    Ok((config, Arc::new(arbiter)))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // --- 1. Configuration. Nothing starts if this fails. ---
    let (config, arbiter) = match build(&cli) {
        Ok(built) => built,
        Err(e) => {
            eprintln!("abtr_node: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new();

    // --- 2. Core Bevy plugins: no window, a loop paced by the tick period ---
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(runner_wait(arbiter.period()))),
    )
    .add_plugins(LogPlugin {
        level: bevy::log::Level::INFO,
        // Per-tick lines are `debug` unless `stats_logged` raises them.
        filter: "info".to_string(),
        ..default()
    })
    .add_plugins(TerminalCtrlCHandlerPlugin);

    info!("commands_hz={}", config.commands_hz);
    info!("cmd_vel_a_buffered={}", config.cmd_vel_a_buffered);
    info!("cmd_vel_b_buffered={}", config.cmd_vel_b_buffered);
    info!("stats_logged={}", config.stats_logged);
    info!("frame_id={}", config.frame_id);

    // --- 3. The arbiter node itself ---
    app.add_plugins(AbtrNodePlugin::new(arbiter, config));
    app.world_mut().resource_mut::<OutputSinks>().add(LogSink);

    match app.run() {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(code) => ExitCode::from(code.get()),
    }
}
