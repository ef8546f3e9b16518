// abtr_node/src/lib.rs

use std::sync::Arc;

use bevy::prelude::*;

use abtr_core::arbiter::Arbiter;

// Import the plugins defined within the node crate.
use crate::node::config::structs::ArbiterNodeConfig;
use crate::node::core::resources::{
    ClockSource, NodeSettings, PlaybackScript, RunDuration, SharedArbiter, TickTimer,
};
use crate::node::plugins::arbitration::ArbitrationPlugin;
use crate::node::plugins::lifecycle::LifecyclePlugin;
use crate::node::plugins::output::OutputPlugin;
use crate::node::plugins::playback::PlaybackPlugin;

// This prelude is for convenience for other files WITHIN the abtr_node crate.
pub mod prelude;

pub mod cli;
pub mod errors;
// This module contains all the node-specific logic.
pub mod node;

/// The main plugin that brings together all the node parts.
/// `main.rs` builds the arbiter, then adds this one plugin to the Bevy App.
pub struct AbtrNodePlugin {
    arbiter: Arc<Arbiter>,
    config: ArbiterNodeConfig,
}

impl AbtrNodePlugin {
    pub fn new(arbiter: Arc<Arbiter>, config: ArbiterNodeConfig) -> Self {
        Self { arbiter, config }
    }
}

impl Plugin for AbtrNodePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SharedArbiter(Arc::clone(&self.arbiter)))
            .insert_resource(TickTimer::from_period(self.arbiter.period()))
            .insert_resource(ClockSource::WallClock)
            .insert_resource(NodeSettings {
                stats_logged: self.config.stats_logged,
            })
            .insert_resource(PlaybackScript(self.config.playback.clone()))
            .insert_resource(RunDuration(self.config.run_duration()))
            .add_plugins((
                // Runs the arbiter at commands_hz.
                ArbitrationPlugin,
                // Fans merged commands out to sinks.
                OutputPlugin,
                // Scripted ingress for standalone runs.
                PlaybackPlugin,
                // Run limit and shutdown report.
                LifecyclePlugin,
            ));
    }
}
