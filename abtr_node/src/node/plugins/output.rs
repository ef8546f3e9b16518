// abtr_node/src/node/plugins/output.rs

use bevy::prelude::*;

use abtr_core::messages::StampedCommand;
use abtr_core::sink::CommandSink;

use crate::node::core::{app_state::NodeSet, events::MergedCommand, resources::OutputSinks};

pub struct OutputPlugin;

impl Plugin for OutputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OutputSinks>()
            .add_systems(Update, publish_merged_commands.in_set(NodeSet::Output));
    }
}

/// Hands each merged command to every registered sink, in emission order.
pub fn publish_merged_commands(
    mut merged: EventReader<MergedCommand>,
    mut sinks: ResMut<OutputSinks>,
) {
    for MergedCommand(command) in merged.read() {
        for sink in sinks.0.iter_mut() {
            sink.publish(command);
        }
    }
}

/// A sink that writes each merged command to the log. Used when the node runs
/// without a real transport attached.
#[derive(Debug, Default, Clone)]
pub struct LogSink;

impl CommandSink for LogSink {
    fn publish(&mut self, command: &StampedCommand) {
        let lin = command.command.linear;
        let ang = command.command.angular;
        debug!(
            "cmd_vel [{} @ {:.3}] linear=({:.3}, {:.3}, {:.3}) angular=({:.3}, {:.3}, {:.3})",
            command.frame_id, command.timestamp, lin.x, lin.y, lin.z, ang.x, ang.y, ang.z
        );
    }
}
