// abtr_node/src/node/plugins/arbitration.rs

use bevy::log::Level;
use bevy::prelude::*;

use abtr_core::arbiter::TickReport;
use abtr_core::messages::StampedCommand;
use abtr_core::sink::CommandSink;

use crate::node::core::{
    app_state::NodeSet,
    events::MergedCommand,
    resources::{ClockSource, NodeSettings, SharedArbiter, TickTimer},
};

// =========================================================================
// == Arbitration Plugin ==
// =========================================================================

/// Runs the arbiter once every time the `TickTimer` fires.
///
/// Expects `SharedArbiter`, `TickTimer`, `ClockSource` and `NodeSettings`
/// to be inserted by the caller (see `AbtrNodePlugin`).
pub struct ArbitrationPlugin;

impl Plugin for ArbitrationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MergedCommand>()
            .configure_sets(
                Update,
                (NodeSet::Arbitration, NodeSet::Output, NodeSet::Lifecycle).chain(),
            )
            .add_systems(Update, arbitration_tick_system.in_set(NodeSet::Arbitration));
    }
}

/// Adapts the Bevy event writer to the core `CommandSink` contract.
struct EventSink<'a, 'w> {
    writer: &'a mut EventWriter<'w, MergedCommand>,
}

impl CommandSink for EventSink<'_, '_> {
    fn publish(&mut self, command: &StampedCommand) {
        self.writer.write(MergedCommand(command.clone()));
    }
}

/// The periodic tick. Late frames never cause catch-up ticks: if the timer
/// finished several times since the last frame, one tick runs and the rest
/// are dropped.
pub fn arbitration_tick_system(
    time: Res<Time>,
    clock: Res<ClockSource>,
    settings: Res<NodeSettings>,
    arbiter: Res<SharedArbiter>,
    mut timer: ResMut<TickTimer>,
    mut writer: EventWriter<MergedCommand>,
) {
    timer.0.tick(time.delta());
    if !timer.0.just_finished() {
        return;
    }

    let skipped = timer.0.times_finished_this_tick().saturating_sub(1);
    if skipped > 0 {
        debug!("Host fell behind: skipping {} arbitration tick(s)", skipped);
    }

    let mut sink = EventSink {
        writer: &mut writer,
    };
    let report = arbiter.0.tick_into(clock.now(&time), &mut sink);
    log_tick_report(&report, settings.stats_logged);
}

/// One line per tick: index, source, then `lin.x lin.y ang.z`.
fn log_tick_report(report: &TickReport, stats_logged: bool) {
    let (level, line) = tick_log_line(report, stats_logged);
    if level == Level::INFO {
        info!("{}", line);
    } else {
        debug!("{}", line);
    }
}

/// Level and text of the per-tick line. Ticks only show at the default
/// `info` filter when `stats_logged` is set.
pub fn tick_log_line(report: &TickReport, stats_logged: bool) -> (Level, String) {
    let line = match &report.output {
        Some(out) => format!(
            "{} {} {:.6} {:.6} {:.6}",
            report.index,
            report.source.label(),
            out.command.linear.x,
            out.command.linear.y,
            out.command.angular.z
        ),
        None => format!("{} {}", report.index, report.source.label()),
    };
    let level = if stats_logged { Level::INFO } else { Level::DEBUG };
    (level, line)
}
