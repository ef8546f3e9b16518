// abtr_node/src/node/core/resources.rs

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use abtr_core::arbiter::{Arbiter, IngressPort};
use abtr_core::sink::CommandSink;
use abtr_core::types::Stream;
use bevy::prelude::{Resource, Time, Timer, TimerMode};

use crate::node::config::structs::PlaybackEntry;

/// The arbiter shared between the tick system and every ingress producer.
#[derive(Resource, Clone)]
pub struct SharedArbiter(pub Arc<Arbiter>);

impl SharedArbiter {
    pub fn port(&self, stream: Stream) -> IngressPort {
        self.0.ingress_port(stream)
    }
}

/// Fires once per arbitration period.
#[derive(Resource, Debug)]
pub struct TickTimer(pub Timer);

impl TickTimer {
    pub fn from_period(period: Duration) -> Self {
        Self(Timer::new(period, TimerMode::Repeating))
    }
}

/// How long the schedule runner sleeps between frames. A few frames per
/// period keeps tick jitter well under one period without busy-looping.
pub fn runner_wait(period: Duration) -> Duration {
    (period / 4).max(Duration::from_millis(1)).min(period)
}

/// Where emission timestamps come from.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClockSource {
    /// Seconds since the UNIX epoch.
    #[default]
    WallClock,
    /// Seconds since the app started, from Bevy's `Time`. Deterministic in tests.
    AppElapsed,
}

impl ClockSource {
    pub fn now(&self, time: &Time) -> f64 {
        match self {
            ClockSource::WallClock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64())
                .unwrap_or_default(),
            ClockSource::AppElapsed => time.elapsed_secs_f64(),
        }
    }
}

/// Runtime switches that are not part of the arbiter itself.
#[derive(Resource, Debug, Clone, Default)]
pub struct NodeSettings {
    /// Per-tick reports go to `info` instead of `debug`.
    pub stats_logged: bool,
}

/// Every destination of the merged stream.
#[derive(Resource, Default)]
pub struct OutputSinks(pub Vec<Box<dyn CommandSink + Send + Sync>>);

impl OutputSinks {
    pub fn add(&mut self, sink: impl CommandSink + Send + Sync + 'static) {
        self.0.push(Box::new(sink));
    }
}

/// Scripted ingress to replay after startup.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlaybackScript(pub Vec<PlaybackEntry>);

/// Optional limit on how long the node runs.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct RunDuration(pub Option<Duration>);
