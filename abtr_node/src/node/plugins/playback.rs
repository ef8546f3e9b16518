// abtr_node/src/node/plugins/playback.rs

//! A scripted command source. It plays the `[[playback]]` entries of the
//! config into the arbiter from its own thread, the same way a transport
//! callback would, so the node can be exercised without any middleware.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use bevy::prelude::*;

use abtr_core::arbiter::IngressPort;
use abtr_core::types::Stream;

use crate::node::config::structs::PlaybackEntry;
use crate::node::core::resources::{PlaybackScript, SharedArbiter};

/// Longest single sleep of the worker, so a stop request is seen promptly.
const STOP_POLL: Duration = Duration::from_millis(10);

pub struct PlaybackPlugin;

impl Plugin for PlaybackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlaybackScript>()
            .add_systems(Startup, spawn_playback_worker)
            .add_systems(Last, stop_playback_on_exit);
    }
}

/// The running playback thread and its stop flag.
#[derive(Resource)]
pub struct PlaybackWorker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<usize>>,
}

impl PlaybackWorker {
    /// Signals the thread and waits for it. Returns how many commands it sent.
    pub fn stop(&mut self) -> Option<usize> {
        self.stop.store(true, Ordering::Relaxed);
        self.handle.take().and_then(|handle| handle.join().ok())
    }
}

fn spawn_playback_worker(
    mut commands: Commands,
    script: Res<PlaybackScript>,
    arbiter: Res<SharedArbiter>,
) {
    if script.0.is_empty() {
        info!("No playback script configured; waiting for external ingress.");
        return;
    }

    let entries = script.0.clone();
    let port_a = arbiter.port(Stream::A);
    let port_b = arbiter.port(Stream::B);
    let stop = Arc::new(AtomicBool::new(false));
    let thread_stop = Arc::clone(&stop);

    info!("Starting playback of {} scripted command(s).", entries.len());
    let spawned = thread::Builder::new()
        .name("abtr-playback".to_string())
        .spawn(move || run_playback(entries, &port_a, &port_b, &thread_stop));

    match spawned {
        Ok(handle) => commands.insert_resource(PlaybackWorker {
            stop,
            handle: Some(handle),
        }),
        Err(e) => error!("Failed to start playback thread: {}. Continuing without it.", e),
    }
}

fn stop_playback_on_exit(
    mut exit: EventReader<AppExit>,
    worker: Option<ResMut<PlaybackWorker>>,
) {
    if exit.read().next().is_none() {
        return;
    }
    if let Some(mut worker) = worker {
        if let Some(sent) = worker.stop() {
            info!("Playback stopped after sending {} command(s).", sent);
        }
    }
}

/// Feeds `entries` into the matching ports at their offsets, measured from
/// the moment this is called. Entries are played in offset order; equal
/// offsets keep their config order. Returns the number of commands sent.
pub fn run_playback(
    mut entries: Vec<PlaybackEntry>,
    port_a: &IngressPort,
    port_b: &IngressPort,
    stop: &AtomicBool,
) -> usize {
    entries.sort_by(|l, r| l.at.total_cmp(&r.at));

    let start = Instant::now();
    let mut sent = 0;
    for entry in entries {
        let due = start + entry.offset().unwrap_or(Duration::ZERO);
        loop {
            if stop.load(Ordering::Relaxed) {
                return sent;
            }
            let now = Instant::now();
            if now >= due {
                break;
            }
            thread::sleep((due - now).min(STOP_POLL));
        }

        match entry.stream {
            Stream::A => port_a.send(entry.command()),
            Stream::B => port_b.send(entry.command()),
        }
        sent += 1;
    }
    sent
}
