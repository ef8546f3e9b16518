// abtr_core/src/arbiter/mod.rs

//! The priority arbiter between the two command streams.
//!
//! Ingress may happen on any thread at any time. `tick` is called by a
//! single periodic driver. Each per-stream buffer and the LastKnownB slot
//! sit behind their own lock; the tick always takes them in the order
//! A, B, LastKnownB and B ingress takes B then LastKnownB, so the lock
//! graph has no cycles.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::buffer::CommandBuffer;
use crate::errors::ConfigError;
use crate::messages::{StampedCommand, VelocityCommand};
use crate::sink::CommandSink;
use crate::types::{Stream, TickSource};

mod config;
mod ingress;

pub use config::{ArbiterConfig, DEFAULT_COMMANDS_HZ, DEFAULT_FRAME_ID};
pub use ingress::IngressPort;

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// 1-based tick counter.
    pub index: u64,
    pub source: TickSource,
    /// The emitted command, if any. At most one per tick.
    pub output: Option<StampedCommand>,
    /// True if A won and a B entry was dropped to keep B's backlog in check.
    pub discarded_b: bool,
}

impl TickReport {
    pub fn emitted(&self) -> bool {
        self.output.is_some()
    }
}

/// A consistent view of the arbiter's buffers at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSnapshot {
    pub a_len: usize,
    pub b_len: usize,
    pub last_known_b: Option<VelocityCommand>,
}

/// Arbitrates between stream A and stream B.
#[derive(Debug)]
pub struct Arbiter {
    config: ArbiterConfig,
    period: Duration,
    buffer_a: Mutex<CommandBuffer>,
    buffer_b: Mutex<CommandBuffer>,
    last_known_b: Mutex<Option<VelocityCommand>>,
    ticks: AtomicU64,
}

/// The guarded data are plain values that stay valid even if a holder
/// panicked, so a poisoned lock is simply taken over.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Arbiter {
    /// Validates the configuration and builds an arbiter with empty buffers.
    pub fn new(config: ArbiterConfig) -> Result<Self, ConfigError> {
        let period = config.validate()?;
        Ok(Self {
            buffer_a: Mutex::new(CommandBuffer::new(config.a_mode)),
            buffer_b: Mutex::new(CommandBuffer::new(config.b_mode)),
            last_known_b: Mutex::new(None),
            ticks: AtomicU64::new(0),
            period,
            config,
        })
    }

    /// Time between two ticks, derived from `commands_hz`.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    // --- Ingress ---

    /// Appends `command` to the tail of `stream`'s buffer.
    /// For stream B the LastKnownB slot is refreshed as well.
    pub fn ingress(&self, stream: Stream, command: VelocityCommand) {
        match stream {
            Stream::A => lock(&self.buffer_a).push_back(command),
            Stream::B => {
                let mut buffer_b = lock(&self.buffer_b);
                buffer_b.push_back(command);
                *lock(&self.last_known_b) = Some(command);
            }
        }
    }

    pub fn on_command_a(&self, command: VelocityCommand) {
        self.ingress(Stream::A, command);
    }

    pub fn on_command_b(&self, command: VelocityCommand) {
        self.ingress(Stream::B, command);
    }

    /// A cloneable handle bound to one stream, for transport threads.
    pub fn ingress_port(self: &Arc<Self>, stream: Stream) -> IngressPort {
        IngressPort::new(Arc::clone(self), stream)
    }

    // --- Arbitration ---

    /// Runs one arbitration step and stamps the chosen command with
    /// `timestamp` and the configured frame.
    ///
    /// Priority is A, then B, then the one-shot LastKnownB fallback.
    pub fn tick(&self, timestamp: f64) -> TickReport {
        let index = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;

        let mut buffer_a = lock(&self.buffer_a);
        let mut buffer_b = lock(&self.buffer_b);

        let mut discarded_b = false;
        let (source, command) = if let Some(command) = buffer_a.take_next() {
            // A wins; B loses one head entry without emitting it.
            discarded_b = buffer_b.pop_front().is_some();
            (TickSource::StreamA, Some(command))
        } else if let Some(command) = buffer_b.take_next() {
            (TickSource::StreamB, Some(command))
        } else {
            match lock(&self.last_known_b).take() {
                Some(command) => (TickSource::Fallback, Some(command)),
                None => (TickSource::Idle, None),
            }
        };

        drop(buffer_b);
        drop(buffer_a);

        TickReport {
            index,
            source,
            output: command.map(|command| StampedCommand {
                command,
                timestamp,
                frame_id: self.config.frame_id.clone(),
            }),
            discarded_b,
        }
    }

    /// Runs a tick and hands its output, if any, to `sink`.
    pub fn tick_into(&self, timestamp: f64, sink: &mut dyn CommandSink) -> TickReport {
        let report = self.tick(timestamp);
        if let Some(output) = &report.output {
            sink.publish(output);
        }
        report
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        let buffer_a = lock(&self.buffer_a);
        let buffer_b = lock(&self.buffer_b);
        let last_known_b = *lock(&self.last_known_b);
        BufferSnapshot {
            a_len: buffer_a.len(),
            b_len: buffer_b.len(),
            last_known_b,
        }
    }
}
