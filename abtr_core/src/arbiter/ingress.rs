// abtr_core/src/arbiter/ingress.rs

use std::sync::Arc;

use crate::arbiter::Arbiter;
use crate::messages::VelocityCommand;
use crate::types::Stream;

/// A handle that feeds one stream of a shared `Arbiter`.
/// Cheap to clone; every clone targets the same buffers.
#[derive(Debug, Clone)]
pub struct IngressPort {
    arbiter: Arc<Arbiter>,
    stream: Stream,
}

impl IngressPort {
    pub(crate) fn new(arbiter: Arc<Arbiter>, stream: Stream) -> Self {
        Self { arbiter, stream }
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }

    /// Never blocks beyond the buffer's lock, never fails.
    pub fn send(&self, command: VelocityCommand) {
        self.arbiter.ingress(self.stream, command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::ArbiterConfig;
    use crate::buffer::BufferMode;
    use crate::types::TickSource;
    use std::thread;

    fn cmd(x: f64) -> VelocityCommand {
        VelocityCommand::from_components([x, 0.0, 0.0, 0.0, 0.0, 0.0])
    }

    #[test]
    fn test_port_targets_its_stream() {
        let arbiter = Arc::new(Arbiter::new(ArbiterConfig::default()).unwrap());
        let port_a = arbiter.ingress_port(Stream::A);
        let port_b = arbiter.ingress_port(Stream::B);
        assert_eq!(port_a.stream(), Stream::A);

        port_b.send(cmd(2.0));
        port_a.send(cmd(1.0));

        let snap = arbiter.snapshot();
        assert_eq!((snap.a_len, snap.b_len), (1, 1));
        assert_eq!(snap.last_known_b, Some(cmd(2.0)));
    }

    #[test]
    fn test_concurrent_ingress_keeps_per_stream_fifo() {
        const PER_THREAD: usize = 200;

        let config = ArbiterConfig::default().with_modes(BufferMode::Buffered, BufferMode::Buffered);
        let arbiter = Arc::new(Arbiter::new(config).unwrap());

        // Each producer tags commands with its id in `linear.y` and a
        // sequence number in `linear.x`.
        let producers: Vec<_> = (0..4)
            .map(|id| {
                let port = arbiter.ingress_port(Stream::B);
                thread::spawn(move || {
                    for seq in 0..PER_THREAD {
                        port.send(VelocityCommand::from_components([
                            seq as f64, id as f64, 0.0, 0.0, 0.0, 0.0,
                        ]));
                    }
                })
            })
            .collect();

        let mut emitted = Vec::new();
        let mut t = 0.0;
        while emitted.len() < 4 * PER_THREAD {
            let report = arbiter.tick(t);
            t += 0.01;
            match report.source {
                TickSource::StreamB => emitted.push(report.output.unwrap().command),
                // Both empty for a moment while producers are still starting up.
                TickSource::Fallback | TickSource::Idle => {}
                TickSource::StreamA => panic!("nothing was sent on A"),
            }
            if producers.iter().all(|p| p.is_finished()) && arbiter.snapshot().b_len == 0 {
                break;
            }
        }
        for producer in producers {
            producer.join().unwrap();
        }
        while arbiter.snapshot().b_len > 0 {
            emitted.push(arbiter.tick(t).output.unwrap().command);
        }

        assert_eq!(emitted.len(), 4 * PER_THREAD);
        for id in 0..4 {
            let seqs: Vec<f64> = emitted
                .iter()
                .filter(|c| c.linear.y == id as f64)
                .map(|c| c.linear.x)
                .collect();
            let expected: Vec<f64> = (0..PER_THREAD).map(|s| s as f64).collect();
            assert_eq!(seqs, expected, "producer {id} lost FIFO order");
        }
    }
}
