// abtr_core/src/buffer.rs

use std::collections::VecDeque;

use crate::messages::VelocityCommand;

/// Retention policy of a stream's buffer, fixed when the arbiter is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferMode {
    /// Every received command is kept until a tick consumes it.
    Buffered,
    /// After a successful read, whatever else is queued is dropped.
    #[default]
    Unbuffered,
}

impl BufferMode {
    pub fn from_buffered(buffered: bool) -> Self {
        if buffered {
            BufferMode::Buffered
        } else {
            BufferMode::Unbuffered
        }
    }

    pub fn is_buffered(&self) -> bool {
        matches!(self, BufferMode::Buffered)
    }
}

/// An unbounded FIFO of commands for one stream.
///
/// The mode never affects `push_back`; it only decides what `take_next`
/// leaves behind.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    mode: BufferMode,
    queue: VecDeque<VelocityCommand>,
}

impl CommandBuffer {
    pub fn new(mode: BufferMode) -> Self {
        Self {
            mode,
            queue: VecDeque::new(),
        }
    }

    pub fn push_back(&mut self, command: VelocityCommand) {
        self.queue.push_back(command);
    }

    pub fn pop_front(&mut self) -> Option<VelocityCommand> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pops the head. In `Unbuffered` mode a successful pop also drops
    /// everything still queued behind it.
    pub fn take_next(&mut self) -> Option<VelocityCommand> {
        let head = self.queue.pop_front()?;
        if !self.mode.is_buffered() {
            self.queue.clear();
        }
        Some(head)
    }
}
