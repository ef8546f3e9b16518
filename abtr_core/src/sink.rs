// abtr_core/src/sink.rs

use crate::messages::StampedCommand;

/// The contract for anything that receives the merged output stream.
/// The node crate implements this over its event bus; a plain `Vec` is
/// enough for tests and offline replays.
pub trait CommandSink {
    fn publish(&mut self, command: &StampedCommand);
}

impl CommandSink for Vec<StampedCommand> {
    fn publish(&mut self, command: &StampedCommand) {
        self.push(command.clone());
    }
}
