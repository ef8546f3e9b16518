// abtr_node/src/node/core/events.rs
use bevy::prelude::Event;
// Import the pure data struct from the core library
use abtr_core::messages::StampedCommand;

// This is the Bevy-specific event. It can derive `Event`.
#[derive(Event, Clone, Debug)]
pub struct MergedCommand(pub StampedCommand); // It's a simple "tuple-struct" wrapper
