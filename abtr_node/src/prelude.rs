// abtr_node/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the entire abtr_core prelude so you can easily access
// pure types like `VelocityCommand`, `Arbiter`, `CommandSink`, etc.
pub use abtr_core::prelude::*;

// Re-export common node-specific types for easy access in other plugins.
pub use crate::node::config::structs::{ArbiterNodeConfig, PlaybackEntry};
pub use crate::node::core::app_state::NodeSet;
pub use crate::node::core::events::MergedCommand;
pub use crate::node::core::resources::{
    ClockSource, NodeSettings, OutputSinks, PlaybackScript, RunDuration, SharedArbiter, TickTimer,
};
