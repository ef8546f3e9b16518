// abtr_node/src/node/core/app_state.rs

use bevy::ecs::schedule::SystemSet;

// =========================================================================
// == Main Node Sets (The "Data Flow Graph") ==
// =========================================================================

/// Ordering of the node's `Update` systems within one frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeSet {
    /// Decide whether this frame is a tick and, if so, run the arbiter.
    Arbitration,
    /// Forward merged commands to every registered sink. Runs after arbitration.
    Output,
    /// Run-limit checks. Runs last.
    Lifecycle,
}
