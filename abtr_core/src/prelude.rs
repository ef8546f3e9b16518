// abtr_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::sink::CommandSink;

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::buffer::{BufferMode, CommandBuffer};
pub use crate::messages::{StampedCommand, VelocityCommand};
pub use crate::types::{Stream, TickSource};

// --- The Arbiter itself ---
pub use crate::arbiter::{Arbiter, ArbiterConfig, BufferSnapshot, IngressPort, TickReport};

// --- Errors ---
pub use crate::errors::ConfigError;
