// abtr_core/src/lib.rs

// This file defines the public modules of the library.
pub mod arbiter;
pub mod buffer;
pub mod errors;
pub mod messages;
pub mod prelude;
pub mod sink;
pub mod types;
