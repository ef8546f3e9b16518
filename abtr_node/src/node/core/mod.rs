// abtr_node/src/node/core/mod.rs

pub mod app_state;
pub mod events;
pub mod resources;
