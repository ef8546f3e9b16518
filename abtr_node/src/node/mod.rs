// abtr_node/src/node/mod.rs

pub mod config;
pub mod core;
pub mod plugins;
