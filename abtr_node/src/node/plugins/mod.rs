// abtr_node/src/node/plugins/mod.rs

pub mod arbitration;
pub mod lifecycle;
pub mod output;
pub mod playback;
