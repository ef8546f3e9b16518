// abtr_core/src/types.rs

/// Identifies one of the two inbound command streams.
/// `A` always has priority over `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub enum Stream {
    A,
    B,
}

/// Which rule produced the output of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSource {
    /// Stream A had data and won the tick.
    StreamA,
    /// Stream A was empty, stream B had data.
    StreamB,
    /// Both buffers were empty; the cached last B command was republished.
    Fallback,
    /// Nothing was available. No command was emitted.
    Idle,
}

impl TickSource {
    /// Short label used in per-tick log lines ("A", "B", "LAST", "NULL").
    pub fn label(&self) -> &'static str {
        match self {
            TickSource::StreamA => "A",
            TickSource::StreamB => "B",
            TickSource::Fallback => "LAST",
            TickSource::Idle => "NULL",
        }
    }
}
