/// The document's continuous scroll position as last reported by the host.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset: f64,
    /// Largest reachable offset (document length minus viewport length).
    pub max: f64,
}

impl ScrollState {
    pub fn clamp(&self, offset: f64) -> f64 {
        clamp_offset(offset, self.max)
    }
}

/// Clamps `offset` into `[0, max]`, mapping NaN to `0`.
pub(crate) fn clamp_offset(offset: f64, max: f64) -> f64 {
    if offset.is_nan() {
        return 0.0;
    }
    offset.min(max).max(0.0)
}

/// Which event path last wrote the active section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Source {
    /// Derived from the real scroll offset.
    UserScroll,
    /// Derived from a pointer on the index control.
    Programmatic,
}

/// The section currently considered "current".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSection {
    pub index: usize,
    pub source: Source,
}

/// Interaction phase of a [`crate::SyncController`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Idle,
    UserScrolling,
    Dragging,
    /// A command was issued outside of a drag and has not settled yet.
    ProgrammaticSeek,
}

/// A combined snapshot of everything the presentation layer renders.
///
/// This is useful for diffing between frames without holding a borrow of the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncSnapshot {
    pub scroll: ScrollState,
    pub active: Option<ActiveSection>,
    pub indicator_percent: f64,
    pub phase: Phase,
    pub suppressed: bool,
}
