/// Which kind of pointer produced an event on the index control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// How the indicator percentage is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndicatorStyle {
    /// Moves smoothly through each section as the document scrolls.
    #[default]
    Continuous,
    /// Snaps to the start of the active section's row.
    Discrete,
}

/// The index control's extent along the scroll axis, in client coordinates.
///
/// Pointer positions passed to the controller must use the same coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlRect {
    pub start: f64,
    pub length: f64,
}

impl ControlRect {
    pub fn new(start: f64, length: f64) -> Self {
        Self { start, length }
    }

    pub fn end(&self) -> f64 {
        self.start + self.length
    }

    /// Returns `false` when the control has not been laid out yet.
    pub fn is_measurable(&self) -> bool {
        self.length.is_finite() && self.length > 0.0
    }
}

/// Where a pointer landed on the index control.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlHit {
    /// Section rank under the pointer.
    pub index: usize,
    /// Position inside that section's row, in `[0, 1]`.
    pub fraction: f64,
    /// Position inside the whole control, in `[0, 100]`.
    pub percent: f64,
}

/// A request for the host to move the document.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollCommand {
    /// Destination scroll offset, already clamped to the document's scroll range.
    pub offset: f64,
    /// The section the command seeks into.
    pub index: usize,
}
