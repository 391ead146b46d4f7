use alphascroll::ControlRect;

/// The scrollable document, as seen by an adapter.
///
/// `scroll_to` is fire-and-forget: the document is expected to report the resulting offset back
/// through a regular scroll event on a later turn of the event loop.
pub trait ScrollHost {
    fn scroll_offset(&self) -> f64;

    /// Largest reachable offset (document length minus viewport length).
    fn scroll_max(&self) -> f64;

    fn scroll_to(&mut self, offset: f64);
}

/// Layout measurements supplied by the presentation layer.
///
/// Every method returns `None` while the corresponding element has not been laid out.
pub trait SectionMeasurer<K> {
    /// Document offset of the section's top edge.
    fn section_start(&self, key: &K) -> Option<f64>;

    /// Document offset of the end of the last section.
    fn list_end(&self) -> Option<f64>;

    /// The index control's extent in client coordinates.
    fn control_rect(&self) -> Option<ControlRect>;
}
