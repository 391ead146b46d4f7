use alloc::vec::Vec;

use alphascroll::{ControlRect, SectionKey};

use crate::{ScrollHost, SectionMeasurer};

/// An in-memory document for tests and demos.
///
/// Sections are stacked below an optional header in the order given. `scroll_to` moves the
/// document immediately and queues the scroll events a real platform would deliver afterwards;
/// with a non-zero overshoot, a first event lands past the target before a second one settles.
#[derive(Clone, Debug)]
pub struct SimulatedDocument<K> {
    sections: Vec<(K, f64)>,
    list_end: f64,
    viewport: f64,
    control: Option<ControlRect>,
    laid_out: bool,
    offset: f64,
    overshoot: f64,
    pending_events: Vec<f64>,
    commands: Vec<f64>,
}

impl<K: SectionKey> SimulatedDocument<K> {
    /// Lays out sections of the given heights below a `header` of fixed height.
    pub fn from_heights(
        header: f64,
        heights: impl IntoIterator<Item = (K, f64)>,
        viewport: f64,
    ) -> Self {
        let mut sections = Vec::new();
        let mut off = header;
        for (key, height) in heights {
            sections.push((key, off));
            off += height.max(0.0);
        }
        Self {
            sections,
            list_end: off,
            viewport,
            control: None,
            laid_out: true,
            offset: 0.0,
            overshoot: 0.0,
            pending_events: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn with_control(mut self, rect: ControlRect) -> Self {
        self.control = Some(rect);
        self
    }

    /// Extra distance the first event after a command travels past the target.
    pub fn with_overshoot(mut self, overshoot: f64) -> Self {
        self.overshoot = overshoot;
        self
    }

    /// Simulates the window before layout ran: every measurement reports `None`.
    pub fn set_laid_out(&mut self, laid_out: bool) {
        self.laid_out = laid_out;
    }

    /// Moves the document as if the user scrolled it. Returns the clamped offset.
    pub fn user_scroll(&mut self, offset: f64) -> f64 {
        self.offset = self.clamp(offset);
        self.offset
    }

    /// Drains the scroll events queued by `scroll_to`, oldest first.
    pub fn take_scroll_events(&mut self) -> Vec<f64> {
        core::mem::take(&mut self.pending_events)
    }

    /// Every offset passed to `scroll_to`, in order.
    pub fn commands(&self) -> &[f64] {
        &self.commands
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.sections.iter().map(|(k, _)| k)
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.min(self.scroll_max()).max(0.0)
    }
}

impl<K: SectionKey> ScrollHost for SimulatedDocument<K> {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn scroll_max(&self) -> f64 {
        (self.list_end - self.viewport).max(0.0)
    }

    fn scroll_to(&mut self, offset: f64) {
        self.commands.push(offset);
        let target = self.clamp(offset);
        if self.overshoot != 0.0 {
            self.pending_events.push(self.clamp(target + self.overshoot));
        }
        self.pending_events.push(target);
        self.offset = target;
    }
}

impl<K: SectionKey> SectionMeasurer<K> for SimulatedDocument<K> {
    fn section_start(&self, key: &K) -> Option<f64> {
        if !self.laid_out {
            return None;
        }
        self.sections
            .iter()
            .find(|(k, _)| k == key)
            .map(|&(_, start)| start)
    }

    fn list_end(&self) -> Option<f64> {
        self.laid_out.then_some(self.list_end)
    }

    fn control_rect(&self) -> Option<ControlRect> {
        if !self.laid_out {
            return None;
        }
        self.control
    }
}
