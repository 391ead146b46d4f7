use alloc::string::String;
use alloc::vec::Vec;

use alphascroll::{BoundsError, PointerKind, SectionKey, SyncController, SyncOptions};

use crate::{ScrollHost, SectionMeasurer};

/// Why [`IndexBar::attach`] did not attach yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeferReason {
    NoSections,
    ControlNotMeasured,
    Bounds(BoundsError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttachOutcome {
    Attached,
    /// Retry on a later frame, once layout has settled.
    Deferred(DeferReason),
}

impl AttachOutcome {
    pub fn is_attached(&self) -> bool {
        matches!(self, Self::Attached)
    }
}

/// A framework-neutral index bar that wraps an [`alphascroll::SyncController`] and applies its
/// scroll commands to a [`ScrollHost`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `attach` once the section list is known (and again whenever `Deferred` is returned)
/// - `remeasure` after the document was laid out again
/// - `on_scroll` / `on_pointer_*` / `on_hover` when UI events occur
/// - `tick(now_ms)` once per display frame
///
/// Events are ignored until an `attach` succeeds.
#[derive(Clone, Debug)]
pub struct IndexBar<K = String> {
    c: SyncController<K>,
    sections: Vec<K>,
    attached: bool,
}

impl<K: SectionKey> IndexBar<K> {
    pub fn new(options: SyncOptions<K>) -> Self {
        Self {
            c: SyncController::new(options),
            sections: Vec::new(),
            attached: false,
        }
    }

    /// Wraps an existing controller; if it already has bounds, the bar starts attached.
    pub fn from_controller(c: SyncController<K>) -> Self {
        let sections = c.bounds().map(|b| b.keys().to_vec()).unwrap_or_default();
        let attached = c.is_ready();
        Self {
            c,
            sections,
            attached,
        }
    }

    pub fn controller(&self) -> &SyncController<K> {
        &self.c
    }

    pub fn controller_mut(&mut self) -> &mut SyncController<K> {
        &mut self.c
    }

    pub fn into_controller(self) -> SyncController<K> {
        self.c
    }

    pub fn sections(&self) -> &[K] {
        &self.sections
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Installs a new section list and tries to attach.
    ///
    /// Refuses while the list is empty or any measurement is unavailable; the previous state is
    /// dropped either way. On success the indicator is synced to the host's current offset.
    pub fn attach(
        &mut self,
        sections: Vec<K>,
        measurer: &impl SectionMeasurer<K>,
        host: &impl ScrollHost,
    ) -> AttachOutcome {
        self.sections = sections;
        self.attached = false;
        self.c.clear_bounds();
        self.remeasure(measurer, host)
    }

    /// Re-reads layout for the current section list.
    ///
    /// If measuring fails while attached, the previous bounds stay in effect.
    pub fn remeasure(
        &mut self,
        measurer: &impl SectionMeasurer<K>,
        host: &impl ScrollHost,
    ) -> AttachOutcome {
        if self.sections.is_empty() {
            self.detach();
            return AttachOutcome::Deferred(DeferReason::NoSections);
        }
        let Some(rect) = measurer.control_rect().filter(|r| r.is_measurable()) else {
            return AttachOutcome::Deferred(DeferReason::ControlNotMeasured);
        };

        if let Err(err) = self.c.measure_sections(
            self.sections.iter(),
            |key| measurer.section_start(key),
            measurer.list_end(),
        ) {
            return AttachOutcome::Deferred(DeferReason::Bounds(err));
        }

        self.c.set_control_rect(rect);
        self.c.set_scroll_max(host.scroll_max());
        if !self.attached {
            self.c.sync_from_scroll(host.scroll_offset());
            self.attached = true;
        }
        AttachOutcome::Attached
    }

    pub fn detach(&mut self) {
        self.attached = false;
        self.c.clear_bounds();
    }

    /// Call this when the host reports a scroll event.
    pub fn on_scroll(&mut self, host: &impl ScrollHost, now_ms: u64) -> bool {
        if !self.attached {
            return false;
        }
        self.c.set_scroll_max(host.scroll_max());
        self.c.on_scroll(host.scroll_offset(), now_ms)
    }

    /// Returns the offset the host was asked to scroll to, if any.
    pub fn on_pointer_down(
        &mut self,
        host: &mut impl ScrollHost,
        pointer: f64,
        kind: PointerKind,
        now_ms: u64,
    ) -> Option<f64> {
        if !self.attached {
            return None;
        }
        self.c.set_scroll_max(host.scroll_max());
        let cmd = self.c.on_pointer_down(pointer, kind, now_ms)?;
        host.scroll_to(cmd.offset);
        Some(cmd.offset)
    }

    /// Returns the offset the host was asked to scroll to, if any.
    pub fn on_pointer_move(
        &mut self,
        host: &mut impl ScrollHost,
        pointer: f64,
        kind: PointerKind,
        now_ms: u64,
    ) -> Option<f64> {
        if !self.attached {
            return None;
        }
        self.c.set_scroll_max(host.scroll_max());
        let cmd = self.c.on_pointer_move(pointer, kind, now_ms)?;
        host.scroll_to(cmd.offset);
        Some(cmd.offset)
    }

    /// Returns the offset the host was asked to scroll to, if any.
    pub fn on_hover(
        &mut self,
        host: &mut impl ScrollHost,
        pointer: f64,
        now_ms: u64,
    ) -> Option<f64> {
        if !self.attached {
            return None;
        }
        self.c.set_scroll_max(host.scroll_max());
        let cmd = self.c.on_hover(pointer, now_ms)?;
        host.scroll_to(cmd.offset);
        Some(cmd.offset)
    }

    pub fn on_pointer_up(&mut self) {
        self.c.on_pointer_up();
    }

    /// Jumps to the start of the section identified by `key`.
    pub fn seek_to_key(&mut self, host: &mut impl ScrollHost, key: &K) -> Option<f64> {
        if !self.attached {
            return None;
        }
        self.c.set_scroll_max(host.scroll_max());
        let cmd = self.c.seek_to_key(key)?;
        host.scroll_to(cmd.offset);
        Some(cmd.offset)
    }

    /// Advances one display frame.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.c.tick(now_ms)
    }

    pub fn active_key(&self) -> Option<&K> {
        self.c.active_key()
    }

    pub fn indicator_percent(&self) -> f64 {
        self.c.indicator_percent()
    }
}
