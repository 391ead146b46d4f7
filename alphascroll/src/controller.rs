use alloc::string::String;

use crate::geometry::{discrete_percent, indicator_percent, seek_offset};
use crate::key::SectionKey;
use crate::locator::locate_in_control;
use crate::state::clamp_offset;
use crate::{
    ActiveSection, BoundsError, ControlRect, IndicatorStyle, Phase, PointerKind, ScrollCommand,
    ScrollState, SectionBounds, Source, SyncOptions, SyncSnapshot, Throttle,
};

/// Keeps a sectioned document and its index control in agreement.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects and never scrolls anything itself.
/// - Your adapter feeds it section bounds, control geometry, scroll offsets and pointer events.
/// - Pointer events return a [`ScrollCommand`] which the adapter applies to the real document.
///
/// Every command arms a short suppression window (see [`SyncOptions::settle_frames`]). Scroll
/// events that arrive inside the window are the document echoing the command back and do not
/// rewrite the active section. The window only closes from [`Self::tick`], which adapters call
/// once per display frame.
///
/// Until bounds are provided (see [`Self::set_bounds`]) the controller is inert.
#[derive(Clone, Debug)]
pub struct SyncController<K = String> {
    options: SyncOptions<K>,
    bounds: Option<SectionBounds<K>>,
    control: Option<ControlRect>,
    scroll: ScrollState,
    active: Option<ActiveSection>,
    indicator_percent: f64,
    phase: Phase,
    dragging: Option<PointerKind>,
    suppress_frames: u32,
    touch_throttle: Throttle,
    last_scroll_event_ms: Option<u64>,
}

impl<K: SectionKey> SyncController<K> {
    pub fn new(options: SyncOptions<K>) -> Self {
        sdebug!(
            enabled = options.enabled,
            hover_commits = options.hover_commits,
            settle_frames = options.settle_frames,
            "SyncController::new"
        );
        let touch_throttle = Throttle::new(options.touch_move_throttle_ms);
        Self {
            options,
            bounds: None,
            control: None,
            scroll: ScrollState {
                offset: 0.0,
                max: f64::INFINITY,
            },
            active: None,
            indicator_percent: 0.0,
            phase: Phase::Idle,
            dragging: None,
            suppress_frames: 0,
            touch_throttle,
            last_scroll_event_ms: None,
        }
    }

    pub fn options(&self) -> &SyncOptions<K> {
        &self.options
    }

    pub fn set_options(&mut self, options: SyncOptions<K>) {
        let was_enabled = self.options.enabled;
        let style_changed = self.options.indicator_style != options.indicator_style;
        self.options = options;
        self.touch_throttle = Throttle::new(self.options.touch_move_throttle_ms);
        strace!(
            enabled = self.options.enabled,
            hover_commits = self.options.hover_commits,
            "SyncController::set_options"
        );

        if !self.options.enabled {
            self.reset_interaction();
        } else if !was_enabled || style_changed {
            if self.resync() {
                self.notify();
            }
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut SyncOptions<K>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    /// `true` once enabled and bounds are available; events are ignored until then.
    pub fn is_ready(&self) -> bool {
        self.options.enabled && self.bounds.is_some()
    }

    pub fn bounds(&self) -> Option<&SectionBounds<K>> {
        self.bounds.as_ref()
    }

    /// Replaces the section bounds, e.g. after the document was laid out again.
    ///
    /// The active section follows its identifier into the new bounds. If the identifier is gone
    /// it is re-derived from the current scroll offset.
    pub fn set_bounds(&mut self, bounds: SectionBounds<K>) {
        let prev_key = self.active_key().cloned();
        let prev_active = self.active;
        sdebug!(count = bounds.len(), "SyncController::set_bounds");
        self.bounds = Some(bounds);

        let remapped = match (&prev_key, &self.bounds, self.active) {
            (Some(key), Some(bounds), Some(active)) => bounds
                .index_of(key)
                .map(|index| ActiveSection { index, ..active }),
            _ => None,
        };
        self.active = remapped;

        let resynced = self.resync();
        if resynced || self.active != prev_active {
            self.notify();
        }
    }

    /// Measures `sections` and installs the resulting bounds.
    ///
    /// `start_of` returns the document offset of a section's top edge, or `None` while it has not
    /// been laid out. [`SyncOptions::scroll_margin`] is subtracted from every offset. On error the
    /// previous bounds are kept.
    pub fn measure_sections<'a>(
        &mut self,
        sections: impl IntoIterator<Item = &'a K>,
        start_of: impl FnMut(&K) -> Option<f64>,
        list_end: Option<f64>,
    ) -> Result<(), BoundsError>
    where
        K: 'a,
    {
        match SectionBounds::measure(sections, self.options.scroll_margin, start_of, list_end) {
            Ok(bounds) => {
                self.set_bounds(bounds);
                Ok(())
            }
            Err(err) => {
                swarn!(%err, "measure_sections: keeping previous bounds");
                Err(err)
            }
        }
    }

    /// Drops the bounds and returns to the inert state.
    pub fn clear_bounds(&mut self) {
        self.bounds = None;
        self.active = None;
        self.indicator_percent = 0.0;
        self.reset_interaction();
    }

    pub fn control_rect(&self) -> Option<ControlRect> {
        self.control
    }

    pub fn set_control_rect(&mut self, rect: ControlRect) {
        self.control = Some(rect);
    }

    pub fn set_scroll_max(&mut self, max: f64) {
        self.scroll.max = if max.is_nan() { 0.0 } else { max.max(0.0) };
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    pub fn active(&self) -> Option<ActiveSection> {
        self.active
    }

    pub fn active_key(&self) -> Option<&K> {
        let active = self.active?;
        self.bounds.as_ref()?.key(active.index)
    }

    /// Indicator position in `[0, 100]`.
    pub fn indicator_percent(&self) -> f64 {
        self.indicator_percent
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// `true` while a programmatic seek has not settled yet.
    pub fn is_suppressed(&self) -> bool {
        self.suppress_frames > 0
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot {
            scroll: self.scroll,
            active: self.active,
            indicator_percent: self.indicator_percent,
            phase: self.phase,
            suppressed: self.is_suppressed(),
        }
    }

    /// Derives the active section from `offset` regardless of suppression.
    ///
    /// Adapters call this once after attaching so the indicator starts at the right place.
    pub fn sync_from_scroll(&mut self, offset: f64) {
        if !self.is_ready() {
            return;
        }
        self.scroll.offset = clamp_offset(offset, self.scroll.max);
        if self.apply_scroll_position() {
            self.notify();
        }
    }

    /// Call this when the document reports a scroll offset change.
    ///
    /// Returns `true` when the active section or indicator changed. While a seek is settling the
    /// offset is recorded but nothing else changes.
    pub fn on_scroll(&mut self, offset: f64, now_ms: u64) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.scroll.offset = clamp_offset(offset, self.scroll.max);
        self.last_scroll_event_ms = Some(now_ms);

        if self.is_suppressed() {
            strace!(offset, "on_scroll: suppressed");
            return false;
        }

        if self.dragging.is_none() {
            self.phase = Phase::UserScrolling;
        }
        let changed = self.apply_scroll_position();
        if changed {
            self.notify();
        }
        changed
    }

    /// Pointer pressed (or touch started) on the control at client position `pointer`.
    pub fn on_pointer_down(
        &mut self,
        pointer: f64,
        kind: PointerKind,
        now_ms: u64,
    ) -> Option<ScrollCommand> {
        if !self.is_ready() {
            return None;
        }
        self.dragging = Some(kind);
        self.phase = Phase::Dragging;
        if kind == PointerKind::Touch {
            self.touch_throttle.mark(now_ms);
        }
        self.seek_to_pointer(pointer)
    }

    /// Pointer moved over the control.
    ///
    /// Mouse moves without a press are forwarded to [`Self::on_hover`]. A touch move without a
    /// preceding touch start begins a drag. Touch moves are throttled.
    pub fn on_pointer_move(
        &mut self,
        pointer: f64,
        kind: PointerKind,
        now_ms: u64,
    ) -> Option<ScrollCommand> {
        if !self.is_ready() {
            return None;
        }
        if self.dragging.is_none() {
            match kind {
                PointerKind::Mouse => return self.on_hover(pointer, now_ms),
                PointerKind::Touch => {
                    self.dragging = Some(kind);
                    self.phase = Phase::Dragging;
                }
            }
        }
        if kind == PointerKind::Touch && !self.touch_throttle.accept(now_ms) {
            strace!(pointer, now_ms, "on_pointer_move: throttled");
            return None;
        }
        self.seek_to_pointer(pointer)
    }

    /// Mouse over the control without a held button.
    ///
    /// With [`SyncOptions::hover_commits`] this seeks like a drag; otherwise it only highlights
    /// the section under the pointer.
    pub fn on_hover(&mut self, pointer: f64, now_ms: u64) -> Option<ScrollCommand> {
        if !self.is_ready() {
            return None;
        }
        if self.dragging.is_some() {
            return self.on_pointer_move(pointer, PointerKind::Mouse, now_ms);
        }
        if self.options.hover_commits {
            return self.seek_to_pointer(pointer);
        }

        let hit = {
            let bounds = self.bounds.as_ref()?;
            locate_in_control(self.control?, pointer, bounds.len())?
        };
        let percent = self.percent_for_hit(hit.index, hit.percent);
        if self.apply_active(hit.index, Source::Programmatic, percent) {
            self.notify();
        }
        None
    }

    /// Pointer released, touch ended or cancelled.
    ///
    /// The suppression window keeps running until it settles through [`Self::tick`].
    pub fn on_pointer_up(&mut self) {
        if self.dragging.take().is_none() {
            return;
        }
        self.touch_throttle.reset();
        self.phase = if self.is_suppressed() {
            Phase::ProgrammaticSeek
        } else {
            Phase::Idle
        };
        strace!(phase = ?self.phase, "on_pointer_up");
    }

    /// Seeks to a position `fraction` of the way through section `index`.
    ///
    /// Used for keyboard navigation or a host-side "jump to" action.
    pub fn seek_to_section(&mut self, index: usize, fraction: f64) -> Option<ScrollCommand> {
        if !self.is_ready() {
            return None;
        }
        let count = self.bounds.as_ref()?.len();
        if index >= count {
            swarn!(index, count, "seek_to_section: index out of range");
            return None;
        }
        let percent = match self.options.indicator_style {
            IndicatorStyle::Continuous => {
                let fraction = if fraction.is_nan() {
                    0.0
                } else {
                    fraction.clamp(0.0, 1.0)
                };
                100.0 * (index as f64 + fraction) / count as f64
            }
            IndicatorStyle::Discrete => discrete_percent(index, count),
        };
        self.issue_seek(index, fraction, percent)
    }

    /// Seeks to the start of the section identified by `key`.
    pub fn seek_to_key(&mut self, key: &K) -> Option<ScrollCommand> {
        let index = self.bounds.as_ref()?.index_of(key)?;
        self.seek_to_section(index, 0.0)
    }

    /// Advances one display frame.
    ///
    /// Counts down the suppression window and falls back from `UserScrolling` to `Idle` once no
    /// scroll event arrived for [`SyncOptions::is_scrolling_reset_delay_ms`]. Returns `true` when
    /// the phase or the suppression state changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let mut changed = false;

        if self.suppress_frames > 0 {
            self.suppress_frames -= 1;
            if self.suppress_frames == 0 {
                sdebug!(now_ms, "seek settled");
                if self.phase == Phase::ProgrammaticSeek {
                    self.phase = Phase::Idle;
                }
                changed = true;
            }
        }

        if self.phase == Phase::UserScrolling {
            let idle = self.last_scroll_event_ms.is_none_or(|last| {
                now_ms.saturating_sub(last) >= self.options.is_scrolling_reset_delay_ms
            });
            if idle {
                self.phase = Phase::Idle;
                self.last_scroll_event_ms = None;
                changed = true;
            }
        }

        changed
    }

    fn seek_to_pointer(&mut self, pointer: f64) -> Option<ScrollCommand> {
        let hit = {
            let bounds = self.bounds.as_ref()?;
            let Some(rect) = self.control.filter(ControlRect::is_measurable) else {
                swarn!(pointer, "seek_to_pointer: control rect is not measured yet");
                return None;
            };
            locate_in_control(rect, pointer, bounds.len())?
        };
        let percent = self.percent_for_hit(hit.index, hit.percent);
        self.issue_seek(hit.index, hit.fraction, percent)
    }

    fn issue_seek(&mut self, index: usize, fraction: f64, percent: f64) -> Option<ScrollCommand> {
        if self.options.lock_until_settled && self.is_suppressed() {
            strace!(index, "issue_seek: previous seek not settled");
            return None;
        }
        let offset = seek_offset(self.bounds.as_ref()?, index, fraction, self.scroll.max)?;

        let changed = self.apply_active(index, Source::Programmatic, percent);
        self.suppress_frames = self.options.settle_frames.max(1);
        self.phase = if self.dragging.is_some() {
            Phase::Dragging
        } else {
            Phase::ProgrammaticSeek
        };
        strace!(index, fraction, offset, "issue_seek");

        if changed {
            self.notify();
        }
        Some(ScrollCommand { offset, index })
    }

    fn percent_for_hit(&self, index: usize, control_percent: f64) -> f64 {
        match self.options.indicator_style {
            IndicatorStyle::Continuous => control_percent,
            IndicatorStyle::Discrete => {
                discrete_percent(index, self.bounds.as_ref().map_or(0, SectionBounds::len))
            }
        }
    }

    /// Derives active section + indicator from the recorded scroll offset.
    fn apply_scroll_position(&mut self) -> bool {
        let Some(bounds) = self.bounds.as_ref() else {
            return false;
        };
        let offset = self.scroll.offset;
        let index = bounds.locate(offset);
        let percent = match self.options.indicator_style {
            IndicatorStyle::Continuous => indicator_percent(bounds, offset),
            IndicatorStyle::Discrete => discrete_percent(index, bounds.len()),
        };
        self.apply_active(index, Source::UserScroll, percent)
    }

    fn apply_active(&mut self, index: usize, source: Source, percent: f64) -> bool {
        let next = Some(ActiveSection { index, source });
        let changed = self.active != next || self.indicator_percent != percent;
        self.active = next;
        self.indicator_percent = percent;
        changed
    }

    /// Re-derives render state after bounds or style changed. Returns `true` on change.
    fn resync(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        match self.active {
            Some(active) if active.source == Source::Programmatic || self.is_suppressed() => {
                if self.options.indicator_style == IndicatorStyle::Discrete {
                    let count = self.bounds.as_ref().map_or(0, SectionBounds::len);
                    let percent = discrete_percent(active.index, count);
                    return self.apply_active(active.index, active.source, percent);
                }
                false
            }
            _ => self.apply_scroll_position(),
        }
    }

    fn reset_interaction(&mut self) {
        self.phase = Phase::Idle;
        self.dragging = None;
        self.suppress_frames = 0;
        self.touch_throttle.reset();
        self.last_scroll_event_ms = None;
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }
}
