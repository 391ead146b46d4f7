use alloc::string::String;
use alloc::sync::Arc;

use crate::IndicatorStyle;
use crate::controller::SyncController;

/// A callback fired after an event changed the active section or the indicator position.
pub type OnChangeCallback<K> = Arc<dyn Fn(&SyncController<K>) + Send + Sync>;

/// Configuration for [`crate::SyncController`].
///
/// Cheap to clone: the callback is stored in an `Arc`, so adapters can tweak a field and call
/// `SyncController::set_options` freely.
pub struct SyncOptions<K = String> {
    /// Enables/disables the controller. When disabled, every event is ignored.
    pub enabled: bool,

    /// Whether hovering the control (mouse moving without a held button) scrolls the document.
    ///
    /// `true` previews a jump immediately (desktop). With `false`, hover only moves the
    /// highlighted section and a press is needed to commit.
    pub hover_commits: bool,

    pub indicator_style: IndicatorStyle,

    /// Minimum interval between processed touch-move events.
    pub touch_move_throttle_ms: u64,

    /// Number of display frames a programmatic seek stays suppressed for.
    ///
    /// Scroll events arriving while suppressed are treated as echoes of the seek.
    pub settle_frames: u32,

    /// Drops pointer seeks while the previous seek has not settled.
    ///
    /// Some mobile browsers report pointer coordinates relative to a fixed control that has not
    /// been repositioned yet, which makes back-to-back seeks within one frame jump around.
    pub lock_until_settled: bool,

    /// Distance subtracted from measured section starts (e.g. a fixed header).
    pub scroll_margin: f64,

    /// Delay without scroll events after which `UserScrolling` falls back to `Idle`.
    pub is_scrolling_reset_delay_ms: u64,

    pub on_change: Option<OnChangeCallback<K>>,
}

impl<K> Clone for SyncOptions<K> {
    fn clone(&self) -> Self {
        Self {
            enabled: self.enabled,
            hover_commits: self.hover_commits,
            indicator_style: self.indicator_style,
            touch_move_throttle_ms: self.touch_move_throttle_ms,
            settle_frames: self.settle_frames,
            lock_until_settled: self.lock_until_settled,
            scroll_margin: self.scroll_margin,
            is_scrolling_reset_delay_ms: self.is_scrolling_reset_delay_ms,
            on_change: self.on_change.clone(),
        }
    }
}

impl<K> Default for SyncOptions<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> SyncOptions<K> {
    pub fn new() -> Self {
        Self {
            enabled: true,
            hover_commits: true,
            indicator_style: IndicatorStyle::Continuous,
            touch_move_throttle_ms: 50,
            settle_frames: 2,
            lock_until_settled: false,
            scroll_margin: 0.0,
            is_scrolling_reset_delay_ms: 150,
            on_change: None,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_hover_commits(mut self, hover_commits: bool) -> Self {
        self.hover_commits = hover_commits;
        self
    }

    pub fn with_indicator_style(mut self, indicator_style: IndicatorStyle) -> Self {
        self.indicator_style = indicator_style;
        self
    }

    pub fn with_touch_move_throttle_ms(mut self, interval_ms: u64) -> Self {
        self.touch_move_throttle_ms = interval_ms;
        self
    }

    /// Sets the settlement window. A window of zero frames is raised to one.
    pub fn with_settle_frames(mut self, frames: u32) -> Self {
        self.settle_frames = frames.max(1);
        self
    }

    pub fn with_lock_until_settled(mut self, lock: bool) -> Self {
        self.lock_until_settled = lock;
        self
    }

    pub fn with_scroll_margin(mut self, scroll_margin: f64) -> Self {
        self.scroll_margin = scroll_margin;
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&SyncController<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl<K> core::fmt::Debug for SyncOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SyncOptions")
            .field("enabled", &self.enabled)
            .field("hover_commits", &self.hover_commits)
            .field("indicator_style", &self.indicator_style)
            .field("touch_move_throttle_ms", &self.touch_move_throttle_ms)
            .field("settle_frames", &self.settle_frames)
            .field("lock_until_settled", &self.lock_until_settled)
            .field("scroll_margin", &self.scroll_margin)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .finish_non_exhaustive()
    }
}
