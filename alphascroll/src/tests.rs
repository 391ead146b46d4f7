use crate::geometry::{discrete_percent, fraction_in_section, indicator_percent, seek_offset};
use crate::*;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_f64(&mut self, start: f64, end: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        start + unit * (end - start)
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn random_starts(rng: &mut Lcg) -> Vec<f64> {
    let count = rng.gen_range_usize(1, 40);
    let mut off = rng.gen_f64(-100.0, 100.0);
    let mut starts = Vec::with_capacity(count);
    for _ in 0..count {
        starts.push(off);
        off += rng.gen_f64(1.0, 500.0);
    }
    starts
}

fn expected_locate(starts: &[f64], query: f64) -> usize {
    let mut found = 0;
    for (i, &s) in starts.iter().enumerate() {
        if s <= query {
            found = i;
        }
    }
    found
}

fn bounds_from(starts: &[f64], end: f64) -> SectionBounds<usize> {
    SectionBounds::from_starts(starts.iter().copied().enumerate(), end).unwrap()
}

fn abz() -> SectionBounds<String> {
    SectionBounds::from_starts(
        [
            ("a".to_string(), 0.0),
            ("b".to_string(), 500.0),
            ("z".to_string(), 900.0),
        ],
        1200.0,
    )
    .unwrap()
}

fn abz_controller(options: SyncOptions<String>) -> SyncController<String> {
    let mut c = SyncController::new(options);
    c.set_bounds(abz());
    c.set_scroll_max(1200.0);
    c.set_control_rect(ControlRect::new(0.0, 300.0));
    c
}

#[test]
fn locate_picks_containing_section() {
    let starts = [0.0, 500.0, 900.0];
    assert_eq!(locate(&starts, 650.0), Some(1));
    assert_eq!(locate(&starts, 0.0), Some(0));
    assert_eq!(locate(&starts, 499.9), Some(0));
    assert_eq!(locate(&starts, 2000.0), Some(2));
}

#[test]
fn locate_boundary_belongs_to_the_section_starting_there() {
    let starts = [0.0, 500.0, 900.0];
    assert_eq!(locate(&starts, 500.0), Some(1));
    assert_eq!(locate(&starts, 900.0), Some(2));
}

#[test]
fn locate_clamps_below_first_start_and_handles_degenerate_input() {
    assert_eq!(locate(&[10.0, 20.0], -5.0), Some(0));
    assert_eq!(locate(&[10.0, 20.0], f64::NAN), Some(0));
    assert_eq!(locate(&[10.0], 1e9), Some(0));
    assert_eq!(locate(&[], 3.0), None);
}

#[test]
fn locate_matches_linear_scan() {
    let mut rng = Lcg::new(0x5eed_0001);
    for _ in 0..200 {
        let starts = random_starts(&mut rng);
        let lo = starts[0] - 50.0;
        let hi = starts[starts.len() - 1] + 600.0;
        for _ in 0..20 {
            let query = rng.gen_f64(lo, hi);
            let got = locate(&starts, query).unwrap();
            assert_eq!(got, expected_locate(&starts, query));
            if query >= starts[0] {
                assert!(starts[got] <= query);
            }
            assert!(got == starts.len() - 1 || query < starts[got + 1]);
        }
        // Exact boundary hits.
        let i = rng.gen_range_usize(0, starts.len());
        assert_eq!(locate(&starts, starts[i]), Some(i));
    }
}

#[test]
fn locate_in_control_uses_uniform_rows() {
    let rect = ControlRect::new(0.0, 300.0);

    let hit = locate_in_control(rect, 200.0, 3).unwrap();
    assert_eq!(hit.index, 2);
    assert_close(hit.fraction, 0.0);
    assert_close(hit.percent, 100.0 * 2.0 / 3.0);

    let hit = locate_in_control(rect, 150.0, 3).unwrap();
    assert_eq!(hit.index, 1);
    assert_close(hit.fraction, 0.5);
}

#[test]
fn locate_in_control_clamps_pointer_into_control() {
    let rect = ControlRect::new(40.0, 300.0);

    let above = locate_in_control(rect, -100.0, 3).unwrap();
    assert_eq!(above.index, 0);
    assert_close(above.fraction, 0.0);
    assert_close(above.percent, 0.0);

    let below = locate_in_control(rect, 1000.0, 3).unwrap();
    assert_eq!(below.index, 2);
    assert_close(below.fraction, 1.0);
    assert_close(below.percent, 100.0);

    assert!(locate_in_control(rect, 100.0, 0).is_none());
    assert!(locate_in_control(ControlRect::new(0.0, 0.0), 0.0, 3).is_none());
}

#[test]
fn bounds_report_spans_and_ranks() {
    let b = abz();
    assert_eq!(b.len(), 3);
    assert_eq!(b.index_of(&"b".to_string()), Some(1));
    assert_eq!(b.index_of(&"q".to_string()), None);
    assert_eq!(b.span(0), Some((0.0, 500.0)));
    assert_eq!(b.span(2), Some((900.0, 1200.0)));
    assert_eq!(b.span(3), None);
    assert_eq!(b.locate(650.0), 1);
    assert_eq!(b.key(2).map(String::as_str), Some("z"));
}

#[test]
fn bounds_reject_invalid_measurements() {
    let empty: [(u8, f64); 0] = [];
    assert_eq!(
        SectionBounds::from_starts(empty, 10.0).unwrap_err(),
        BoundsError::Empty
    );
    assert_eq!(
        SectionBounds::from_starts([(1u8, 0.0), (1, 5.0)], 10.0).unwrap_err(),
        BoundsError::DuplicateKey { index: 1 }
    );
    assert_eq!(
        SectionBounds::from_starts([(1u8, 0.0), (2, 0.0)], 10.0).unwrap_err(),
        BoundsError::NotIncreasing { index: 1 }
    );
    assert_eq!(
        SectionBounds::from_starts([(1u8, 0.0), (2, f64::NAN)], 10.0).unwrap_err(),
        BoundsError::Unmeasured { index: 1 }
    );
    assert_eq!(
        SectionBounds::from_starts([(1u8, 0.0), (2, 5.0)], 4.0).unwrap_err(),
        BoundsError::InvalidEnd
    );
}

#[test]
fn bounds_measure_subtracts_margin_and_defers_unmeasured() {
    let keys = ['a', 'b', 'c'];
    let b = SectionBounds::measure(
        keys.iter(),
        75.0,
        |k| Some(match k {
            'a' => 75.0,
            'b' => 300.0,
            _ => 800.0,
        }),
        Some(1275.0),
    )
    .unwrap();
    assert_eq!(b.starts(), &[0.0, 225.0, 725.0]);
    assert_eq!(b.list_end(), 1200.0);

    let err = SectionBounds::measure(
        keys.iter(),
        0.0,
        |k| (*k != 'b').then_some(1.0),
        Some(10.0),
    )
    .unwrap_err();
    assert_eq!(err, BoundsError::Unmeasured { index: 1 });

    let err = SectionBounds::measure(keys.iter(), 0.0, |_| Some(0.0), Some(10.0)).unwrap_err();
    assert_eq!(err, BoundsError::NotIncreasing { index: 1 });

    let err = SectionBounds::measure(keys.iter(), 0.0, |_| Some(0.0), None).unwrap_err();
    assert_eq!(err, BoundsError::InvalidEnd);
}

#[test]
fn indicator_percent_hits_row_starts_exactly() {
    let b = abz();
    assert_close(indicator_percent(&b, 0.0), 0.0);
    assert_close(indicator_percent(&b, 500.0), 100.0 / 3.0);
    assert_close(indicator_percent(&b, 900.0), 200.0 / 3.0);
    assert_close(indicator_percent(&b, 1200.0), 100.0);
    // Halfway through 'b'.
    assert_close(indicator_percent(&b, 700.0), 100.0 * 1.5 / 3.0);
    // Out-of-range offsets clamp.
    assert_close(indicator_percent(&b, -10.0), 0.0);
    assert_close(indicator_percent(&b, 5000.0), 100.0);
}

#[test]
fn indicator_percent_is_monotonic() {
    let mut rng = Lcg::new(0x5eed_0002);
    for _ in 0..100 {
        let starts = random_starts(&mut rng);
        let last = starts[starts.len() - 1];
        let b = bounds_from(&starts, last + rng.gen_f64(0.0, 800.0));
        let mut offsets: Vec<f64> = (0..50)
            .map(|_| rng.gen_f64(starts[0] - 100.0, b.list_end() + 100.0))
            .collect();
        offsets.sort_by(f64::total_cmp);

        let mut prev = -1.0;
        for off in offsets {
            let p = indicator_percent(&b, off);
            assert!((0.0..=100.0).contains(&p));
            assert!(p >= prev, "percent decreased: {prev} -> {p} at {off}");
            prev = p;
        }
        for (rank, &s) in starts.iter().enumerate() {
            assert_close(indicator_percent(&b, s), discrete_percent(rank, starts.len()));
        }
    }
}

#[test]
fn seek_offset_is_inverse_of_fraction_in_section() {
    let mut rng = Lcg::new(0x5eed_0003);
    for _ in 0..100 {
        let starts = random_starts(&mut rng);
        let last = starts[starts.len() - 1];
        let b = bounds_from(&starts, last + rng.gen_f64(1.0, 800.0));
        let index = rng.gen_range_usize(0, b.len());
        let fraction = rng.gen_f64(0.0, 1.0);

        let dest = seek_offset(&b, index, fraction, f64::INFINITY).unwrap();
        let (start, _) = b.span(index).unwrap();
        if start < 0.0 {
            // Clamped to the top of the document.
            continue;
        }
        let back = fraction_in_section(&b, index, dest).unwrap();
        assert!((back - fraction).abs() < 1e-6);
        assert_close(seek_offset(&b, index, back, f64::INFINITY).unwrap(), dest);
    }
}

#[test]
fn seek_offset_clamps_to_scroll_range() {
    let b = abz();
    assert_close(seek_offset(&b, 2, 0.0, 1200.0).unwrap(), 900.0);
    assert_close(seek_offset(&b, 2, 0.5, 1000.0).unwrap(), 1000.0);
    assert_close(seek_offset(&b, 1, 2.0, 1200.0).unwrap(), 900.0);
    assert!(seek_offset(&b, 3, 0.0, 1200.0).is_none());
}

#[test]
fn throttle_drops_events_inside_window() {
    let mut t = Throttle::new(50);
    let accepted: Vec<u64> = (0..=200u64)
        .step_by(10)
        .filter(|&now| t.accept(now))
        .collect();
    assert_eq!(accepted, [0, 50, 100, 150, 200]);

    t.reset();
    assert!(t.accept(201));
}

#[test]
fn controller_is_inert_until_bounds_exist() {
    let mut c = SyncController::<String>::new(SyncOptions::new());
    c.set_control_rect(ControlRect::new(0.0, 300.0));
    assert!(!c.is_ready());
    assert!(!c.on_scroll(600.0, 0));
    assert!(c.on_pointer_down(100.0, PointerKind::Touch, 0).is_none());
    assert!(c.active().is_none());

    c.set_bounds(abz());
    assert!(c.is_ready());
    c.clear_bounds();
    assert!(!c.is_ready());
    assert!(!c.on_scroll(600.0, 1));
}

#[test]
fn scroll_updates_active_section_without_commands() {
    let mut c = abz_controller(SyncOptions::new());
    assert!(c.on_scroll(650.0, 0));
    assert_eq!(
        c.active(),
        Some(ActiveSection {
            index: 1,
            source: Source::UserScroll
        })
    );
    assert_eq!(c.active_key().map(String::as_str), Some("b"));
    assert_eq!(c.phase(), Phase::UserScrolling);
    assert_close(c.indicator_percent(), 100.0 * (1.0 + 150.0 / 400.0) / 3.0);
    assert!(!c.is_suppressed());

    // Same offset twice: nothing new to report.
    assert!(!c.on_scroll(650.0, 5));
}

#[test]
fn touch_seeks_into_section_and_suppresses_echo() {
    let mut c = abz_controller(SyncOptions::new());
    c.sync_from_scroll(0.0);

    let cmd = c.on_pointer_down(200.0, PointerKind::Touch, 0).unwrap();
    assert_eq!(cmd.index, 2);
    assert!((900.0..=1200.0).contains(&cmd.offset));
    assert_eq!(c.active_key().map(String::as_str), Some("z"));
    assert_eq!(c.active().unwrap().source, Source::Programmatic);
    assert!(c.is_suppressed());
    assert_eq!(c.phase(), Phase::Dragging);

    // The document echoes the command; it must not be read as a user scroll.
    assert!(!c.on_scroll(cmd.offset, 1));
    assert!(!c.on_scroll(cmd.offset - 450.0, 2));
    assert_eq!(
        c.active(),
        Some(ActiveSection {
            index: 2,
            source: Source::Programmatic
        })
    );
    assert_close(c.scroll_state().offset, cmd.offset - 450.0);
}

#[test]
fn suppression_clears_after_settle_frames() {
    let mut c = abz_controller(SyncOptions::new());
    c.on_pointer_down(200.0, PointerKind::Touch, 0).unwrap();
    c.on_pointer_up();
    assert_eq!(c.phase(), Phase::ProgrammaticSeek);
    assert!(c.is_suppressed());

    assert!(!c.tick(16));
    assert!(c.is_suppressed());
    assert!(c.tick(32));
    assert!(!c.is_suppressed());
    assert_eq!(c.phase(), Phase::Idle);

    assert!(c.on_scroll(100.0, 40));
    assert_eq!(
        c.active(),
        Some(ActiveSection {
            index: 0,
            source: Source::UserScroll
        })
    );
}

#[test]
fn new_seek_rearms_suppression() {
    let mut c = abz_controller(SyncOptions::new());
    c.on_pointer_down(20.0, PointerKind::Mouse, 0).unwrap();
    c.tick(16);
    assert!(c.on_pointer_move(150.0, PointerKind::Mouse, 20).is_some());
    c.tick(32);
    assert!(c.is_suppressed());
    c.tick(48);
    assert!(!c.is_suppressed());
    assert_eq!(c.phase(), Phase::Dragging);
}

#[test]
fn touch_moves_are_throttled() {
    let mut c = abz_controller(SyncOptions::new());
    assert!(c.on_pointer_down(10.0, PointerKind::Touch, 0).is_some());

    let mut commands = 0;
    for i in 1..=10u64 {
        if c.on_pointer_move(10.0 + i as f64 * 25.0, PointerKind::Touch, i * 10).is_some() {
            commands += 1;
        }
    }
    assert_eq!(commands, 2);

    // Mouse drags are not throttled.
    c.on_pointer_up();
    c.on_pointer_down(10.0, PointerKind::Mouse, 200).unwrap();
    for i in 1..=5u64 {
        assert!(c.on_pointer_move(10.0 + i as f64, PointerKind::Mouse, 200 + i).is_some());
    }
}

#[test]
fn hover_commits_by_default() {
    let mut c = abz_controller(SyncOptions::new());
    let cmd = c.on_hover(150.0, 0).unwrap();
    assert_eq!(cmd.index, 1);
    assert_close(cmd.offset, 700.0);
    assert_eq!(c.phase(), Phase::ProgrammaticSeek);

    // A mouse move without a press is a hover too.
    let cmd = c.on_pointer_move(250.0, PointerKind::Mouse, 10).unwrap();
    assert_eq!(cmd.index, 2);
}

#[test]
fn hover_preview_does_not_scroll() {
    let mut c = abz_controller(SyncOptions::new().with_hover_commits(false));
    assert!(c.on_hover(150.0, 0).is_none());
    assert_eq!(c.active_key().map(String::as_str), Some("b"));
    assert_eq!(c.active().unwrap().source, Source::Programmatic);
    assert!(!c.is_suppressed());
    assert_close(c.indicator_percent(), 50.0);

    // Pressing commits.
    assert!(c.on_pointer_down(150.0, PointerKind::Mouse, 5).is_some());
}

#[test]
fn lock_until_settled_drops_back_to_back_seeks() {
    let mut c = abz_controller(SyncOptions::new().with_lock_until_settled(true));
    assert!(c.on_pointer_down(10.0, PointerKind::Mouse, 0).is_some());
    assert!(c.on_pointer_move(250.0, PointerKind::Mouse, 1).is_none());
    assert_eq!(c.active().unwrap().index, 0);
    c.tick(16);
    c.tick(32);
    assert!(c.on_pointer_move(250.0, PointerKind::Mouse, 33).is_some());
}

#[test]
fn seek_targets_clamp_to_scroll_max() {
    let mut c = abz_controller(SyncOptions::new());
    c.set_scroll_max(1000.0);
    let cmd = c.on_pointer_down(290.0, PointerKind::Mouse, 0).unwrap();
    assert_eq!(cmd.index, 2);
    assert_close(cmd.offset, 1000.0);
    // The section stays what the user pointed at.
    assert_eq!(c.active().unwrap().index, 2);
}

#[test]
fn seek_to_key_lands_on_section_start() {
    let mut c = abz_controller(SyncOptions::new());
    let cmd = c.seek_to_key(&"b".to_string()).unwrap();
    assert_close(cmd.offset, 500.0);
    assert_close(c.indicator_percent(), 100.0 / 3.0);
    assert!(c.seek_to_key(&"q".to_string()).is_none());
    assert!(c.seek_to_section(3, 0.0).is_none());
}

#[test]
fn discrete_indicator_snaps_to_rows() {
    let mut c = abz_controller(SyncOptions::new().with_indicator_style(IndicatorStyle::Discrete));
    c.on_scroll(700.0, 0);
    assert_close(c.indicator_percent(), 100.0 / 3.0);
    c.tick(500);
    c.on_pointer_down(299.0, PointerKind::Touch, 500).unwrap();
    assert_close(c.indicator_percent(), 200.0 / 3.0);
}

#[test]
fn switching_indicator_style_resyncs() {
    let mut c = abz_controller(SyncOptions::new());
    c.on_scroll(700.0, 0);
    assert_close(c.indicator_percent(), 50.0);
    c.update_options(|o| o.indicator_style = IndicatorStyle::Discrete);
    assert_close(c.indicator_percent(), 100.0 / 3.0);
}

#[test]
fn user_scrolling_falls_back_to_idle() {
    let mut c = abz_controller(SyncOptions::new().with_is_scrolling_reset_delay_ms(100));
    c.on_scroll(10.0, 0);
    assert!(!c.tick(50));
    assert_eq!(c.phase(), Phase::UserScrolling);
    assert!(c.tick(100));
    assert_eq!(c.phase(), Phase::Idle);
}

#[test]
fn set_bounds_keeps_active_key() {
    let mut c = abz_controller(SyncOptions::new());
    c.on_pointer_down(200.0, PointerKind::Touch, 0).unwrap();
    assert_eq!(c.active().unwrap().index, 2);

    // A section was inserted before 'z'.
    let relaid = SectionBounds::from_starts(
        [
            ("a".to_string(), 0.0),
            ("b".to_string(), 500.0),
            ("m".to_string(), 700.0),
            ("z".to_string(), 900.0),
        ],
        1200.0,
    )
    .unwrap();
    c.set_bounds(relaid);
    assert_eq!(
        c.active(),
        Some(ActiveSection {
            index: 3,
            source: Source::Programmatic
        })
    );
}

#[test]
fn set_bounds_resyncs_when_active_key_disappears() {
    let mut c = abz_controller(SyncOptions::new());
    c.on_scroll(650.0, 0);
    let relaid = SectionBounds::from_starts(
        [("a".to_string(), 0.0), ("z".to_string(), 600.0)],
        1200.0,
    )
    .unwrap();
    c.set_bounds(relaid);
    assert_eq!(c.active_key().map(String::as_str), Some("z"));
    assert_eq!(c.active().unwrap().source, Source::UserScroll);
}

#[test]
fn measure_sections_keeps_previous_bounds_on_error() {
    let mut c = abz_controller(SyncOptions::new().with_scroll_margin(75.0));
    let keys: Vec<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
    let err = c
        .measure_sections(keys.iter(), |k| (k == "a").then_some(75.0), Some(500.0))
        .unwrap_err();
    assert_eq!(err, BoundsError::Unmeasured { index: 1 });
    assert_eq!(c.bounds().unwrap().len(), 3);

    c.measure_sections(keys.iter(), |k| Some(if k == "a" { 75.0 } else { 275.0 }), Some(575.0))
        .unwrap();
    assert_eq!(c.bounds().unwrap().starts(), &[0.0, 200.0]);
}

#[test]
fn disabled_controller_ignores_events() {
    let mut c = abz_controller(SyncOptions::new());
    c.on_pointer_down(200.0, PointerKind::Touch, 0).unwrap();
    c.set_options(SyncOptions::new().with_enabled(false));
    assert!(!c.is_ready());
    assert!(!c.is_suppressed());
    assert!(!c.is_dragging());
    assert!(c.on_pointer_down(10.0, PointerKind::Touch, 10).is_none());
}

#[test]
fn on_change_fires_once_per_visible_change() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let options = SyncOptions::new().with_on_change(Some(move |c: &SyncController<String>| {
        assert!(c.active().is_some());
        counter.fetch_add(1, Ordering::Relaxed);
    }));
    let mut c = abz_controller(options);
    calls.store(0, Ordering::Relaxed);

    c.on_scroll(100.0, 0);
    c.on_scroll(100.0, 1);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    c.on_scroll(120.0, 2);
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    c.tick(500);
    c.on_pointer_down(200.0, PointerKind::Touch, 500).unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 3);
    // Suppressed echo.
    c.on_scroll(900.0, 501);
    assert_eq!(calls.load(Ordering::Relaxed), 3);
}

#[test]
fn snapshot_reflects_controller_state() {
    let mut c = abz_controller(SyncOptions::new());
    c.on_pointer_down(200.0, PointerKind::Touch, 0).unwrap();
    let snap = c.snapshot();
    assert!(snap.suppressed);
    assert_eq!(snap.phase, Phase::Dragging);
    assert_eq!(snap.active.map(|a| a.index), Some(2));
    assert_close(snap.scroll.max, 1200.0);
}
