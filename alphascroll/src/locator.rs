//! Offset → section lookups.
//!
//! Both the scroll path and the pointer path resolve ties the same way: an offset exactly on a
//! boundary belongs to the section that starts there.

use crate::{ControlHit, ControlRect};

/// Returns the greatest `i` with `starts[i] <= query`, clamped to `[0, len - 1]`.
///
/// `starts` must be strictly increasing. Returns `None` only for an empty slice. Queries before
/// the first start (and NaN) resolve to `0`.
pub fn locate(starts: &[f64], query: f64) -> Option<usize> {
    if starts.is_empty() {
        return None;
    }
    debug_assert!(
        starts.windows(2).all(|w| w[0] < w[1]),
        "locate: starts must be strictly increasing"
    );
    // Number of starts at or before `query`; NaN compares false and yields 0.
    let consumed = starts.partition_point(|&s| s <= query);
    Some(consumed.saturating_sub(1))
}

/// Maps a pointer position on the index control to a section rank.
///
/// The control is split into `count` rows of equal height regardless of how long each section is
/// in the document. Out-of-range pointers are clamped onto the first/last row.
///
/// Returns `None` when `count == 0` or the control has no measurable length.
pub fn locate_in_control(rect: ControlRect, pointer: f64, count: usize) -> Option<ControlHit> {
    if count == 0 || !rect.is_measurable() {
        return None;
    }
    let pointer = if pointer.is_nan() { rect.start } else { pointer };
    let within = (pointer - rect.start).clamp(0.0, rect.length);
    let row = rect.length / count as f64;

    // `within / row` is non-negative, so truncation is floor.
    let rows = within / row;
    let index = (rows as usize).min(count - 1);
    let fraction = (rows - index as f64).clamp(0.0, 1.0);
    let percent = (within / rect.length * 100.0).clamp(0.0, 100.0);

    Some(ControlHit {
        index,
        fraction,
        percent,
    })
}
