//! Mappings between scroll offsets and positions on the index control.

use crate::SectionBounds;
use crate::key::SectionKey;
use crate::state::clamp_offset;

/// How far `offset` has progressed through section `index`, in `[0, 1]`.
///
/// Zero-length spans report `0`. Returns `None` for an out-of-range index.
pub fn fraction_in_section<K: SectionKey>(
    bounds: &SectionBounds<K>,
    index: usize,
    offset: f64,
) -> Option<f64> {
    let (start, end) = bounds.span(index)?;
    let len = end - start;
    if len <= 0.0 || offset.is_nan() {
        return Some(0.0);
    }
    Some(((offset - start) / len).clamp(0.0, 1.0))
}

/// Continuous indicator position for a document scroll offset, in `[0, 100]`.
///
/// `100 * (rank + fraction_in_section) / count`. Exactly `100 * rank / count` at each section
/// start, and non-decreasing in `offset`.
pub fn indicator_percent<K: SectionKey>(bounds: &SectionBounds<K>, offset: f64) -> f64 {
    let index = bounds.locate(offset);
    let fraction = fraction_in_section(bounds, index, offset).unwrap_or(0.0);
    100.0 * (index as f64 + fraction) / bounds.len() as f64
}

/// Indicator position at the top of row `index`.
pub fn discrete_percent(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    100.0 * index.min(count - 1) as f64 / count as f64
}

/// Document offset for a position `fraction` of the way through section `index`.
///
/// Clamped to `[0, scroll_max]`. Returns `None` for an out-of-range index.
pub fn seek_offset<K: SectionKey>(
    bounds: &SectionBounds<K>,
    index: usize,
    fraction: f64,
    scroll_max: f64,
) -> Option<f64> {
    let (start, end) = bounds.span(index)?;
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    Some(clamp_offset(start + fraction * (end - start), scroll_max))
}
