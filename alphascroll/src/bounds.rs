use alloc::vec::Vec;

use crate::key::{KeyIndexMap, SectionKey};
use crate::locator;

/// Why a set of section measurements could not be turned into [`SectionBounds`].
///
/// None of these are fatal: callers keep the previous bounds (or stay inactive) and retry once
/// layout has settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundsError {
    #[error("section list is empty")]
    Empty,
    #[error("section {index} repeats an earlier identifier")]
    DuplicateKey { index: usize },
    #[error("section {index} has no measured start offset")]
    Unmeasured { index: usize },
    #[error("section {index} does not start after the previous section")]
    NotIncreasing { index: usize },
    #[error("list end offset is missing or before the last section start")]
    InvalidEnd,
}

/// Start offsets of every section in document order, plus the end of the last section.
///
/// Offsets are scroll offsets: the value the document's scroll position has when the section's
/// top edge reaches the top of the viewport (after subtracting any fixed header via
/// `scroll_margin`).
///
/// Invariants: non-empty, unique keys, strictly increasing starts, `end >= last start`.
#[derive(Clone, Debug)]
pub struct SectionBounds<K> {
    keys: Vec<K>,
    starts: Vec<f64>,
    end: f64,
    ranks: KeyIndexMap<K>,
}

impl<K: SectionKey> SectionBounds<K> {
    /// Builds bounds from already-resolved start offsets.
    pub fn from_starts(
        sections: impl IntoIterator<Item = (K, f64)>,
        end: f64,
    ) -> Result<Self, BoundsError> {
        let mut keys = Vec::new();
        let mut starts = Vec::new();
        let mut ranks = KeyIndexMap::<K>::new();

        for (index, (key, start)) in sections.into_iter().enumerate() {
            if !start.is_finite() {
                return Err(BoundsError::Unmeasured { index });
            }
            if let Some(&prev) = starts.last() {
                if start <= prev {
                    return Err(BoundsError::NotIncreasing { index });
                }
            }
            if ranks.insert(key.clone(), index).is_some() {
                return Err(BoundsError::DuplicateKey { index });
            }
            keys.push(key);
            starts.push(start);
        }

        let Some(&last) = starts.last() else {
            return Err(BoundsError::Empty);
        };
        if !end.is_finite() || end < last {
            return Err(BoundsError::InvalidEnd);
        }

        Ok(Self {
            keys,
            starts,
            end,
            ranks,
        })
    }

    /// Measures every section with `start_of` and subtracts `scroll_margin` from each offset.
    ///
    /// `start_of` returning `None` means the section has not been laid out yet.
    pub fn measure<'a>(
        sections: impl IntoIterator<Item = &'a K>,
        scroll_margin: f64,
        mut start_of: impl FnMut(&K) -> Option<f64>,
        end: Option<f64>,
    ) -> Result<Self, BoundsError>
    where
        K: 'a,
    {
        let mut measured = Vec::new();
        for (index, key) in sections.into_iter().enumerate() {
            let Some(start) = start_of(key) else {
                return Err(BoundsError::Unmeasured { index });
            };
            measured.push((key.clone(), start - scroll_margin));
        }
        if measured.is_empty() {
            return Err(BoundsError::Empty);
        }
        let end = end.ok_or(BoundsError::InvalidEnd)? - scroll_margin;
        Self::from_starts(measured, end)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false` for a constructed value; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn key(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.ranks.get(key).copied()
    }

    pub fn starts(&self) -> &[f64] {
        &self.starts
    }

    pub fn start(&self, index: usize) -> Option<f64> {
        self.starts.get(index).copied()
    }

    /// End of the section: the next section's start, or the list end for the last one.
    pub fn end(&self, index: usize) -> Option<f64> {
        if index >= self.starts.len() {
            return None;
        }
        Some(self.starts.get(index + 1).copied().unwrap_or(self.end))
    }

    pub fn span(&self, index: usize) -> Option<(f64, f64)> {
        Some((self.start(index)?, self.end(index)?))
    }

    pub fn list_end(&self) -> f64 {
        self.end
    }

    /// Section containing `offset`; see [`locator::locate`].
    pub fn locate(&self, offset: f64) -> usize {
        locator::locate(&self.starts, offset).unwrap_or(0)
    }
}
