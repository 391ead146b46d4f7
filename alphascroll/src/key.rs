#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Identifier → rank lookup used by [`crate::SectionBounds`].
#[cfg(feature = "std")]
pub(crate) type KeyIndexMap<K> = HashMap<K, usize>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyIndexMap<K> = BTreeMap<K, usize>;

/// Bound for section identifiers.
///
/// With `std` this is `Hash + Eq + Clone`; without it, `Ord + Clone`.
#[cfg(feature = "std")]
pub trait SectionKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> SectionKey for K {}

#[cfg(not(feature = "std"))]
pub trait SectionKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> SectionKey for K {}
