//! Input-side types for pairwise feature correspondences.
//!
//! A matcher front-end produces, for each ordered pair of views, a list
//! of indexed correspondences in OpenCV `DMatch` convention. These types
//! are the contract between any such front-end and the fusion engine.
//! The engine never inspects image contents: a view is just an opaque
//! handle, a feature just an index into that view's keypoint list.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

/// Index of a keypoint within a single view's feature list.
pub type FeatureIdx = u32;

/// Opaque view handle accepted by the fusion engine.
///
/// Any cheap-to-copy, totally ordered, hashable identifier qualifies.
/// Blanket-implemented, so `u32`, `char`, or a caller's own newtype all
/// work out of the box; [`ViewId`] is the handle used by this crate's
/// own I/O layer.
pub trait ViewKey: Copy + Eq + Ord + Hash + fmt::Debug {}

impl<T: Copy + Eq + Ord + Hash + fmt::Debug> ViewKey for T {}

/// Unique identifier for a view (image) within a matching session.
///
/// ViewIds are lightweight handles for cross-referencing views without
/// holding image data; assignment is up to the producer (the bundled
/// CSV importer uses the numbers found in the file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(pub u32);

impl ViewId {
    /// Create a new ViewId with the given value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view{}", self.0)
    }
}

/// A single indexed correspondence between two views.
///
/// Field naming follows OpenCV's `DMatch`: within a [`PairMatches`]
/// record, `train_idx` indexes a feature of the first view and
/// `query_idx` a feature of the second. This orientation is fixed by
/// the match producer and honored by every consumer in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndMatch {
    /// Feature index in the second view of the pair.
    pub query_idx: FeatureIdx,
    /// Feature index in the first view of the pair.
    pub train_idx: FeatureIdx,
}

impl IndMatch {
    pub fn new(query_idx: FeatureIdx, train_idx: FeatureIdx) -> Self {
        Self {
            query_idx,
            train_idx,
        }
    }
}

/// All matches between one ordered pair of views.
#[derive(Debug, Clone)]
pub struct PairMatches<V> {
    /// First view of the pair; matched by `train_idx`.
    pub first: V,
    /// Second view of the pair; matched by `query_idx`.
    pub second: V,
    /// Correspondences asserted between the two views.
    pub matches: Vec<IndMatch>,
}

impl<V: ViewKey> PairMatches<V> {
    pub fn new(first: V, second: V, matches: Vec<IndMatch>) -> Self {
        Self {
            first,
            second,
            matches,
        }
    }
}

/// Flatten a `(first, second) → matches` map into pair records.
///
/// Matchers often accumulate results keyed by view pair; this converts
/// that shape into the sequence the fusion builder consumes, in
/// ascending pair order.
pub fn pairs_from_map<V: ViewKey>(map: BTreeMap<(V, V), Vec<IndMatch>>) -> Vec<PairMatches<V>> {
    map.into_iter()
        .map(|((first, second), matches)| PairMatches::new(first, second, matches))
        .collect()
}
