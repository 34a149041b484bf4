//! Output-side track types and queries over an exported track map.
//!
//! A track is the set of observations of one scene point: a mapping
//! from view to feature index, injective in the view by construction.
//! The helpers here answer the questions reconstruction pipelines ask
//! of a track map: which tracks are visible in a given set of views,
//! which feature indices a track selects in one view, and summary
//! statistics.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::matches::{FeatureIdx, IndMatch, ViewKey};

/// Unique identifier for an exported track.
///
/// Assigned contiguously from 0 at export time, in class-iteration
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackId(pub u32);

impl TrackId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Observations of one scene point: view → feature index.
pub type Track<V> = BTreeMap<V, FeatureIdx>;

/// Exported tracks, ordered by id.
pub type TrackMap<V> = BTreeMap<TrackId, Track<V>>;

/// Tracks observed in *every* one of the given views.
///
/// Each returned track is restricted to the requested views. An empty
/// view set selects nothing.
pub fn tracks_in_views<V: ViewKey>(views: &BTreeSet<V>, tracks: &TrackMap<V>) -> TrackMap<V> {
    let mut out = TrackMap::new();
    if views.is_empty() {
        return out;
    }
    for (id, track) in tracks {
        if views.iter().all(|view| track.contains_key(view)) {
            let sub: Track<V> = views
                .iter()
                .map(|view| (*view, track[view]))
                .collect();
            out.insert(*id, sub);
        }
    }
    out
}

/// All track ids in the map, ascending.
pub fn track_ids<V: ViewKey>(tracks: &TrackMap<V>) -> BTreeSet<TrackId> {
    tracks.keys().copied().collect()
}

/// Feature indices selected in `view` by the given tracks.
pub fn feature_indices_in_view<V: ViewKey>(
    tracks: &TrackMap<V>,
    ids: &BTreeSet<TrackId>,
    view: V,
) -> Vec<FeatureIdx> {
    tracks
        .iter()
        .filter(|(id, _)| ids.contains(id))
        .filter_map(|(_, track)| track.get(&view).copied())
        .collect()
}

/// Convert two-view tracks back into indexed matches.
///
/// Every selected track must span exactly two views; the lower view
/// supplies `train_idx` and the higher `query_idx`, the same
/// orientation as [`crate::matches::PairMatches`]. Unknown ids and
/// tracks of any other length are skipped.
pub fn tracks_to_matches<V: ViewKey>(tracks: &TrackMap<V>, keep: &[TrackId]) -> Vec<IndMatch> {
    let mut out = Vec::with_capacity(keep.len());
    for id in keep {
        let Some(track) = tracks.get(id) else {
            continue;
        };
        if track.len() != 2 {
            continue;
        }
        let mut obs = track.values();
        let (Some(&train), Some(&query)) = (obs.next(), obs.next()) else {
            continue;
        };
        out.push(IndMatch::new(query, train));
    }
    out
}

/// Histogram of track lengths: length → number of tracks.
pub fn track_length_histogram<V: ViewKey>(tracks: &TrackMap<V>) -> BTreeMap<usize, usize> {
    let mut hist = BTreeMap::new();
    for track in tracks.values() {
        *hist.entry(track.len()).or_insert(0) += 1;
    }
    hist
}

/// Set of views appearing in any track.
pub fn views_in_tracks<V: ViewKey>(tracks: &TrackMap<V>) -> BTreeSet<V> {
    tracks
        .values()
        .flat_map(|track| track.keys().copied())
        .collect()
}
