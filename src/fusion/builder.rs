//! Track fusion from pairwise correspondences.
//!
//! Implements the unordered feature-tracking scheme of Moulon and
//! Monasse, "Unordered feature tracking made fast and easy" (CVMP 2012):
//! register every referenced (view, feature) node, union the two
//! endpoints of every match, then prune classes that are inconsistent or
//! weakly supported. Each surviving class is a track: the observations
//! of one scene point, at most one per view.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::io::Write;

use anyhow::{Result, bail};
use tracing::debug;

use crate::matches::{PairMatches, ViewKey};
use crate::tracks::{Track, TrackId, TrackMap};

use super::registry::{NodeId, NodeRegistry};
use super::union_find::UnionFindEnum;

/// Default minimum number of distinct views for a track to survive
/// [`TracksBuilder::filter`].
pub const DEFAULT_MIN_TRACK_LENGTH: usize = 2;

/// Fuses pairwise matches into candidate tracks and filters them.
///
/// A builder is a single-use pipeline: construct with [`build`], apply
/// filters in any order and any number of times, then export. Building
/// is the constructor, so no filter can ever observe an unbuilt state,
/// and the exporters borrow immutably, so nothing can mutate the classes
/// while an export is in progress.
///
/// [`build`]: TracksBuilder::build
pub struct TracksBuilder<V> {
    registry: NodeRegistry<V>,
    classes: UnionFindEnum,
}

impl<V: ViewKey> TracksBuilder<V> {
    /// Fuse a series of pairwise matches by transitive closure.
    ///
    /// Two passes over the input: the first collects every match
    /// endpoint into an ordered set so that node ids are stable before
    /// any union is issued, the second unions the endpoint pair of every
    /// match. Duplicate matches produce redundant unions, which are
    /// harmless.
    pub fn build(pairs: &[PairMatches<V>]) -> Self {
        let mut keys = BTreeSet::new();
        for pair in pairs {
            for m in &pair.matches {
                keys.insert((pair.first, m.train_idx));
                keys.insert((pair.second, m.query_idx));
            }
        }

        let registry = NodeRegistry::from_keys(keys);
        let mut classes = UnionFindEnum::new(registry.len());

        for pair in pairs {
            for m in &pair.matches {
                let a = registry
                    .node_id(&(pair.first, m.train_idx))
                    .expect("endpoint interned in first pass");
                let b = registry
                    .node_id(&(pair.second, m.query_idx))
                    .expect("endpoint interned in first pass");
                classes.unite(a.0, b.0);
            }
        }

        Self { registry, classes }
    }

    /// Number of current candidate tracks.
    pub fn num_tracks(&self) -> usize {
        self.classes.num_classes()
    }

    /// Remove conflicting and under-length classes.
    ///
    /// A class is erased when two of its members come from the same view
    /// (a scene point projects into a view at most once, so such a class
    /// fused two distinct points and cannot be split safely) or when it
    /// spans fewer than `min_track_length` distinct views. A class of
    /// exactly `min_track_length` views survives.
    ///
    /// Returns the number of erased classes.
    pub fn filter(&mut self, min_track_length: usize) -> usize {
        let mut to_erase = Vec::new();
        for repr in self.classes.classes() {
            let mut len = 0usize;
            let mut views = HashSet::new();
            for item in self.classes.items(repr) {
                let (view, _) = self.registry.resolve(NodeId(item));
                views.insert(view);
                len += 1;
            }
            if views.len() != len || views.len() < min_track_length {
                to_erase.push(repr);
            }
        }

        debug!("conflict filter: erasing {} classes", to_erase.len());
        for repr in &to_erase {
            self.classes.erase_class(*repr);
        }
        to_erase.len()
    }

    /// Remove tracks whose pairwise support is too weak.
    ///
    /// For every pair of views, the tracks observed in both are
    /// intersected; if fewer than `min_occurrences` tracks are shared,
    /// every track in that intersection is marked. The inner iteration
    /// starts at the outer view, so each view is also paired with
    /// itself and the threshold applies to each view's own track count.
    /// All marked classes are erased once, after the sweep.
    ///
    /// Returns the number of erased classes.
    pub fn filter_pairwise_min_matches(&mut self, min_occurrences: usize) -> usize {
        let mut tracks_per_view: BTreeMap<V, BTreeSet<u32>> = BTreeMap::new();
        for repr in self.classes.classes() {
            for item in self.classes.items(repr) {
                let (view, _) = self.registry.resolve(NodeId(item));
                tracks_per_view.entry(view).or_default().insert(repr);
            }
        }

        let mut to_erase: Vec<u32> = Vec::new();
        for (view, set_a) in &tracks_per_view {
            for (_, set_b) in tracks_per_view.range(*view..) {
                let shared: Vec<u32> = set_a.intersection(set_b).copied().collect();
                if shared.len() < min_occurrences {
                    to_erase.extend(shared);
                }
            }
        }

        to_erase.sort_unstable();
        to_erase.dedup();
        debug!("pairwise support filter: erasing {} classes", to_erase.len());
        for repr in &to_erase {
            self.classes.erase_class(*repr);
        }
        to_erase.len()
    }

    /// Export surviving classes as an ordered track map.
    ///
    /// Track ids are contiguous from 0 in class-iteration order, the
    /// same order [`export_to_stream`] numbers its classes, so both
    /// exporters agree at any given point in the lifecycle.
    ///
    /// Fails if a class still contains two observations of one view.
    /// That cannot happen once [`filter`] has run; exporting unfiltered
    /// conflicting input reports the duplicated view instead of silently
    /// keeping one observation.
    ///
    /// [`filter`]: TracksBuilder::filter
    /// [`export_to_stream`]: TracksBuilder::export_to_stream
    pub fn export_tracks(&self) -> Result<TrackMap<V>> {
        let mut tracks = TrackMap::new();
        for (cpt, repr) in self.classes.classes().enumerate() {
            let mut track = Track::new();
            for item in self.classes.items(repr) {
                let (view, feat) = self.registry.resolve(NodeId(item));
                if track.insert(view, feat).is_some() {
                    bail!(
                        "track {} observes view {:?} twice; run the conflict filter before exporting",
                        cpt,
                        view
                    );
                }
            }
            tracks.insert(TrackId(cpt as u32), track);
        }
        Ok(tracks)
    }

    /// Write a plain-text description of every surviving class.
    ///
    /// One block per class: a `Class:` header with the class number, an
    /// indented `track length:` line, then one `<view>  <featIdx>` line
    /// per member. Classes are numbered in the same class-iteration
    /// order as [`export_tracks`].
    ///
    /// [`export_tracks`]: TracksBuilder::export_tracks
    pub fn export_to_stream<W: Write>(&self, out: &mut W) -> Result<()>
    where
        V: fmt::Display,
    {
        for (cpt, repr) in self.classes.classes().enumerate() {
            writeln!(out, "Class: {}", cpt)?;
            writeln!(out, "\ttrack length: {}", self.classes.items(repr).count())?;
            for item in self.classes.items(repr) {
                let (view, feat) = self.registry.resolve(NodeId(item));
                writeln!(out, "{}  {}", view, feat)?;
            }
        }
        Ok(())
    }
}
