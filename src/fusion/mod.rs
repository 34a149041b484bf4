//! Fusion of pairwise feature matches into multi-view tracks.
//!
//! Given the output of pairwise keypoint matching, this module
//! reconstructs, for every physical scene point, the maximal set of
//! image observations belonging to it. The pipeline:
//!
//! - [`registry::NodeRegistry`] - dense ids for every referenced
//!   (view, feature) node
//! - [`union_find::UnionFindEnum`] - equivalence classes over nodes;
//!   classes are candidate tracks
//! - [`builder::TracksBuilder`] - drives both, filters degenerate and
//!   under-supported classes, and exports the survivors
//!
//! # Example
//!
//! ```ignore
//! use rust_tracks::fusion::TracksBuilder;
//!
//! let mut builder = TracksBuilder::build(&pairs);
//! builder.filter(2);
//! builder.filter_pairwise_min_matches(10);
//! let tracks = builder.export_tracks()?;
//! ```

pub mod builder;
pub mod registry;
pub mod union_find;

// Re-export commonly used types
pub use builder::{DEFAULT_MIN_TRACK_LENGTH, TracksBuilder};
pub use registry::{NodeId, NodeRegistry};
pub use union_find::UnionFindEnum;
