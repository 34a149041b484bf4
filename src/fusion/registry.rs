//! Registry assigning dense integer ids to (view, feature) nodes.
//!
//! Later phases scan class members in id order, so lookups are served
//! from a flat sorted array rather than a hash table: at node counts in
//! the millions, the binary search stays in cache where hashed probes
//! would not. Ids are assigned in ascending key order, which makes the
//! array its own forward and reverse index.

use std::collections::BTreeSet;

use crate::matches::{FeatureIdx, ViewKey};

/// Dense id of one (view, feature) node.
///
/// Valid for the lifetime of the registry that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Bijection between node keys and dense [`NodeId`]s.
///
/// Built once from the deduplicated endpoint set and immutable
/// afterwards, so a `NodeId` handed out here stays a valid reference
/// for the entire fusion lifecycle.
#[derive(Debug, Clone)]
pub struct NodeRegistry<V> {
    /// Sorted by key; the position of a key is its id.
    nodes: Vec<(V, FeatureIdx)>,
}

impl<V: ViewKey> NodeRegistry<V> {
    /// Materialize the registry from the deduplicated endpoint set.
    ///
    /// `BTreeSet` iterates in ascending order, so position, id, and key
    /// rank all coincide.
    pub fn from_keys(keys: BTreeSet<(V, FeatureIdx)>) -> Self {
        Self {
            nodes: keys.into_iter().collect(),
        }
    }

    /// Number of distinct nodes referenced by the input.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Dense id of a node key, if the key was referenced by the input.
    pub fn node_id(&self, key: &(V, FeatureIdx)) -> Option<NodeId> {
        self.nodes
            .binary_search(key)
            .ok()
            .map(|pos| NodeId(pos as u32))
    }

    /// Node key for a dense id.
    ///
    /// Ids only come from this registry, so an out-of-range id is a
    /// caller bug and panics.
    pub fn resolve(&self, id: NodeId) -> (V, FeatureIdx) {
        self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::ViewId;

    fn create_test_registry() -> NodeRegistry<ViewId> {
        let mut keys = BTreeSet::new();
        keys.insert((ViewId::new(1), 5));
        keys.insert((ViewId::new(0), 9));
        keys.insert((ViewId::new(0), 2));
        // Duplicate insertion is a no-op in the set.
        keys.insert((ViewId::new(1), 5));
        NodeRegistry::from_keys(keys)
    }

    #[test]
    fn test_ids_follow_key_order() {
        let reg = create_test_registry();

        assert_eq!(reg.len(), 3);
        assert_eq!(reg.node_id(&(ViewId::new(0), 2)), Some(NodeId(0)));
        assert_eq!(reg.node_id(&(ViewId::new(0), 9)), Some(NodeId(1)));
        assert_eq!(reg.node_id(&(ViewId::new(1), 5)), Some(NodeId(2)));
    }

    #[test]
    fn test_unknown_key() {
        let reg = create_test_registry();
        assert_eq!(reg.node_id(&(ViewId::new(2), 0)), None);
        assert_eq!(reg.node_id(&(ViewId::new(0), 3)), None);
    }

    #[test]
    fn test_resolve_round_trip() {
        let reg = create_test_registry();
        for pos in 0..reg.len() {
            let key = reg.resolve(NodeId(pos as u32));
            assert_eq!(reg.node_id(&key), Some(NodeId(pos as u32)));
        }
    }

    #[test]
    #[should_panic]
    fn test_resolve_out_of_range_panics() {
        let reg = create_test_registry();
        reg.resolve(NodeId(3));
    }

    #[test]
    fn test_empty_registry() {
        let reg: NodeRegistry<ViewId> = NodeRegistry::from_keys(BTreeSet::new());
        assert!(reg.is_empty());
        assert_eq!(reg.node_id(&(ViewId::new(0), 0)), None);
    }
}
