//! Enumerable union-find over a fixed node universe.
//!
//! A plain disjoint-set forest answers `find` but cannot enumerate the
//! members of a class, which both filter passes need for every class.
//! This structure augments the forest with two intrusive lists:
//!
//! - a circular singly linked list of members per class, spliced in
//!   O(1) when two classes merge, so `items` walks a class directly;
//! - a doubly linked list of class representatives, so `classes` yields
//!   surviving classes without scanning the whole universe and
//!   `erase_class` unlinks a class in O(1).
//!
//! `unite` is only called while tracks are being fused; afterwards the
//! sole mutator is `erase_class`, and all reads go through `&self`.

/// Sentinel for "no node" in the intrusive lists.
const NIL: u32 = u32::MAX;

/// Union-find whose classes can be enumerated and erased.
#[derive(Debug, Clone)]
pub struct UnionFindEnum {
    parent: Vec<u32>,
    rank: Vec<u8>,
    /// Next member in the class's circular list.
    next_item: Vec<u32>,
    /// Previous representative in the class list; `NIL` at the head.
    class_prev: Vec<u32>,
    /// Next representative in the class list; `NIL` at the tail.
    class_next: Vec<u32>,
    first_class: u32,
    erased: Vec<bool>,
}

impl UnionFindEnum {
    /// Initialize `n` singleton classes over the universe `[0, n)`.
    pub fn new(n: usize) -> Self {
        assert!(n < NIL as usize, "node universe too large");
        let mut class_prev = vec![NIL; n];
        let mut class_next = vec![NIL; n];
        for i in 0..n {
            if i > 0 {
                class_prev[i] = (i - 1) as u32;
            }
            if i + 1 < n {
                class_next[i] = (i + 1) as u32;
            }
        }
        Self {
            parent: (0..n as u32).collect(),
            rank: vec![0; n],
            next_item: (0..n as u32).collect(),
            class_prev,
            class_next,
            first_class: if n == 0 { NIL } else { 0 },
            erased: vec![false; n],
        }
    }

    /// Size of the node universe, erased classes included.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of `a`'s class, compressing the path behind it.
    pub fn find(&mut self, a: u32) -> u32 {
        let mut root = a;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut node = a;
        while self.parent[node as usize] != node {
            let up = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = up;
        }

        root
    }

    /// Merge the classes of `a` and `b`; no-op if already merged.
    ///
    /// Returns the surviving representative.
    pub fn unite(&mut self, a: u32, b: u32) -> u32 {
        let mut winner = self.find(a);
        let mut loser = self.find(b);
        if winner == loser {
            return winner;
        }

        if self.rank[winner as usize] < self.rank[loser as usize] {
            std::mem::swap(&mut winner, &mut loser);
        }
        if self.rank[winner as usize] == self.rank[loser as usize] {
            let r = self.rank[winner as usize];
            self.rank[winner as usize] = r.saturating_add(1);
        }
        self.parent[loser as usize] = winner;

        // Swapping the two next pointers concatenates the circular
        // member lists; the loser leaves the class list.
        self.next_item.swap(winner as usize, loser as usize);
        self.unlink_class(loser);
        winner
    }

    /// Remove an entire class from enumeration.
    ///
    /// `repr` must be a live representative, as yielded by [`classes`].
    ///
    /// [`classes`]: UnionFindEnum::classes
    pub fn erase_class(&mut self, repr: u32) {
        debug_assert_eq!(self.parent[repr as usize], repr);
        debug_assert!(!self.erased[repr as usize]);
        self.erased[repr as usize] = true;
        self.unlink_class(repr);
    }

    /// Number of live classes.
    pub fn num_classes(&self) -> usize {
        self.classes().count()
    }

    /// Iterate over live class representatives.
    ///
    /// Order is stable: representatives appear in ascending id order,
    /// and erasure preserves the relative order of the survivors.
    pub fn classes(&self) -> impl Iterator<Item = u32> + '_ {
        let mut cur = self.first_class;
        std::iter::from_fn(move || {
            if cur == NIL {
                return None;
            }
            let repr = cur;
            cur = self.class_next[cur as usize];
            Some(repr)
        })
    }

    /// Iterate over the members of a live class, starting at `repr`.
    pub fn items(&self, repr: u32) -> impl Iterator<Item = u32> + '_ {
        debug_assert_eq!(self.parent[repr as usize], repr);
        debug_assert!(!self.erased[repr as usize]);
        let mut cur = Some(repr);
        std::iter::from_fn(move || {
            let node = cur?;
            let next = self.next_item[node as usize];
            cur = if next == repr { None } else { Some(next) };
            Some(node)
        })
    }

    fn unlink_class(&mut self, repr: u32) {
        let prev = self.class_prev[repr as usize];
        let next = self.class_next[repr as usize];
        if prev == NIL {
            self.first_class = next;
        } else {
            self.class_next[prev as usize] = next;
        }
        if next != NIL {
            self.class_prev[next as usize] = prev;
        }
        self.class_prev[repr as usize] = NIL;
        self.class_next[repr as usize] = NIL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_items(uf: &UnionFindEnum, repr: u32) -> Vec<u32> {
        let mut items: Vec<u32> = uf.items(repr).collect();
        items.sort_unstable();
        items
    }

    #[test]
    fn test_new_singletons() {
        let uf = UnionFindEnum::new(4);

        assert_eq!(uf.len(), 4);
        assert_eq!(uf.num_classes(), 4);
        assert_eq!(uf.classes().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        for i in 0..4 {
            assert_eq!(uf.items(i).collect::<Vec<_>>(), vec![i]);
        }
    }

    #[test]
    fn test_empty_universe() {
        let uf = UnionFindEnum::new(0);
        assert!(uf.is_empty());
        assert_eq!(uf.num_classes(), 0);
        assert_eq!(uf.classes().count(), 0);
    }

    #[test]
    fn test_unite_merges_classes() {
        let mut uf = UnionFindEnum::new(5);

        let repr = uf.unite(1, 3);
        assert_eq!(uf.num_classes(), 4);
        assert_eq!(uf.find(1), uf.find(3));
        assert_eq!(sorted_items(&uf, repr), vec![1, 3]);

        // The absorbed root no longer appears as a class.
        let absorbed = if repr == 1 { 3 } else { 1 };
        let classes: Vec<u32> = uf.classes().collect();
        assert!(classes.contains(&repr));
        assert!(!classes.contains(&absorbed));
        assert_eq!(classes.len(), 4);
    }

    #[test]
    fn test_unite_idempotent() {
        let mut uf = UnionFindEnum::new(3);

        let first = uf.unite(0, 1);
        let second = uf.unite(0, 1);
        let third = uf.unite(1, 0);

        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(uf.num_classes(), 2);
        assert_eq!(sorted_items(&uf, first), vec![0, 1]);
    }

    #[test]
    fn test_transitive_chain() {
        let mut uf = UnionFindEnum::new(6);

        uf.unite(0, 1);
        uf.unite(1, 2);
        uf.unite(4, 5);

        assert_eq!(uf.num_classes(), 3);
        assert_eq!(uf.find(0), uf.find(2));
        assert_ne!(uf.find(0), uf.find(4));

        let repr = uf.find(2);
        assert_eq!(sorted_items(&uf, repr), vec![0, 1, 2]);
    }

    #[test]
    fn test_erase_class_skips_enumeration() {
        let mut uf = UnionFindEnum::new(4);

        uf.unite(0, 1);
        let repr = uf.find(0);
        uf.erase_class(repr);

        assert_eq!(uf.num_classes(), 2);
        let classes: Vec<u32> = uf.classes().collect();
        assert!(!classes.contains(&repr));
        assert_eq!(classes, vec![2, 3]);
    }

    #[test]
    fn test_class_order_stable_after_erase() {
        let mut uf = UnionFindEnum::new(5);

        uf.erase_class(2);
        assert_eq!(uf.classes().collect::<Vec<_>>(), vec![0, 1, 3, 4]);

        uf.erase_class(0);
        assert_eq!(uf.classes().collect::<Vec<_>>(), vec![1, 3, 4]);

        uf.erase_class(4);
        assert_eq!(uf.classes().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_member_lists_splice() {
        let mut uf = UnionFindEnum::new(6);

        uf.unite(0, 1);
        uf.unite(2, 3);
        let (a, b) = (uf.find(0), uf.find(2));
        let repr = uf.unite(a, b);

        let items = sorted_items(&uf, repr);
        assert_eq!(items, vec![0, 1, 2, 3]);
        // Each member is yielded exactly once.
        assert_eq!(uf.items(repr).count(), 4);
    }
}
