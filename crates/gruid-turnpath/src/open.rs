use crate::node::{NodeId, NodeStore, SearchNode};

/// The search frontier: nodes visited but not expanded yet.
///
/// Kept in insertion order and scanned linearly. Node costs change in place
/// (heuristics are recomputed when the destination moves, and re-parenting
/// lowers known costs), which a heap would have to be rebuilt for. Ties go
/// to the node that entered the frontier first.
#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    ids: Vec<NodeId>,
}

impl OpenSet {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub(crate) fn push(&mut self, id: NodeId) {
        self.ids.push(id);
    }

    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }

    pub(crate) fn clear(&mut self) {
        self.ids.clear();
    }

    /// Remove and return the eligible node with the lowest total cost.
    ///
    /// Only nodes whose total cost is strictly below `ceiling` and that pass
    /// `eligible` are considered.
    pub(crate) fn pop_best(
        &mut self,
        store: &NodeStore,
        ceiling: i32,
        eligible: impl Fn(&SearchNode) -> bool,
    ) -> Option<NodeId> {
        let mut best = None;
        let mut lowest = ceiling;
        for (i, &id) in self.ids.iter().enumerate() {
            let node = &store[id];
            if node.total_cost() < lowest && eligible(node) {
                best = Some(i);
                lowest = node.total_cost();
            }
        }
        best.map(|i| self.ids.remove(i))
    }
}
