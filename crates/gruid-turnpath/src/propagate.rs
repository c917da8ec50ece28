//! Forward propagation of cost changes through an existing subtree.

use crate::node::{NodeId, NodeStore};
use crate::settings::PathSettings;
use crate::traits::{AddReason, MoveRules};

/// Carry a cost decrease of `delta` at `head` down to every descendant.
///
/// Each child's moves and turns are restamped against its (updated) parent.
/// When a child's "out of moves" state flips, its step crosses a turn
/// boundary differently than before, so its cost is recomputed from the
/// step cost instead of shifted by the parent's delta. A child whose cost,
/// moves and turns all come out unchanged ends propagation for its subtree.
pub(crate) fn forward_propagate<G, R: MoveRules<G>>(
    store: &mut NodeStore,
    rules: &R,
    settings: &PathSettings<G>,
    head: NodeId,
    delta: i32,
) {
    debug_assert!(delta <= 0, "cost increase {delta} at {head}");
    let mut pending = vec![(head, delta)];

    while let Some((head, delta)) = pending.pop() {
        for child in store[head].children.clone() {
            debug_assert_eq!(store[child].parent(), Some(head));

            let (parent, node) = store.pair_mut(head, child);
            let old_moves = node.moves();
            let old_turns = node.turns();
            rules.on_node_added(Some(parent), node, AddReason::Reparent, settings);

            let mut child_delta = delta;
            if (old_moves == 0) != (node.moves() == 0) {
                let edge = rules.cost(parent, node, settings);
                child_delta = parent.known_cost() + edge - node.known_cost();
                debug_assert!(child_delta <= 0, "cost increase {child_delta} at {child}");
            }
            node.shift_cost(child_delta);
            debug_assert!(node.known_cost() > parent.known_cost());

            if child_delta != 0 || old_moves != node.moves() || old_turns != node.turns() {
                pending.push((child, child_delta));
            }
        }
    }
}
