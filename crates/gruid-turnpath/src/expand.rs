//! The best-first expansion step and edge relaxation.

use gruid_core::{Dir, Point};

use crate::PathFinder;
use crate::node::{NodeId, NodeStore, SearchNode, UNREACHABLE};
use crate::propagate::forward_propagate;
use crate::settings::PathSettings;
use crate::traits::{AddReason, Group, MoveRules};

impl<G: Group> PathFinder<G> {
    /// Expand the best frontier node towards `dest`.
    ///
    /// The best node is the open node with the lowest total cost, among
    /// those inside the turn budget and strictly cheaper than the known cost
    /// of the destination (if the destination has been reached). Returns
    /// `false` when there is no such node, which ends the search.
    pub(crate) fn process_node<R: MoveRules<G>>(&mut self, rules: &R, dest: Point) -> bool {
        let Some(group) = self.settings.group() else {
            return false;
        };
        let ceiling = self.end_node.map_or(UNREACHABLE, |id| self.store[id].known_cost());
        let max_path = self.settings.max_path();
        let Some(parent) = self
            .open
            .pop_best(&self.store, ceiling, |n| max_path < 0 || n.turns() <= max_path)
        else {
            return false;
        };
        let flags = self.settings.flags();
        let weight = self.settings.heuristic_weight();

        let parent_pos = self.store[parent].pos();
        debug_assert_eq!(self.store.find(parent_pos), Some(parent));
        let grandparent_pos = self.store[parent].parent().map(|id| self.store[id].pos());
        log::trace!(
            "expanding {parent_pos}: known {}, total {}",
            self.store[parent].known_cost(),
            self.store[parent].total_cost()
        );

        for dir in Dir::ALL {
            let Some(pos) = rules.adjacent(parent_pos, dir) else {
                continue;
            };
            if grandparent_pos == Some(pos) {
                continue;
            }

            let is_new;
            let child = match self.store.find(pos) {
                None => {
                    is_new = true;
                    let mut node = SearchNode::new(pos);
                    rules.on_node_added(
                        Some(&self.store[parent]),
                        &mut node,
                        AddReason::NewNode,
                        &self.settings,
                    );
                    node.set_heuristic_cost(weight * rules.estimate(pos, dest));
                    if !rules.can_join(&self.store[parent], &node, group, flags) {
                        continue;
                    }
                    let frontier = rules.can_be_frontier(&node, group, flags);
                    let id = self.store.insert(node);
                    if frontier {
                        self.open.push(id);
                    }
                    id
                }
                Some(id) => {
                    if !rules.can_join(&self.store[parent], &self.store[id], group, flags) {
                        continue;
                    }
                    is_new = false;
                    id
                }
            };
            debug_assert_eq!(self.store[child].pos(), pos);

            if pos == dest {
                self.end_node = Some(child);
            }

            relax(&mut self.store, rules, &self.settings, parent, child, is_new);
        }
        true
    }
}

/// Try to improve `child`'s path by routing it through `parent`.
///
/// On improvement the child is re-parented and every descendant it already
/// has is corrected by the cost change.
fn relax<G, R: MoveRules<G>>(
    store: &mut NodeStore,
    rules: &R,
    settings: &PathSettings<G>,
    parent: NodeId,
    child: NodeId,
    is_new: bool,
) {
    let parent_known = store[parent].known_cost();
    let child_known = store[child].known_cost();
    if parent_known >= child_known {
        // There is already a route to the child at least this cheap.
        return;
    }
    let edge = rules.cost(&store[parent], &store[child], settings);
    debug_assert!(edge > 0, "non-positive step cost {edge}");
    let new_cost = parent_known + edge;
    if new_cost >= child_known {
        return;
    }
    let delta = new_cost - child_known;
    store.node_mut(child).set_known_cost(new_cost);

    if let Some(old_parent) = store[child].parent() {
        debug_assert!(!is_new);
        log::trace!(
            "re-parenting {}: {} -> {} (cost {delta})",
            store[child].pos(),
            store[old_parent].pos(),
            store[parent].pos()
        );
        store.detach_child(old_parent, child);
        let (p, c) = store.pair_mut(parent, child);
        rules.on_node_added(Some(p), c, AddReason::Reparent, settings);
    }

    store.attach_child(parent, child);
    debug_assert!(store[child].children().is_empty() || !is_new);
    forward_propagate(store, rules, settings, child, delta);
    store.node_mut(child).parent = Some(parent);

    debug_assert!(store[child].known_cost() > store[parent].known_cost());
}
