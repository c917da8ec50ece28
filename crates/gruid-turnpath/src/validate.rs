//! Structural checks of the search tree.

use std::error::Error;
use std::fmt;

use gruid_core::Point;

use crate::PathFinder;
use crate::node::NodeId;

/// A broken invariant of the search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The origin of the last query has no node, or a non-zero cost.
    BadOrigin(Point),
    /// The position index points a cell to a node for another cell.
    IndexMismatch { pos: Point, id: NodeId },
    /// A node other than the origin has no parent.
    Orphan(NodeId),
    /// A parent does not list its child, or lists a node with another
    /// parent.
    BrokenLink { parent: NodeId, child: NodeId },
    /// A child is not strictly more expensive than its parent.
    CostNotIncreasing { parent: NodeId, child: NodeId },
    /// A total cost is out of step with its known and heuristic costs.
    StaleTotal(NodeId),
    /// The frontier holds an id the store does not know, or holds it twice.
    BadFrontier(NodeId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadOrigin(p) => write!(f, "origin {p} is missing or has a non-zero cost"),
            Self::IndexMismatch { pos, id } => write!(f, "cell {pos} indexed to node {id} of another cell"),
            Self::Orphan(id) => write!(f, "node {id} has no parent"),
            Self::BrokenLink { parent, child } => write!(f, "parent link {parent} -> {child} is one-sided"),
            Self::CostNotIncreasing { parent, child } => {
                write!(f, "node {child} is not more expensive than its parent {parent}")
            }
            Self::StaleTotal(id) => write!(f, "node {id} has a stale total cost"),
            Self::BadFrontier(id) => write!(f, "frontier entry {id} is invalid"),
        }
    }
}

impl Error for TreeError {}

impl<G> PathFinder<G> {
    /// Check the search tree for internal consistency.
    ///
    /// Costs strictly increase from parent to child, parent and children
    /// links agree, every cell maps to its own node and totals match their
    /// parts. An empty tree is valid.
    pub fn validate_tree(&self) -> Result<(), TreeError> {
        if self.store.is_empty() {
            return Ok(());
        }
        let origin = self.start.and_then(|p| self.store.find(p).map(|id| (p, id)));
        match origin {
            Some((_, id)) if self.store[id].known_cost() == 0 && self.store[id].parent().is_none() => {}
            _ => return Err(TreeError::BadOrigin(self.start.unwrap_or_default())),
        }

        for (id, node) in self.store.iter() {
            if self.store.find(node.pos()) != Some(id) {
                return Err(TreeError::IndexMismatch { pos: node.pos(), id });
            }
            if node.total_cost() != node.known_cost().saturating_add(node.heuristic_cost()) {
                return Err(TreeError::StaleTotal(id));
            }
            match node.parent() {
                None if origin.is_some_and(|(_, o)| o == id) => {}
                None => return Err(TreeError::Orphan(id)),
                Some(parent) => {
                    let Some(p) = self.store.get(parent) else {
                        return Err(TreeError::BrokenLink { parent, child: id });
                    };
                    if !p.children().contains(&id) {
                        return Err(TreeError::BrokenLink { parent, child: id });
                    }
                    if node.known_cost() <= p.known_cost() {
                        return Err(TreeError::CostNotIncreasing { parent, child: id });
                    }
                }
            }
            for &child in node.children() {
                if self.store.get(child).and_then(|c| c.parent()) != Some(id) {
                    return Err(TreeError::BrokenLink { parent: id, child });
                }
            }
        }

        let mut seen = vec![false; self.store.len()];
        for id in self.open.iter() {
            match seen.get_mut(id.index()) {
                Some(s) if !*s => *s = true,
                _ => return Err(TreeError::BadFrontier(id)),
            }
        }
        Ok(())
    }
}
