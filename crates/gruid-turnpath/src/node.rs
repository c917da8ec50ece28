//! Search tree storage: [`SearchNode`], [`NodeId`] and the [`NodeStore`]
//! arena.

use std::fmt;
use std::ops::Index;

use gruid_core::{Dir, Point};
use indexmap::IndexMap;
use smallvec::SmallVec;

/// Sentinel known cost of a node no path has been confirmed to yet.
pub const UNREACHABLE: i32 = i32::MAX;

/// Stable handle to a node of the current search tree.
///
/// Handles stay valid until the finder discards its tree; a handle from a
/// previous tree may point to an unrelated node or to nothing at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) type Children = SmallVec<[NodeId; Dir::COUNT]>;

// ---------------------------------------------------------------------------
// SearchNode
// ---------------------------------------------------------------------------

/// One visited cell of the search tree.
///
/// Costs and tree links are owned by the finder. The movement rules may only
/// write the two auxiliary values, `moves` and `turns`, which the finder
/// carries along without interpreting them (apart from comparing `turns`
/// against the turn budget).
#[derive(Clone, Debug)]
pub struct SearchNode {
    pos: Point,
    pub(crate) known_cost: i32,
    pub(crate) heuristic_cost: i32,
    pub(crate) total_cost: i32,
    moves: i32,
    turns: i32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Children,
}

impl SearchNode {
    /// A detached node at `pos` with no confirmed path.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            known_cost: UNREACHABLE,
            heuristic_cost: 0,
            total_cost: UNREACHABLE,
            moves: 0,
            turns: 0,
            parent: None,
            children: Children::new(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Cost of the best confirmed path from the origin.
    #[inline]
    pub fn known_cost(&self) -> i32 {
        self.known_cost
    }

    /// Weighted estimate of the remaining cost to the destination.
    #[inline]
    pub fn heuristic_cost(&self) -> i32 {
        self.heuristic_cost
    }

    /// `known_cost + heuristic_cost`, the frontier ordering key.
    #[inline]
    pub fn total_cost(&self) -> i32 {
        self.total_cost
    }

    /// Movement points left on arrival, as stamped by the rules.
    #[inline]
    pub fn moves(&self) -> i32 {
        self.moves
    }

    /// Turns elapsed on arrival, as stamped by the rules.
    #[inline]
    pub fn turns(&self) -> i32 {
        self.turns
    }

    #[inline]
    pub fn set_moves(&mut self, moves: i32) {
        self.moves = moves;
    }

    #[inline]
    pub fn set_turns(&mut self, turns: i32) {
        self.turns = turns;
    }

    /// The node this one is most cheaply reached from. `None` for the origin
    /// and for a node not attached yet.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Nodes whose parent is this node.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Set the known cost and keep the total in step.
    #[inline]
    pub(crate) fn set_known_cost(&mut self, known: i32) {
        self.known_cost = known;
        self.total_cost = known.saturating_add(self.heuristic_cost);
    }

    /// Set the heuristic cost and keep the total in step.
    #[inline]
    pub(crate) fn set_heuristic_cost(&mut self, heuristic: i32) {
        self.heuristic_cost = heuristic;
        self.total_cost = self.known_cost.saturating_add(heuristic);
    }

    /// Shift known and total cost by `delta`.
    #[inline]
    pub(crate) fn shift_cost(&mut self, delta: i32) {
        self.known_cost += delta;
        self.total_cost += delta;
    }
}

// ---------------------------------------------------------------------------
// NodeStore
// ---------------------------------------------------------------------------

/// Every cell visited in the current search episode, one node per cell.
///
/// Nodes live in a flat arena and are addressed by [`NodeId`]; a position
/// index maps cells to their node. The store only grows until it is cleared,
/// so ids handed out stay valid for the whole episode.
#[derive(Debug, Default)]
pub(crate) struct NodeStore {
    nodes: Vec<SearchNode>,
    by_pos: IndexMap<Point, NodeId>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at `pos`, if the cell was visited.
    #[inline]
    pub fn find(&self, pos: Point) -> Option<NodeId> {
        self.by_pos.get(&pos).copied()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.index()]
    }

    /// Nodes in visiting order, with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Add a node for a cell not visited yet.
    pub(crate) fn insert(&mut self, node: SearchNode) -> NodeId {
        debug_assert!(
            !self.by_pos.contains_key(&node.pos()),
            "cell {} already has a node",
            node.pos()
        );
        let id = NodeId(self.nodes.len() as u32);
        self.by_pos.insert(node.pos(), id);
        self.nodes.push(node);
        id
    }

    /// Drop every node. Outstanding ids become meaningless.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.by_pos.clear();
    }

    /// Borrow `parent` shared and `child` exclusively at the same time.
    pub(crate) fn pair_mut(&mut self, parent: NodeId, child: NodeId) -> (&SearchNode, &mut SearchNode) {
        let (p, c) = (parent.index(), child.index());
        debug_assert_ne!(p, c, "a node cannot be its own parent");
        if p < c {
            let (lo, hi) = self.nodes.split_at_mut(c);
            (&lo[p], &mut hi[0])
        } else {
            let (lo, hi) = self.nodes.split_at_mut(p);
            (&hi[0], &mut lo[c])
        }
    }

    /// Make `child` a tree child of `parent` in the children index.
    ///
    /// Only the children list is touched; the caller sets the child's parent
    /// link.
    pub(crate) fn attach_child(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.node_mut(parent).children;
        debug_assert!(children.len() < Dir::COUNT, "node {parent} has too many children");
        children.push(child);
    }

    /// Remove `child` from `parent`'s children list.
    pub(crate) fn detach_child(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.node_mut(parent).children;
        let before = children.len();
        children.retain(|c| *c != child);
        debug_assert_eq!(children.len() + 1, before, "node {child} was not a child of {parent}");
    }
}

impl Index<NodeId> for NodeStore {
    type Output = SearchNode;

    #[inline]
    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }
}
