use std::fmt;

use gruid_core::{Dir, Point};

use crate::node::SearchNode;
use crate::settings::{Domain, MoveFlags, PathSettings};

/// A moving agent as seen by the search.
///
/// Implement this for whatever handle the game keeps for a group: an id, a
/// shared pointer, or the group value itself.
pub trait Group {
    /// Identity of the group. Two settings with the same id and flags share
    /// a search tree.
    type Id: Copy + Eq + fmt::Debug;

    fn id(&self) -> Self::Id;

    fn domain(&self) -> Domain;

    /// Whole moves per turn, before promotions and terrain bonuses.
    fn base_moves(&self) -> i32;

    /// Movement points available at the start of a turn.
    fn max_moves(&self) -> i32;

    /// Movement points left this turn.
    fn moves_left(&self) -> i32;

    /// The cell the group stands on.
    fn position(&self) -> Point;
}

/// Why [`MoveRules::on_node_added`] is being called.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AddReason {
    /// The origin of a fresh search tree. There is no parent.
    Initial,
    /// A cell visited for the first time, tentatively attached to the parent.
    NewNode,
    /// An existing node got a cheaper parent, or its parent's path changed.
    Reparent,
}

/// Grid adjacency.
pub trait PlotGrid {
    /// The cell one step from `p` in direction `dir`, or `None` if there is
    /// none (map edge, or a direction this grid does not connect).
    fn adjacent(&self, p: Point, dir: Dir) -> Option<Point>;

    /// Whether `p` is a cell of this grid.
    fn contains(&self, p: Point) -> bool;
}

/// Game rules consumed by the [`PathFinder`](crate::PathFinder).
///
/// Every method must be free of side effects, except `on_node_added`, which
/// stamps the node's auxiliary moves/turns values.
pub trait MoveRules<G>: PlotGrid {
    /// Whether `dest` is a legal destination at all.
    fn dest_valid(&self, dest: Point, settings: &PathSettings<G>) -> bool;

    /// Unweighted distance estimate between two cells. The finder multiplies
    /// it by the settings' heuristic weight.
    fn estimate(&self, from: Point, to: Point) -> i32;

    /// Cost of stepping from `parent` to the adjacent `child`. Must be > 0.
    fn cost(&self, parent: &SearchNode, child: &SearchNode, settings: &PathSettings<G>) -> i32;

    /// Whether the step `parent` → `child` may be taken at all.
    fn can_join(&self, parent: &SearchNode, child: &SearchNode, group: &G, flags: MoveFlags) -> bool;

    /// Whether the search may continue from `node`. Nodes failing this are
    /// kept as reachable end points but never expanded.
    fn can_be_frontier(&self, node: &SearchNode, group: &G, flags: MoveFlags) -> bool;

    /// Stamp `node`'s moves and turns for arriving from `parent`.
    fn on_node_added(
        &self,
        parent: Option<&SearchNode>,
        node: &mut SearchNode,
        reason: AddReason,
        settings: &PathSettings<G>,
    );
}
