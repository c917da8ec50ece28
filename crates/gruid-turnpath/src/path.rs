//! Reading the result of the last query.

use gruid_core::Point;

use crate::PathFinder;
use crate::node::NodeId;

/// One cell along a found path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    pub pos: Point,
    /// Known cost from the origin.
    pub cost: i32,
    /// Moves left on arrival.
    pub moves: i32,
    /// Turns elapsed on arrival.
    pub turns: i32,
}

impl<G> PathFinder<G> {
    /// Whether the last query resolved its destination to a node.
    ///
    /// This can be `true` while the query itself failed because the
    /// destination lies beyond the turn budget.
    #[inline]
    pub fn is_path_complete(&self) -> bool {
        self.end_node.is_some()
    }

    /// Known cost of the destination.
    pub fn path_cost(&self) -> Option<i32> {
        self.end_node.map(|id| self.store[id].known_cost())
    }

    /// Turns needed to reach the destination.
    pub fn path_turns(&self) -> Option<i32> {
        self.end_node.map(|id| self.store[id].turns())
    }

    /// Moves left on arrival at the destination.
    pub fn final_moves(&self) -> Option<i32> {
        self.end_node.map(|id| self.store[id].moves())
    }

    /// The path from the origin to the destination, both included.
    pub fn path(&self) -> Option<Vec<PathStep>> {
        let end = self.end_node?;
        let mut steps: Vec<PathStep> = self
            .ancestry(end)
            .map(|id| {
                let n = &self.store[id];
                PathStep {
                    pos: n.pos(),
                    cost: n.known_cost(),
                    moves: n.moves(),
                    turns: n.turns(),
                }
            })
            .collect();
        steps.reverse();
        Some(steps)
    }

    /// The first cell to step into. The origin itself if the destination
    /// is the origin.
    pub fn first_step(&self) -> Option<Point> {
        let end = self.end_node?;
        let mut first = end;
        for id in self.ancestry(end) {
            if self.store[id].parent().is_none() {
                break;
            }
            first = id;
        }
        Some(self.store[first].pos())
    }

    /// Where the group will stand when its current turn ends: the last cell
    /// of the path still reached within the origin's turn.
    pub fn end_turn_cell(&self) -> Option<Point> {
        let end = self.end_node?;
        let mut origin_turns = None;
        let mut stop = end;
        for id in self.ancestry(end) {
            let n = &self.store[id];
            if n.parent().is_none() {
                origin_turns = Some(n.turns());
            }
        }
        let origin_turns = origin_turns?;
        for id in self.ancestry(end) {
            stop = id;
            if self.store[id].turns() == origin_turns {
                break;
            }
        }
        Some(self.store[stop].pos())
    }

    /// `id` and its ancestors up to the root of the tree.
    fn ancestry(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&id| self.store[id].parent())
    }
}
