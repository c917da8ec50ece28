//! Incremental turn-aware pathfinding for strategy games.
//!
//! [`PathFinder`] runs an A\*-style best-first search from a group's cell
//! and keeps the resulting search tree between queries. Asking for a path
//! to another destination from the same origin reuses everything explored
//! so far. When a cheaper route to an already explored cell turns up, the
//! cell is re-parented and the cost change is pushed down its subtree, so
//! the tree stays consistent even with an inadmissible heuristic.
//!
//! The game supplies the rules through two traits:
//!
//! | Trait | Role |
//! |---|---|
//! | [`Group`] | The moving agent: identity, domain, movement allowance |
//! | [`MoveRules`] : [`PlotGrid`] | Adjacency, step costs, legality, and the per-node moves/turns bookkeeping |
//!
//! Costs are integers in movement points, with [`MOVE_DENOMINATOR`] points
//! to a full move. A search can be bounded to a number of turns through
//! [`PathSettings`].

mod distance;
mod expand;
mod finder;
mod node;
mod open;
mod path;
mod propagate;
mod settings;
mod traits;
mod validate;

#[cfg(test)]
mod properties;

pub use distance::{chebyshev, manhattan, plot_distance};
pub use finder::PathFinder;
pub use node::{NodeId, SearchNode, UNREACHABLE};
pub use path::PathStep;
pub use settings::{Domain, MOVE_DENOMINATOR, MoveFlags, PathSettings};
pub use traits::{AddReason, Group, MoveRules, PlotGrid};
pub use validate::TreeError;
