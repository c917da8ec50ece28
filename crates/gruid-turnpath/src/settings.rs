//! Per-query search configuration: [`PathSettings`], [`MoveFlags`] and
//! [`Domain`].

use std::ops::{BitAnd, BitOr};

use crate::traits::Group;

/// Movement points that make up one full move.
///
/// Movement costs are expressed in fractions of a move; a unit with two
/// moves per turn has `2 * MOVE_DENOMINATOR` movement points.
pub const MOVE_DENOMINATOR: i32 = 60;

/// Upper bound on the auto-derived heuristic weight for land groups.
const ROAD_WEIGHT_CAP: i32 = 20;

/// Auto-derived land weight per base move.
const ROAD_WEIGHT_PER_MOVE: i32 = 6;

// ---------------------------------------------------------------------------
// Domain
// ---------------------------------------------------------------------------

/// The movement domain of a group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Domain {
    #[default]
    Land,
    Sea,
    Air,
}

// ---------------------------------------------------------------------------
// MoveFlags
// ---------------------------------------------------------------------------

/// Bitmask of behaviour flags passed through to the movement rules.
///
/// The search itself only interprets [`MoveFlags::MAX_MOVES`]; every other
/// bit is meaningful to the [`MoveRules`](crate::MoveRules) implementation
/// alone. Changing any bit invalidates a cached search tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveFlags(pub u32);

impl MoveFlags {
    pub const NONE: Self = Self(0);
    /// Plan as if the group starts with its full movement allowance.
    pub const MAX_MOVES: Self = Self(1 << 0);

    // Reserved for `MoveRules` implementations. The search never reads
    // these bits; it only compares whole masks to invalidate its tree.

    /// Step through cells the rules would avoid as dangerous.
    pub const IGNORE_DANGER: Self = Self(1 << 1);
    /// Allow entering territory whose owner would be at war after the move.
    pub const DECLARE_WAR: Self = Self(1 << 2);
    /// Keep out of territory held by enemies.
    pub const NO_ENEMY_TERRITORY: Self = Self(1 << 3);
    /// Allow passing through cells occupied by enemy groups.
    pub const THROUGH_ENEMY: Self = Self(1 << 4);
    /// Treat an enemy on the destination as a target, not an obstacle.
    pub const ATTACK: Self = Self(1 << 5);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether the mask is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MoveFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for MoveFlags {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// PathSettings
// ---------------------------------------------------------------------------

/// Parameters of a path query: who moves, with which flags, how far the
/// search may look ahead, and how strongly the heuristic is weighted.
///
/// The group handle is the only mutable part: callers may update the group
/// through [`PathSettings::group_mut`] (it moves, spends moves, ...). The
/// flags, turn budget and weight are fixed once constructed; build a new
/// `PathSettings` and hand it to
/// [`PathFinder::set_settings`](crate::PathFinder::set_settings) to change
/// them.
#[derive(Clone, Debug)]
pub struct PathSettings<G> {
    group: Option<G>,
    flags: MoveFlags,
    max_path: i32,
    heuristic_weight: i32,
}

impl<G> Default for PathSettings<G> {
    fn default() -> Self {
        Self {
            group: None,
            flags: MoveFlags::NONE,
            max_path: -1,
            heuristic_weight: 1,
        }
    }
}

impl<G: Group> PathSettings<G> {
    /// Create settings for `group`.
    ///
    /// A negative `max_path` means the search is not limited in turns. A
    /// negative `heuristic_weight` derives the weight from the group: `1`
    /// without a group, [`MOVE_DENOMINATOR`] for sea groups, and
    /// `min(20, 6 * base_moves)` otherwise, which tracks the cost of moving
    /// along roads.
    pub fn new(group: Option<G>, flags: MoveFlags, max_path: i32, heuristic_weight: i32) -> Self {
        let heuristic_weight = if heuristic_weight >= 0 {
            heuristic_weight
        } else {
            match &group {
                None => 1,
                Some(g) if g.domain() == Domain::Sea => MOVE_DENOMINATOR,
                Some(g) => ROAD_WEIGHT_CAP.min(g.base_moves() * ROAD_WEIGHT_PER_MOVE),
            }
        };
        Self {
            group,
            flags,
            max_path,
            heuristic_weight,
        }
    }
}

impl<G> PathSettings<G> {
    /// The group being moved, if any.
    #[inline]
    pub fn group(&self) -> Option<&G> {
        self.group.as_ref()
    }

    /// Mutable access to the group handle.
    #[inline]
    pub fn group_mut(&mut self) -> Option<&mut G> {
        self.group.as_mut()
    }

    #[inline]
    pub fn flags(&self) -> MoveFlags {
        self.flags
    }

    /// Maximum number of turns a path may take; negative when unbounded.
    #[inline]
    pub fn max_path(&self) -> i32 {
        self.max_path
    }

    #[inline]
    pub fn heuristic_weight(&self) -> i32 {
        self.heuristic_weight
    }

    /// Whether a node `turns` turns away is inside the turn budget.
    #[inline]
    pub fn within_budget(&self, turns: i32) -> bool {
        self.max_path < 0 || turns <= self.max_path
    }
}
