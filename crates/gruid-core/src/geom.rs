//! Geometry primitives: [`Point`], [`Range`] and [`Dir`].
//!
//! `Point` is the canonical identity of a map cell (plot). `Dir` enumerates
//! the eight grid directions a mover may step in, in the fixed order the
//! pathfinder expands them.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A map cell. X grows to the east, Y grows to the south.
///
/// Points order row by row, which gives maps a stable visiting order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point one step away in direction `dir`.
    ///
    /// No bounds check: grids decide whether the result is a real cell.
    #[inline]
    pub const fn step(self, dir: Dir) -> Self {
        let d = dir.delta();
        Self::new(self.x + d.x, self.y + d.y)
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Dir
// ---------------------------------------------------------------------------

/// One of the eight grid directions, clockwise from north.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dir {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Dir {
    /// Number of directions.
    pub const COUNT: usize = 8;

    /// Every direction, clockwise from north.
    pub const ALL: [Dir; Dir::COUNT] = [
        Dir::N,
        Dir::NE,
        Dir::E,
        Dir::SE,
        Dir::S,
        Dir::SW,
        Dir::W,
        Dir::NW,
    ];

    /// The unit offset of one step in this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Dir::N => Point::new(0, -1),
            Dir::NE => Point::new(1, -1),
            Dir::E => Point::new(1, 0),
            Dir::SE => Point::new(1, 1),
            Dir::S => Point::new(0, 1),
            Dir::SW => Point::new(-1, 1),
            Dir::W => Point::new(-1, 0),
            Dir::NW => Point::new(-1, -1),
        }
    }

    /// The direction pointing the other way.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Dir::N => Dir::S,
            Dir::NE => Dir::SW,
            Dir::E => Dir::W,
            Dir::SE => Dir::NW,
            Dir::S => Dir::N,
            Dir::SW => Dir::NE,
            Dir::W => Dir::E,
            Dir::NW => Dir::SE,
        }
    }

    /// Whether this is one of the four cardinal directions.
    #[inline]
    pub const fn is_cardinal(self) -> bool {
        matches!(self, Dir::N | Dir::E | Dir::S | Dir::W)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// The cells `min.x..max.x` by `min.y..max.y`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// The cells between corners `(x0, y0)` and `(x1, y1)`, the far corner
    /// excluded. Corners may be given in any order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn len(self) -> usize {
        (self.width().max(0) * self.height().max(0)) as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Row-major flat index of `p`, or `None` outside the range.
    #[inline]
    pub fn index_of(self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| ((p.y - self.min.y) * self.width() + (p.x - self.min.x)) as usize)
    }

    /// Every cell, row by row.
    pub fn iter(self) -> RangeIter {
        RangeIter { range: self, next: 0 }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Row-major iterator over the cells of a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next >= self.range.len() {
            return None;
        }
        let w = self.range.width() as usize;
        let p = self.range.min + Point::new((self.next % w) as i32, (self.next / w) as i32);
        self.next += 1;
        Some(p)
    }
}
