use gruid_core::Point;

/// Chebyshev (L∞) distance between two points: the number of steps between
/// them when diagonal steps are allowed.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Manhattan (L1) distance between two points: the number of steps between
/// them on a cardinal-only grid.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Step distance that slightly penalises diagonal runs.
///
/// Counts a full step for the long axis plus half a step for every
/// diagonal, which breaks ties towards straight paths when used as a
/// heuristic.
#[inline]
pub fn plot_distance(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    dx.max(dy) + dx.min(dy) / 2
}
