//! Randomised checks of the finder against a brute-force search.

use gruid_core::Point;
use proptest::prelude::*;

use crate::PathFinder;
use crate::distance::chebyshev;
use crate::settings::{MOVE_DENOMINATOR, MoveFlags, PathSettings};
use crate::testing::{TerrainMap, TestUnit, reference_costs};

const TILES: [char; 8] = ['.', '.', '.', '.', '~', '^', '#', 'C'];

/// Build a `w` x `h` map from tile indices, forcing `open` cells to plains.
fn build_map(w: i32, h: i32, tiles: &[usize], open: &[Point], cardinal: bool) -> TerrainMap {
    let mut text = String::new();
    for y in 0..h {
        if y > 0 {
            text.push('\n');
        }
        for x in 0..w {
            let c = if open.contains(&Point::new(x, y)) {
                '.'
            } else {
                TILES[tiles[(y * w + x) as usize] % TILES.len()]
            };
            text.push(c);
        }
    }
    let map = TerrainMap::new(&text);
    if cardinal { map.cardinal_only() } else { map }
}

fn finder(weight: i32, max_path: i32) -> PathFinder<TestUnit> {
    PathFinder::new(PathSettings::new(
        Some(TestUnit::new(1, 2)),
        MoveFlags::NONE,
        max_path,
        weight,
    ))
}

/// Every step of the found path is legal and the known costs add up.
fn check_path(pf: &PathFinder<TestUnit>, map: &TerrainMap) -> Result<(), TestCaseError> {
    let path = pf.path().unwrap_or_default();
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        prop_assert_eq!(chebyshev(a.pos, b.pos), 1);
        prop_assert_eq!(Some(b.cost - a.cost), map.enter_cost(b.pos));
    }
    Ok(())
}

proptest! {
    #[test]
    fn matches_reference_search(
        w in 2i32..8, h in 2i32..8,
        tiles in prop::collection::vec(0usize..8, 64),
        sx in 0i32..8, sy in 0i32..8,
        dx in 0i32..8, dy in 0i32..8,
        cardinal in any::<bool>(),
    ) {
        let from = Point::new(sx % w, sy % h);
        let to = Point::new(dx % w, dy % h);
        let map = build_map(w, h, &tiles, &[from, to], cardinal);
        let best = reference_costs(&map, from);

        let mut pf = finder(MOVE_DENOMINATOR, -1);
        let found = pf.generate_path(&map, from, to);
        prop_assert_eq!(found, best.contains_key(&to));
        prop_assert_eq!(pf.path_cost(), best.get(&to).copied());
        prop_assert!(pf.validate_tree().is_ok());
        check_path(&pf, &map)?;
    }

    #[test]
    fn second_destination_matches_fresh_search(
        w in 2i32..8, h in 2i32..8,
        tiles in prop::collection::vec(0usize..8, 64),
        sx in 0i32..8, sy in 0i32..8,
        ax in 0i32..8, ay in 0i32..8,
        bx in 0i32..8, by in 0i32..8,
    ) {
        let from = Point::new(sx % w, sy % h);
        let first = Point::new(ax % w, ay % h);
        let second = Point::new(bx % w, by % h);
        let map = build_map(w, h, &tiles, &[from, first, second], false);
        let best = reference_costs(&map, from);

        let mut pf = finder(MOVE_DENOMINATOR, -1);
        pf.generate_path(&map, from, first);
        let before: Vec<(Point, i32)> = pf.nodes().map(|(_, n)| (n.pos(), n.known_cost())).collect();
        let found = pf.generate_path(&map, from, second);
        for (pos, cost) in before {
            prop_assert!(pf.node_at(pos).is_some_and(|n| n.known_cost() <= cost));
        }
        prop_assert_eq!(found, best.contains_key(&second));
        prop_assert_eq!(pf.path_cost(), best.get(&second).copied());
        prop_assert!(pf.validate_tree().is_ok());
        check_path(&pf, &map)?;
    }

    #[test]
    fn repeated_query_is_stable(
        w in 2i32..8, h in 2i32..8,
        tiles in prop::collection::vec(0usize..8, 64),
        sx in 0i32..8, sy in 0i32..8,
        dx in 0i32..8, dy in 0i32..8,
    ) {
        let from = Point::new(sx % w, sy % h);
        let to = Point::new(dx % w, dy % h);
        let map = build_map(w, h, &tiles, &[from, to], false);

        let mut pf = finder(-1, -1);
        let first = pf.generate_path(&map, from, to);
        let snapshot: Vec<_> = pf.nodes().map(|(id, n)| (id, n.pos(), n.known_cost(), n.turns())).collect();
        let path = pf.path();
        let second = pf.generate_path(&map, from, to);
        let again: Vec<_> = pf.nodes().map(|(id, n)| (id, n.pos(), n.known_cost(), n.turns())).collect();
        prop_assert_eq!(first, second);
        prop_assert_eq!(snapshot, again);
        prop_assert_eq!(path, pf.path());
    }

    #[test]
    fn overestimating_heuristic_keeps_tree_consistent(
        w in 2i32..8, h in 2i32..8,
        tiles in prop::collection::vec(0usize..8, 64),
        sx in 0i32..8, sy in 0i32..8,
        ax in 0i32..8, ay in 0i32..8,
        bx in 0i32..8, by in 0i32..8,
        weight in 1i32..6,
    ) {
        let from = Point::new(sx % w, sy % h);
        let first = Point::new(ax % w, ay % h);
        let second = Point::new(bx % w, by % h);
        let map = build_map(w, h, &tiles, &[from, first, second], false);
        let best = reference_costs(&map, from);

        // Up to five times the cheapest step per cell: far from admissible.
        let mut pf = finder(weight * MOVE_DENOMINATOR, -1);
        for to in [first, second] {
            let found = pf.generate_path(&map, from, to);
            prop_assert_eq!(found, best.contains_key(&to));
            prop_assert!(pf.validate_tree().is_ok());
            check_path(&pf, &map)?;
            if let (Some(cost), Some(&optimum)) = (pf.path_cost(), best.get(&to)) {
                prop_assert!(cost >= optimum);
            }
        }
        for (_, n) in pf.nodes() {
            prop_assert!(best.get(&n.pos()).is_some_and(|&b| n.known_cost() >= b));
        }
    }

    #[test]
    fn budget_bounds_found_paths(
        w in 2i32..8, h in 2i32..8,
        tiles in prop::collection::vec(0usize..8, 64),
        sx in 0i32..8, sy in 0i32..8,
        dx in 0i32..8, dy in 0i32..8,
        max_path in 1i32..4,
    ) {
        let from = Point::new(sx % w, sy % h);
        let to = Point::new(dx % w, dy % h);
        let map = build_map(w, h, &tiles, &[from, to], false);

        let mut pf = finder(MOVE_DENOMINATOR, max_path);
        if pf.generate_path(&map, from, to) {
            let path = pf.path().unwrap_or_default();
            prop_assert!(path.iter().all(|s| s.turns <= max_path));
        } else {
            prop_assert!(pf.path_turns().is_none_or(|t| t > max_path));
        }
    }
}
