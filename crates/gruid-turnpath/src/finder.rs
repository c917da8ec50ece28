//! The [`PathFinder`] and its query entry points.

use gruid_core::Point;

use crate::node::{NodeId, NodeStore, SearchNode};
use crate::open::OpenSet;
use crate::settings::{MoveFlags, PathSettings};
use crate::traits::{AddReason, Group, MoveRules};

/// Incremental shortest-path search from one origin to changing
/// destinations.
///
/// The finder keeps its search tree between queries. As long as the origin,
/// the group and the flags stay the same, a query to a new destination
/// reuses every node explored so far and only re-estimates the frontier.
/// Moving the origin, changing the group's mobility, or changing the group
/// or flags discards the tree.
///
/// The movement rules are passed to each query. If the map or the rules
/// change between queries in a way that alters costs or legality, call
/// [`PathFinder::reset`] first.
#[derive(Debug)]
pub struct PathFinder<G> {
    pub(crate) settings: PathSettings<G>,
    pub(crate) store: NodeStore,
    pub(crate) open: OpenSet,
    pub(crate) start: Option<Point>,
    pub(crate) dest: Option<Point>,
    pub(crate) end_node: Option<NodeId>,
    // Base moves of the group when the current tree was seeded.
    seeded_base_moves: i32,
}

impl<G> Default for PathFinder<G> {
    fn default() -> Self {
        Self {
            settings: PathSettings::default(),
            store: NodeStore::new(),
            open: OpenSet::default(),
            start: None,
            dest: None,
            end_node: None,
            seeded_base_moves: 0,
        }
    }
}

impl<G: Group> PathFinder<G> {
    /// Create a finder with the given settings and an empty tree.
    pub fn new(settings: PathSettings<G>) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Search for a path from `from` to `to`.
    ///
    /// Returns `true` if the destination was reached within the settings'
    /// turn budget. Returns `false` without searching if no group is set or
    /// the rules reject the destination.
    pub fn generate_path<R: MoveRules<G>>(&mut self, rules: &R, from: Point, to: Point) -> bool {
        self.end_node = None;

        let Some(group) = self.settings.group() else {
            return false;
        };
        let mobility = if self.settings.flags().contains(MoveFlags::MAX_MOVES) {
            group.max_moves()
        } else {
            group.moves_left()
        };
        let base_moves = group.base_moves();

        if !rules.dest_valid(to, &self.settings) {
            return false;
        }
        debug_assert!(rules.contains(from), "origin {from} is off the map");
        debug_assert!(rules.contains(to), "destination {to} is off the map");

        if self.start != Some(from) {
            if !self.store.is_empty() {
                log::debug!("origin moved to {from}, discarding {} nodes", self.store.len());
            }
            self.reset();
        }
        let mut recalc_heuristics = self.dest != Some(to);
        self.start = Some(from);
        self.dest = Some(to);

        if let Some(origin) = self.store.find(from) {
            let seeded = &self.store[origin];
            if seeded.moves() != mobility || self.seeded_base_moves != base_moves {
                log::debug!(
                    "mobility at {from} changed ({} -> {mobility} moves), discarding {} nodes",
                    seeded.moves(),
                    self.store.len()
                );
                self.reset();
            }
        }

        if self.store.is_empty() {
            self.add_start_node(rules, from);
            self.seeded_base_moves = base_moves;
            recalc_heuristics = true;
        }

        // The destination may already be known from searches to other cells.
        self.end_node = self.store.find(to);

        if recalc_heuristics {
            self.recalculate_heuristics(rules, to);
        }

        while self.process_node(rules, to) {}

        debug_assert!(
            self.validate_tree().is_ok(),
            "search tree inconsistent: {:?}",
            self.validate_tree()
        );

        let found = self
            .end_node
            .is_some_and(|id| self.settings.within_budget(self.store[id].turns()));
        log::debug!(
            "path {from} -> {to}: {} ({} nodes, {} open)",
            if found { "found" } else { "not found" },
            self.store.len(),
            self.open.len()
        );
        found
    }

    /// Search for a path from the group's current position to `to`.
    pub fn generate_path_to<R: MoveRules<G>>(&mut self, rules: &R, to: Point) -> bool {
        let Some(from) = self.settings.group().map(Group::position) else {
            self.end_node = None;
            return false;
        };
        self.generate_path(rules, from, to)
    }

    /// Replace the settings.
    ///
    /// The tree is kept when only the turn budget or the heuristic weight
    /// change; a different group or different flags discard it.
    pub fn set_settings(&mut self, settings: PathSettings<G>) {
        let same_group = self.settings.group().map(Group::id) == settings.group().map(Group::id);
        if !same_group || self.settings.flags() != settings.flags() {
            if !self.store.is_empty() {
                log::debug!("group or flags changed, discarding {} nodes", self.store.len());
            }
            self.reset();
        }
        self.settings = settings;
    }
}

impl<G> PathFinder<G> {
    /// Discard the search tree.
    ///
    /// Origin, destination and settings are left alone; the next query
    /// overwrites them.
    pub fn reset(&mut self) {
        self.store.clear();
        self.open.clear();
        self.end_node = None;
    }

    #[inline]
    pub fn settings(&self) -> &PathSettings<G> {
        &self.settings
    }

    /// Mutable access to the group handle held by the settings.
    ///
    /// Changing the group does not discard the tree by itself: the next
    /// query notices a new position or a different movement allowance.
    #[inline]
    pub fn group_mut(&mut self) -> Option<&mut G> {
        self.settings.group_mut()
    }

    /// Number of nodes in the search tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    /// Number of nodes still on the frontier.
    #[inline]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// The node for cell `pos`, if the search has visited it.
    pub fn node_at(&self, pos: Point) -> Option<&SearchNode> {
        self.store.find(pos).map(|id| &self.store[id])
    }

    pub fn node(&self, id: NodeId) -> Option<&SearchNode> {
        self.store.get(id)
    }

    /// Every node of the search tree, in visiting order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> + '_ {
        self.store.iter()
    }

    /// Frontier nodes, in the order they were opened.
    pub fn open_nodes(&self) -> impl Iterator<Item = &SearchNode> + '_ {
        self.open.iter().map(move |id| &self.store[id])
    }

    fn add_start_node<R: MoveRules<G>>(&mut self, rules: &R, from: Point) {
        let mut start = SearchNode::new(from);
        rules.on_node_added(None, &mut start, AddReason::Initial, &self.settings);
        // Heuristics are filled in by the recalculation that always follows.
        start.set_known_cost(0);
        let id = self.store.insert(start);
        self.open.push(id);
    }

    /// Re-estimate every frontier node against `dest`.
    ///
    /// Expanded nodes keep stale totals: they are never ranked again.
    fn recalculate_heuristics<R: MoveRules<G>>(&mut self, rules: &R, dest: Point) {
        let weight = self.settings.heuristic_weight();
        for id in self.open.iter() {
            let node = self.store.node_mut(id);
            node.set_heuristic_cost(weight * rules.estimate(node.pos(), dest));
        }
    }
}
