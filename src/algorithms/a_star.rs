use crate::algorithms::common::{PathfindingAlgorithm, SearchOptions};
use crate::grid::{Grid, Position};
use crate::statistics::SearchStats;
use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Index of a node in the per-search arena.
type NodeId = usize;

#[derive(Debug, Clone)]
struct Node {
    position: Position,
    /// Node this one was reached from; `None` only for the start node.
    parent: Option<NodeId>,
    g: i32,
    h: i32,
    f: i32,
    /// Order in which the position first entered the frontier.
    seq: u64,
}

/// Heap entry. The frontier pops the lowest `f`, ties going to the position
/// that entered the frontier first.
#[derive(Clone, Copy, PartialEq, Eq)]
struct FrontierKey {
    f: i32,
    seq: u64,
    id: NodeId,
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed comparison to make BinaryHeap a min-heap
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Open/closed bookkeeping for one search. Created per call, dropped after.
///
/// Nodes live in an arena and refer to their parent by index. A frontier node
/// is updated in place when a cheaper route to its position turns up; that is
/// safe because only expanded (closed) nodes are ever parents.
struct SearchState {
    goal: Position,
    nodes: Vec<Node>,
    open: FxHashMap<Position, NodeId>,
    closed: FxHashSet<Position>,
    heap: BinaryHeap<FrontierKey>,
    next_seq: u64,
    stats: SearchStats,
}

impl SearchState {
    fn new(goal: Position) -> Self {
        SearchState {
            goal,
            nodes: Vec::new(),
            open: FxHashMap::default(),
            closed: FxHashSet::default(),
            heap: BinaryHeap::new(),
            next_seq: 0,
            stats: SearchStats::default(),
        }
    }

    /// Offers `position` to the frontier via `parent`. A position already in
    /// the frontier is only replaced by a strictly lower `f`.
    fn open_node(&mut self, position: Position, parent: Option<NodeId>) {
        let g = parent.map_or(0, |p| self.nodes[p].g + 1);
        let h = position.manhattan(&self.goal);
        let f = g + h;

        if let Some(&id) = self.open.get(&position) {
            let existing = &mut self.nodes[id];
            if f < existing.f {
                existing.parent = parent;
                existing.g = g;
                existing.h = h;
                existing.f = f;
                let seq = existing.seq;
                self.heap.push(FrontierKey { f, seq, id });
                self.stats.nodes_replaced += 1;
            }
            return;
        }

        let id = self.nodes.len();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.nodes.push(Node {
            position,
            parent,
            g,
            h,
            f,
            seq,
        });
        self.open.insert(position, id);
        self.heap.push(FrontierKey { f, seq, id });
        self.stats.nodes_opened += 1;
        self.stats.frontier_high_water = self.stats.frontier_high_water.max(self.open.len());
    }

    /// Removes and returns the best frontier node, skipping heap entries that
    /// were superseded or whose position has since been closed.
    fn pop_best(&mut self) -> Option<NodeId> {
        while let Some(key) = self.heap.pop() {
            let node = &self.nodes[key.id];
            if node.f == key.f && self.open.get(&node.position) == Some(&key.id) {
                return Some(key.id);
            }
            self.stats.stale_skipped += 1;
        }
        None
    }

    /// Moves `id` from the frontier to the closed set and offers its
    /// reachable, unclosed neighbours to the frontier.
    fn expand(&mut self, id: NodeId, grid: &Grid, options: &SearchOptions) {
        let Node { position, g, h, f, .. } = self.nodes[id];
        trace!("[AStar] expand ({},{}) g={} h={} f={}", position.x, position.y, g, h, f);
        self.open.remove(&position);
        self.closed.insert(position);
        self.stats.nodes_expanded += 1;

        for neighbor in grid.neighbors(&position, options.allow_diagonal) {
            if grid.is_reachable(&neighbor, options.reachable_value) && !self.closed.contains(&neighbor) {
                self.open_node(neighbor, Some(id));
            }
        }
    }

    /// Follows parent links back to the start and returns start-to-goal order.
    fn reconstruct(&self, mut id: NodeId) -> Vec<Position> {
        let mut path = vec![self.nodes[id].position];
        while let Some(parent) = self.nodes[id].parent {
            path.push(self.nodes[parent].position);
            id = parent;
        }
        path.reverse();
        path
    }
}

/// Result of [`AStar::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Start-to-goal path with both ends included, or `None` if the goal
    /// cannot be reached.
    pub path: Option<Vec<Position>>,
    pub stats: SearchStats,
}

/// A* over a binary reachable/blocked grid with unit step cost and a
/// Manhattan heuristic.
///
/// The engine holds no state between calls; each search builds and drops its
/// own frontier and closed set, so a shared `AStar` is safe across threads.
///
/// Diagonal steps cost 1, the same as orthogonal ones. With diagonals enabled
/// the Manhattan heuristic can overestimate, so paths are not guaranteed to be
/// shortest in that mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStar;

impl AStar {
    pub fn new() -> Self {
        AStar
    }

    /// Runs one search and reports the path together with search counters.
    ///
    /// The start is seeded without checking its cell, so a blocked start still
    /// yields paths. Every later cell, the goal included, must be reachable.
    /// A start or goal outside the grid gives `None`.
    pub fn search(
        &self,
        grid: &Grid,
        start: Position,
        goal: Position,
        options: &SearchOptions,
    ) -> SearchOutcome {
        trace!(
            "[AStar] search: start=({},{}) goal=({},{}) diagonal={}",
            start.x,
            start.y,
            goal.x,
            goal.y,
            options.allow_diagonal
        );

        let mut state = SearchState::new(goal);

        if !grid.in_bounds(&start) || !grid.in_bounds(&goal) {
            debug!("[AStar] no path: start or goal outside the grid");
            return SearchOutcome {
                path: None,
                stats: state.stats,
            };
        }

        state.open_node(start, None);

        while let Some(id) = state.pop_best() {
            if state.nodes[id].position == goal {
                let path = state.reconstruct(id);
                debug!(
                    "[AStar] path found: {} steps, {} nodes expanded",
                    path.len() - 1,
                    state.stats.nodes_expanded
                );
                return SearchOutcome {
                    path: Some(path),
                    stats: state.stats,
                };
            }
            state.expand(id, grid, options);
        }

        debug!(
            "[AStar] no path: frontier exhausted after {} expansions",
            state.stats.nodes_expanded
        );
        SearchOutcome {
            path: None,
            stats: state.stats,
        }
    }
}

impl PathfindingAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "a_star"
    }

    fn find_path(
        &self,
        grid: &Grid,
        start: Position,
        goal: Position,
        options: &SearchOptions,
    ) -> Option<Vec<Position>> {
        self.search(grid, start, goal, options).path
    }
}

/// Finds a path from (`start_x`, `start_y`) to (`end_x`, `end_y`).
///
/// Cells equal to `reachable_value` are walkable; everything else is blocked.
/// Returns the positions from start to goal inclusive, or `None` when the goal
/// cannot be reached.
pub fn find_path(
    grid: &Grid,
    start_x: i32,
    start_y: i32,
    end_x: i32,
    end_y: i32,
    reachable_value: i32,
    allow_diagonal: bool,
) -> Option<Vec<Position>> {
    let options = SearchOptions {
        reachable_value,
        allow_diagonal,
    };
    AStar.find_path(
        grid,
        Position::new(start_x, start_y),
        Position::new(end_x, end_y),
        &options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(i32, i32)]) -> Vec<Position> {
        coords.iter().copied().map(Position::from).collect()
    }

    #[test]
    fn open_grid_follows_first_inserted_tie_break() {
        let grid = Grid::new(3, 3, 0);
        let outcome = AStar.search(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            &SearchOptions::default(),
        );
        assert_eq!(
            outcome.path,
            Some(pts(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]))
        );
        assert_eq!(outcome.stats.nodes_expanded, 8);
        assert_eq!(outcome.stats.nodes_replaced, 0);
    }

    #[test]
    fn routes_around_blocked_centre() {
        let mut grid = Grid::new(3, 3, 0);
        grid.set(&Position::new(1, 1), -1);
        let path = find_path(&grid, 0, 0, 2, 2, 0, false).unwrap();
        assert_eq!(path.len(), 5);
        assert!(!path.contains(&Position::new(1, 1)));
        assert_eq!(path.first(), Some(&Position::new(0, 0)));
        assert_eq!(path.last(), Some(&Position::new(2, 2)));
    }

    #[test]
    fn start_equals_goal() {
        let grid = Grid::new(1, 1, 0);
        assert_eq!(find_path(&grid, 0, 0, 0, 0, 0, false), Some(pts(&[(0, 0)])));

        // The start cell's own classification is never consulted.
        let blocked = Grid::new(2, 2, 5);
        assert_eq!(find_path(&blocked, 1, 1, 1, 1, 0, true), Some(pts(&[(1, 1)])));
    }

    #[test]
    fn blocked_start_is_still_seeded() {
        let grid = Grid::parse("#..", 0, -1).unwrap();
        assert_eq!(
            find_path(&grid, 0, 0, 2, 0, 0, false),
            Some(pts(&[(0, 0), (1, 0), (2, 0)]))
        );
    }

    #[test]
    fn blocked_goal_is_never_admitted() {
        let grid = Grid::parse("..#", 0, -1).unwrap();
        assert_eq!(find_path(&grid, 0, 0, 2, 0, 0, false), None);
    }

    #[test]
    fn enclosed_goal_has_no_path() {
        let grid = Grid::parse(
            "
            .....
            .###.
            .#.#.
            .###.
            .....
            ",
            0,
            1,
        )
        .unwrap();
        let outcome = AStar.search(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            &SearchOptions::default().with_diagonal(true),
        );
        assert_eq!(outcome.path, None);
        // Every open cell outside the ring is expanded exactly once.
        assert_eq!(outcome.stats.nodes_expanded, 16);
    }

    #[test]
    fn out_of_bounds_endpoints_give_no_path() {
        let grid = Grid::new(4, 4, 0);
        assert_eq!(find_path(&grid, -1, 0, 3, 3, 0, false), None);
        assert_eq!(find_path(&grid, 0, 0, 4, 0, 0, false), None);
        assert_eq!(find_path(&grid, 9, 9, 9, 9, 0, false), None);
    }

    #[test]
    fn diagonal_moves_cost_one() {
        let grid = Grid::new(4, 4, 0);
        assert_eq!(
            find_path(&grid, 0, 0, 3, 3, 0, true),
            Some(pts(&[(0, 0), (1, 1), (2, 2), (3, 3)]))
        );
    }

    #[test]
    fn diagonal_mode_squeezes_between_corners() {
        let grid = Grid::parse(
            "
            .#
            #.
            ",
            0,
            1,
        )
        .unwrap();
        assert_eq!(find_path(&grid, 0, 0, 1, 1, 0, false), None);
        assert_eq!(
            find_path(&grid, 0, 0, 1, 1, 0, true),
            Some(pts(&[(0, 0), (1, 1)]))
        );
    }

    #[test]
    fn custom_reachable_value() {
        let grid = Grid::from_columns(vec![vec![3, 3], vec![0, 3]]).unwrap();
        // Walkable cells hold 3; (1,0) holds 0 and is blocked.
        assert_eq!(
            find_path(&grid, 0, 0, 1, 1, 3, false),
            Some(pts(&[(0, 0), (0, 1), (1, 1)]))
        );
        assert_eq!(find_path(&grid, 0, 0, 1, 1, 0, false), None);
    }

    #[test]
    fn detours_around_a_wall() {
        let grid = Grid::parse(
            "
            ......
            .####.
            ......
            ",
            0,
            1,
        )
        .unwrap();
        let path = find_path(&grid, 0, 1, 5, 1, 0, false).unwrap();
        assert_eq!(path.len(), 8);
        assert_eq!(path.first(), Some(&Position::new(0, 1)));
        assert_eq!(path.last(), Some(&Position::new(5, 1)));
        assert!(path.windows(2).all(|w| w[0].manhattan(&w[1]) == 1));
    }

    #[test]
    fn cheaper_route_replaces_frontier_entry() {
        let mut state = SearchState::new(Position::new(5, 0));
        state.open_node(Position::new(0, 0), None);
        state.open_node(Position::new(3, 0), Some(0));
        let target = Position::new(4, 0);

        // First offer via the g=1 node, then a cheaper one via the start.
        state.open_node(target, Some(1));
        state.open_node(target, Some(0));
        // An equal-f offer leaves the entry alone.
        state.open_node(target, Some(0));

        assert_eq!(state.stats.nodes_opened, 3);
        assert_eq!(state.stats.nodes_replaced, 1);

        let best = state.pop_best().unwrap();
        assert_eq!(state.nodes[best].position, target);
        assert_eq!(state.nodes[best].parent, Some(0));
        assert_eq!((state.nodes[best].g, state.nodes[best].f), (1, 2));

        assert_eq!(state.pop_best(), Some(1));
        // The superseded f=3 entry for the target is discarded.
        assert_eq!(state.pop_best(), Some(0));
        assert_eq!(state.stats.stale_skipped, 1);
        assert_eq!(state.pop_best(), None);
    }

    #[test]
    fn heap_orders_by_f_then_insertion() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierKey { f: 5, seq: 0, id: 0 });
        heap.push(FrontierKey { f: 4, seq: 2, id: 2 });
        heap.push(FrontierKey { f: 4, seq: 1, id: 1 });
        let order: Vec<NodeId> = std::iter::from_fn(|| heap.pop()).map(|k| k.id).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn searches_share_an_engine_across_threads() {
        let grid = Grid::new(16, 16, 0);
        let engine = AStar::new();
        let expected = engine.find_path(
            &grid,
            Position::new(0, 0),
            Position::new(15, 15),
            &SearchOptions::default(),
        );

        let (engine, grid) = (&engine, &grid);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(move |_| {
                    s.spawn(move || {
                        engine.find_path(
                            grid,
                            Position::new(0, 0),
                            Position::new(15, 15),
                            &SearchOptions::default(),
                        )
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
