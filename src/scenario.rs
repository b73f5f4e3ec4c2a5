//! Edge-to-centre routing scenario.
//!
//! A map with its four corners removed, a random centre point kept away from
//! the edges, and one random start on each edge. Each start is blocked once
//! chosen, then routed to the centre, so later routes cannot pass through
//! earlier starts.

use crate::algorithms::common::{PathfindingAlgorithm, SearchOptions};
use crate::config::Config;
use crate::error::{Result, ScenarioError};
use crate::grid::{Grid, Position};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::time::{Duration, Instant};

/// The grid edge a route starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    MaxY,
    MinY,
    MinX,
    MaxX,
}

impl Edge {
    /// Routing order.
    pub const ALL: [Edge; 4] = [Edge::MaxY, Edge::MinY, Edge::MinX, Edge::MaxX];

    /// Every cell on this edge of a `width` x `height` grid.
    pub fn cells(&self, width: usize, height: usize) -> Vec<Position> {
        let (w, h) = (width as i32, height as i32);
        match self {
            Edge::MaxY => (0..w).map(|x| Position::new(x, h - 1)).collect(),
            Edge::MinY => (0..w).map(|x| Position::new(x, 0)).collect(),
            Edge::MinX => (0..h).map(|y| Position::new(0, y)).collect(),
            Edge::MaxX => (0..h).map(|y| Position::new(w - 1, y)).collect(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Edge::MaxY => "y=max",
            Edge::MinY => "y=0",
            Edge::MinX => "x=0",
            Edge::MaxX => "x=max",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A generated map with its centre and edge starts fixed, so several
/// algorithms can be run against identical input.
#[derive(Debug, Clone)]
pub struct ScenarioSetup {
    pub grid: Grid,
    pub center: Position,
    pub starts: Vec<(Edge, Position)>,
    pub blocked_value: i32,
    pub seed: u64,
}

/// One edge start routed to the centre.
#[derive(Debug, Clone)]
pub struct EdgeRoute {
    pub edge: Edge,
    pub start: Position,
    pub path: Option<Vec<Position>>,
    pub elapsed: Duration,
}

impl ScenarioSetup {
    /// Builds a scenario. With `seed` the result is reproducible.
    pub fn generate(config: &Config, seed: Option<u64>) -> Result<Self> {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let (width, height) = (config.width, config.height);
        // The centre is drawn from [margin, size - 1 - margin).
        if width < 2 * config.margin_x + 2 || height < 2 * config.margin_y + 2 {
            return Err(ScenarioError::GridTooSmall {
                width,
                height,
                margin_x: config.margin_x,
                margin_y: config.margin_y,
            });
        }

        let reachable = config.reachable_value;
        let blocked = config.blocked_value;
        let mut grid = Grid::new(width, height, reachable);
        let (max_x, max_y) = (width as i32 - 1, height as i32 - 1);
        for corner in [(0, 0), (max_x, 0), (0, max_y), (max_x, max_y)] {
            grid.set(&Position::from(corner), blocked);
        }

        let center = Position::new(
            rng.gen_range(config.margin_x as i32..max_x - config.margin_x as i32),
            rng.gen_range(config.margin_y as i32..max_y - config.margin_y as i32),
        );

        // Place walls randomly, never on the centre
        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < config.num_walls && attempts < config.num_walls * 3 {
            let pos = Position::new(rng.gen_range(0..=max_x), rng.gen_range(0..=max_y));
            if pos != center && grid.is_reachable(&pos, reachable) {
                grid.set(&pos, blocked);
                walls_placed += 1;
            }
            attempts += 1;
        }
        if walls_placed < config.num_walls {
            warn!(
                "placed {} of {} walls before giving up",
                walls_placed, config.num_walls
            );
        }

        let mut starts = Vec::with_capacity(Edge::ALL.len());
        for edge in Edge::ALL {
            let candidates: Vec<Position> = edge
                .cells(width, height)
                .into_iter()
                .filter(|p| grid.is_reachable(p, reachable))
                .collect();
            let start = *candidates
                .choose(&mut rng)
                .ok_or(ScenarioError::NoEdgeCell(edge.label()))?;
            starts.push((edge, start));
        }

        debug!(
            "generated scenario seed={} centre=({},{}) walls={}",
            seed, center.x, center.y, walls_placed
        );

        Ok(ScenarioSetup {
            grid,
            center,
            starts,
            blocked_value: blocked,
            seed,
        })
    }

    /// Routes every edge start to the centre, in order, blocking each start
    /// before its search. `self.grid` is left untouched.
    pub fn run(
        &self,
        algorithm: &dyn PathfindingAlgorithm,
        options: &SearchOptions,
    ) -> Vec<EdgeRoute> {
        let mut grid = self.grid.clone();
        let mut routes = Vec::with_capacity(self.starts.len());

        for &(edge, start) in &self.starts {
            grid.set(&start, self.blocked_value);

            let started = Instant::now();
            let path = algorithm.find_path(&grid, start, self.center, options);
            let elapsed = started.elapsed();

            match &path {
                Some(path) => info!("[{}] {} route: {}", algorithm.name(), edge, format_path(path)),
                None => info!("[{}] {} route: no path found", algorithm.name(), edge),
            }

            routes.push(EdgeRoute {
                edge,
                start,
                path,
                elapsed,
            });
        }
        routes
    }

    /// The grid as it looks after every start has been blocked.
    pub fn final_grid(&self) -> Grid {
        let mut grid = self.grid.clone();
        for (_, start) in &self.starts {
            grid.set(start, self.blocked_value);
        }
        grid
    }
}

/// `(x,y) (x,y) ...`
pub fn format_path(path: &[Position]) -> String {
    path.iter()
        .map(|p| format!("({},{})", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::a_star::AStar;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        Config::parse_from(std::iter::once("grid_astar").chain(args.iter().copied()))
    }

    #[test]
    fn corners_are_removed_and_centre_respects_margin() {
        let config = config(&[]);
        let setup = ScenarioSetup::generate(&config, Some(7)).unwrap();
        for corner in [(0, 0), (29, 0), (0, 15), (29, 15)] {
            assert_eq!(setup.grid.get(&Position::from(corner)), Some(-1));
        }
        assert!((7..22).contains(&setup.center.x));
        assert!((4..11).contains(&setup.center.y));
    }

    #[test]
    fn starts_lie_on_their_edges() {
        let setup = ScenarioSetup::generate(&config(&[]), Some(11)).unwrap();
        let edges: Vec<Edge> = setup.starts.iter().map(|(e, _)| *e).collect();
        assert_eq!(edges, Edge::ALL.to_vec());
        for (edge, start) in &setup.starts {
            assert!(edge.cells(30, 16).contains(start));
            assert!(setup.grid.is_reachable(start, 0));
        }
    }

    #[test]
    fn same_seed_same_scenario() {
        let config = config(&["--num-walls", "40"]);
        let a = ScenarioSetup::generate(&config, Some(99)).unwrap();
        let b = ScenarioSetup::generate(&config, Some(99)).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.center, b.center);
        assert_eq!(a.starts, b.starts);
    }

    #[test]
    fn open_map_routes_every_edge() {
        let setup = ScenarioSetup::generate(&config(&[]), Some(3)).unwrap();
        let routes = setup.run(&AStar::new(), &SearchOptions::default());
        assert_eq!(routes.len(), 4);
        for route in &routes {
            let path = route.path.as_ref().unwrap();
            assert_eq!(path.first(), Some(&route.start));
            assert_eq!(path.last(), Some(&setup.center));
            assert_eq!(path.len() as i32 - 1, route.start.manhattan(&setup.center));
        }
        // Running does not alter the stored grid.
        assert!(setup.grid.is_reachable(&setup.starts[0].1, 0));
        assert!(!setup.final_grid().is_reachable(&setup.starts[0].1, 0));
    }

    #[test]
    fn small_grid_is_rejected() {
        let config = config(&["--width", "10", "--height", "16"]);
        assert!(matches!(
            ScenarioSetup::generate(&config, Some(1)),
            Err(ScenarioError::GridTooSmall { width: 10, .. })
        ));
    }

    #[test]
    fn format_path_lists_coordinates() {
        let path = [Position::new(0, 0), Position::new(1, 0)];
        assert_eq!(format_path(&path), "(0,0) (1,0)");
    }
}
