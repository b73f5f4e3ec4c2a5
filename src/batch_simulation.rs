use crate::algorithms::a_star::AStar;
use crate::algorithms::common::{PathfindingAlgorithm, SearchOptions};
use crate::algorithms::reference::ReferenceAStar;
use crate::config::Config;
use crate::error::{Result, ScenarioError};
use crate::grid::{Grid, Position};
use crate::scenario::{EdgeRoute, ScenarioSetup};
use crate::statistics::AlgorithmStats;
use log::{debug, info, warn};
use std::time::Instant;

/// The algorithms selected by `--algorithm`.
pub fn algorithms_for(name: &str) -> Result<Vec<Box<dyn PathfindingAlgorithm>>> {
    match name {
        "a_star" => Ok(vec![Box::new(AStar::new())]),
        "reference" => Ok(vec![Box::new(ReferenceAStar::new())]),
        "all" => Ok(vec![Box::new(AStar::new()), Box::new(ReferenceAStar::new())]),
        other => Err(ScenarioError::UnknownAlgorithm(other.to_string())),
    }
}

/// Why a returned path is not a legal route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathViolation {
    Empty,
    WrongEndpoints,
    OutOfBounds(Position),
    Blocked(Position),
    NotAdjacent(Position, Position),
    Repeated(Position),
}

/// Checks that `path` runs from `start` to `goal` through in-bounds, distinct,
/// adjacent cells, with every cell strictly between the ends reachable.
pub fn check_path(
    grid: &Grid,
    path: &[Position],
    start: Position,
    goal: Position,
    options: &SearchOptions,
) -> std::result::Result<(), PathViolation> {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return Err(PathViolation::Empty);
    };
    if *first != start || *last != goal {
        return Err(PathViolation::WrongEndpoints);
    }
    if let Some(p) = path.iter().find(|p| !grid.in_bounds(p)) {
        return Err(PathViolation::OutOfBounds(*p));
    }
    if path.len() > 2 {
        if let Some(p) = path[1..path.len() - 1]
            .iter()
            .find(|p| !grid.is_reachable(p, options.reachable_value))
        {
            return Err(PathViolation::Blocked(*p));
        }
    }
    for w in path.windows(2) {
        let (dx, dy) = ((w[0].x - w[1].x).abs(), (w[0].y - w[1].y).abs());
        let adjacent = if options.allow_diagonal {
            dx.max(dy) == 1
        } else {
            dx + dy == 1
        };
        if !adjacent {
            return Err(PathViolation::NotAdjacent(w[0], w[1]));
        }
    }
    let mut seen = rustc_hash::FxHashSet::default();
    if let Some(p) = path.iter().find(|p| !seen.insert(**p)) {
        return Err(PathViolation::Repeated(*p));
    }
    Ok(())
}

/// Per-algorithm outcome of a run.
#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    pub stats: AlgorithmStats,
    /// Routes that failed [`check_path`].
    pub invalid_paths: usize,
}

pub struct BatchSimulation {
    config: Config,
    results: Vec<AlgorithmResult>,
    /// Routes where the algorithms disagreed on reachability or length.
    disagreements: usize,
    scenarios_run: usize,
}

impl BatchSimulation {
    pub fn new(config: Config) -> Self {
        BatchSimulation {
            config,
            results: Vec::new(),
            disagreements: 0,
            scenarios_run: 0,
        }
    }

    /// Runs `config.runs` scenarios, seeded `seed, seed + 1, ...`, through
    /// every selected algorithm on identical input.
    pub fn run(&mut self) -> Result<()> {
        let algorithms = algorithms_for(&self.config.algorithm)?;
        let options = self.config.search_options();
        let base_seed = self.config.seed.unwrap_or_else(rand::random);

        self.results = algorithms
            .iter()
            .map(|a| AlgorithmResult {
                stats: AlgorithmStats::new(a.name()),
                invalid_paths: 0,
            })
            .collect();

        info!(
            "batch: {} runs on {}x{} grids, algorithm={}, base seed {}",
            self.config.runs, self.config.width, self.config.height, self.config.algorithm, base_seed
        );
        let started = Instant::now();

        for i in 0..self.config.runs {
            let seed = base_seed.wrapping_add(i as u64);
            let setup = ScenarioSetup::generate(&self.config, Some(seed))?;
            let runs: Vec<Vec<EdgeRoute>> = algorithms
                .iter()
                .map(|a| setup.run(a.as_ref(), &options))
                .collect();
            self.record(&setup, &runs, &options);
            self.scenarios_run += 1;
        }

        debug!("batch finished in {:.2?}", started.elapsed());
        Ok(())
    }

    fn record(&mut self, setup: &ScenarioSetup, runs: &[Vec<EdgeRoute>], options: &SearchOptions) {
        // Each route is searched on the grid with its own start and all
        // earlier starts blocked.
        let mut grid = setup.grid.clone();
        for (i, (_, start)) in setup.starts.iter().enumerate() {
            grid.set(start, setup.blocked_value);

            let mut lengths = Vec::with_capacity(runs.len());
            for (result, routes) in self.results.iter_mut().zip(runs) {
                let route = &routes[i];
                result.stats.record(route.path.as_deref(), route.elapsed);
                if let Some(path) = &route.path {
                    if let Err(violation) = check_path(&grid, path, route.start, setup.center, options) {
                        warn!(
                            "[{}] seed {} {} route invalid: {:?}",
                            result.stats.name, setup.seed, route.edge, violation
                        );
                        result.invalid_paths += 1;
                    }
                }
                lengths.push(route.path.as_ref().map(Vec::len));
            }

            if lengths.windows(2).any(|w| w[0] != w[1]) {
                debug!(
                    "seed {} {} route lengths differ: {:?}",
                    setup.seed, runs[0][i].edge, lengths
                );
                self.disagreements += 1;
            }
        }
    }

    pub fn results(&self) -> &[AlgorithmResult] {
        &self.results
    }

    pub fn disagreements(&self) -> usize {
        self.disagreements
    }

    pub fn print_summary(&self) {
        if self.results.is_empty() {
            println!("No results to summarize.");
            return;
        }

        println!("\n=== BATCH SIMULATION SUMMARY ===");
        println!("Scenarios: {}", self.scenarios_run);
        for result in &self.results {
            println!();
            print!("{}", result.stats);
            println!("Invalid paths: {}", result.invalid_paths);
        }
        if self.results.len() > 1 {
            println!();
            println!("Routes where algorithms disagreed: {}", self.disagreements);
            if self.disagreements > 0 && self.config.allow_diagonal {
                println!("Note: with diagonal moves the Manhattan estimate can overestimate, so lengths may differ");
            }
        }
    }
}

/// Print one scenario's routes per algorithm in a table.
pub fn print_comparison_results(setup: &ScenarioSetup, names: &[&str], runs: &[Vec<EdgeRoute>]) {
    println!("\n=== ALGORITHM COMPARISON RESULTS ===");
    println!("Centre: ({},{})  Seed: {}", setup.center.x, setup.center.y, setup.seed);
    println!();
    println!(
        "{:<12} {:<8} {:<10} {:<8} {:<12}",
        "Algorithm", "Edge", "Start", "Steps", "Time"
    );
    println!("{}", "-".repeat(54));

    for (name, routes) in names.iter().zip(runs) {
        for route in routes {
            let steps = route
                .path
                .as_ref()
                .map_or_else(|| "none".to_string(), |p| (p.len() - 1).to_string());
            println!(
                "{:<12} {:<8} {:<10} {:<8} {:<12}",
                name,
                route.edge.to_string(),
                format!("({},{})", route.start.x, route.start.y),
                steps,
                format!("{:.2?}", route.elapsed)
            );
        }
    }
}
