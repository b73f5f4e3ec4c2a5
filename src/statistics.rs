use crate::grid::Position;
use std::fmt;
use std::time::Duration;

/// Counters collected during a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes moved from the frontier to the closed set.
    pub nodes_expanded: usize,
    /// Positions that entered the frontier for the first time.
    pub nodes_opened: usize,
    /// Frontier entries superseded by a node with a lower f.
    pub nodes_replaced: usize,
    /// Outdated heap entries discarded on pop.
    pub stale_skipped: usize,
    /// Largest frontier size seen.
    pub frontier_high_water: usize,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes expanded: {}", self.nodes_expanded)?;
        writeln!(f, "Nodes opened: {}", self.nodes_opened)?;
        writeln!(f, "Frontier replacements: {}", self.nodes_replaced)?;
        writeln!(f, "Stale entries skipped: {}", self.stale_skipped)?;
        writeln!(f, "Frontier high-water mark: {}", self.frontier_high_water)?;
        Ok(())
    }
}

/// Wall-clock timings of `find_path` calls.
#[derive(Debug, Clone, Default)]
pub struct TimingData {
    pub find_path_times: Vec<Duration>,
}

impl TimingData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.find_path_times.push(elapsed);
    }

    pub fn total_calls(&self) -> usize {
        self.find_path_times.len()
    }

    pub fn total_time(&self) -> Duration {
        self.find_path_times.iter().sum()
    }

    pub fn average_find_path_time(&self) -> Duration {
        if self.find_path_times.is_empty() {
            Duration::ZERO
        } else {
            self.total_time() / self.find_path_times.len() as u32
        }
    }

    pub fn max_find_path_time(&self) -> Duration {
        self.find_path_times.iter().copied().max().unwrap_or_default()
    }
}

impl fmt::Display for TimingData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total pathfinding calls: {}", self.total_calls())?;
        writeln!(f, "Average find_path time: {:.2?}", self.average_find_path_time())?;
        writeln!(f, "Slowest find_path time: {:.2?}", self.max_find_path_time())?;
        writeln!(f, "Total time in find_path: {:.2?}", self.total_time())?;
        Ok(())
    }
}

/// Outcome counts for one algorithm across many searches.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmStats {
    pub name: String,
    pub searches: usize,
    pub paths_found: usize,
    /// Sum of edge counts over every path found.
    pub total_path_edges: usize,
    pub timing: TimingData,
}

impl AlgorithmStats {
    pub fn new(name: &str) -> Self {
        AlgorithmStats {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, path: Option<&[Position]>, elapsed: Duration) {
        self.searches += 1;
        self.timing.record(elapsed);
        if let Some(path) = path {
            self.paths_found += 1;
            self.total_path_edges += path.len().saturating_sub(1);
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.paths_found as f64 / self.searches as f64
        }
    }

    pub fn average_path_edges(&self) -> f64 {
        if self.paths_found == 0 {
            0.0
        } else {
            self.total_path_edges as f64 / self.paths_found as f64
        }
    }
}

impl fmt::Display for AlgorithmStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Statistics:", self.name)?;
        writeln!(f, "Searches: {}", self.searches)?;
        writeln!(
            f,
            "Paths found: {} ({:.1}%)",
            self.paths_found,
            self.success_rate() * 100.0
        )?;
        writeln!(f, "Average path length: {:.2} steps", self.average_path_edges())?;
        write!(f, "{}", self.timing)
    }
}
