use crate::grid::{Grid, Position};

/// Per-call search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// The one cell value that counts as traversable.
    pub reachable_value: i32,
    /// Also step to the four diagonal neighbours, at the same cost of 1.
    pub allow_diagonal: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            reachable_value: 0,
            allow_diagonal: false,
        }
    }
}

impl SearchOptions {
    pub fn with_diagonal(mut self, allow_diagonal: bool) -> Self {
        self.allow_diagonal = allow_diagonal;
        self
    }

    pub fn with_reachable_value(mut self, reachable_value: i32) -> Self {
        self.reachable_value = reachable_value;
        self
    }
}

pub trait PathfindingAlgorithm {
    /// Short identifier used in reports and on the command line.
    fn name(&self) -> &'static str;

    /// Finds a start-to-goal path, both ends included, or `None`.
    ///
    /// Takes `&self`: every call owns its own search state, so one instance
    /// can serve concurrent callers sharing the same read-only grid.
    fn find_path(
        &self,
        grid: &Grid,
        start: Position,
        goal: Position,
        options: &SearchOptions,
    ) -> Option<Vec<Position>>;
}
