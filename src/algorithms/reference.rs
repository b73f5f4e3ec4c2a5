use crate::algorithms::common::{PathfindingAlgorithm, SearchOptions};
use crate::grid::{Grid, Position};
use pathfinding::prelude::astar;

/// A* from the `pathfinding` crate over the same grid model.
///
/// Used to cross-check [`crate::AStar`] in comparison runs. Path lengths agree
/// in 4-directional mode; the chosen route among equal-length ones may differ.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceAStar;

impl ReferenceAStar {
    pub fn new() -> Self {
        ReferenceAStar
    }
}

impl PathfindingAlgorithm for ReferenceAStar {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn find_path(
        &self,
        grid: &Grid,
        start: Position,
        goal: Position,
        options: &SearchOptions,
    ) -> Option<Vec<Position>> {
        if !grid.in_bounds(&start) || !grid.in_bounds(&goal) {
            return None;
        }

        let result = astar(
            &start,
            |p| {
                grid.neighbors(p, options.allow_diagonal)
                    .into_iter()
                    .filter(|n| grid.is_reachable(n, options.reachable_value))
                    .map(|n| (n, 1))
                    .collect::<Vec<_>>()
            },
            |p| p.manhattan(&goal),
            |p| *p == goal,
        );

        // `astar` returns `(path, cost)`; only the path is needed.
        result.map(|(path, _)| path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_shortest_path_around_wall() {
        let grid = Grid::parse(
            "
            ....
            .##.
            ....
            ",
            0,
            1,
        )
        .unwrap();
        let path = ReferenceAStar::new()
            .find_path(
                &grid,
                Position::new(0, 1),
                Position::new(3, 1),
                &SearchOptions::default(),
            )
            .unwrap();
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn rejects_out_of_bounds() {
        let grid = Grid::new(2, 2, 0);
        let path = ReferenceAStar.find_path(
            &grid,
            Position::new(-1, 0),
            Position::new(1, 1),
            &SearchOptions::default(),
        );
        assert_eq!(path, None);
    }
}
