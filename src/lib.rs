//! Grid shortest-path search.
//!
//! [`AStar`] finds a minimum-step path between two cells of a [`Grid`] of
//! integer classifications, where one caller-chosen value marks a cell as
//! walkable. Movement is 4-directional, optionally 8-directional, and every
//! step costs 1.
//!
//! ```
//! use grid_astar::{find_path, Grid, Position};
//!
//! let mut grid = Grid::new(3, 3, 0);
//! grid.set(&Position::new(1, 1), -1);
//! let path = find_path(&grid, 0, 0, 2, 2, 0, false).unwrap();
//! assert_eq!(path.len(), 5);
//! assert!(!path.contains(&Position::new(1, 1)));
//! ```

pub mod algorithms;
pub mod batch_simulation;
pub mod config;
pub mod error;
pub mod grid;
pub mod scenario;
pub mod statistics;

pub use algorithms::a_star::{find_path, AStar, SearchOutcome};
pub use algorithms::common::{PathfindingAlgorithm, SearchOptions};
pub use algorithms::reference::ReferenceAStar;
pub use error::{GridError, ScenarioError};
pub use grid::{Grid, Position};
pub use statistics::SearchStats;
