//! Errors for grid construction and scenario setup.
//!
//! The search itself never fails: an unreachable goal is `None`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("line {index} has {found} cells, expected {expected}")]
    Ragged {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown map character {ch:?} at ({x},{y})")]
    UnknownCell { ch: char, x: usize, y: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("grid {width}x{height} is too small for a centre margin of ({margin_x},{margin_y})")]
    GridTooSmall {
        width: usize,
        height: usize,
        margin_x: usize,
        margin_y: usize,
    },

    #[error("no reachable cell on the {0} edge")]
    NoEdgeCell(&'static str),

    #[error("unknown algorithm {0:?}; select 'a_star', 'reference' or 'all'")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type Result<T> = std::result::Result<T, ScenarioError>;
