use crate::error::GridError;
use std::fmt::Write as _;

/// A cell coordinate. Signed so that callers can name cells outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Manhattan distance, |dx| + |dy|.
    pub fn manhattan(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position { x, y }
    }
}

/// Orthogonal offsets: left, right, up, down.
const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
/// Diagonal offsets: up-left, up-right, down-left, down-right.
const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// A 2D array of integer cell classifications, indexed `cells[x][y]`.
///
/// The grid knows nothing about which value is traversable; that is decided
/// per query by the caller-supplied reachable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<i32>>,
}

impl Grid {
    pub fn new(width: usize, height: usize, fill: i32) -> Self {
        Grid {
            width,
            height,
            cells: vec![vec![fill; height]; width],
        }
    }

    /// Builds a grid from columns, so `columns[x][y]` is the cell at (x, y).
    pub fn from_columns(columns: Vec<Vec<i32>>) -> Result<Self, GridError> {
        let height = columns.first().map_or(0, Vec::len);
        if columns.is_empty() || height == 0 {
            return Err(GridError::Empty);
        }
        if let Some((x, col)) = columns.iter().enumerate().find(|(_, c)| c.len() != height) {
            return Err(GridError::Ragged {
                index: x,
                expected: height,
                found: col.len(),
            });
        }
        Ok(Grid {
            width: columns.len(),
            height,
            cells: columns,
        })
    }

    /// Parses an ASCII map, one text line per row (y grows downward).
    ///
    /// `.` maps to `open` and `#` maps to `blocked`. Blank lines and
    /// surrounding whitespace are ignored.
    pub fn parse(text: &str, open: i32, blocked: i32) -> Result<Self, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if rows.is_empty() || width == 0 {
            return Err(GridError::Empty);
        }

        let mut grid = Grid::new(width, rows.len(), open);
        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(GridError::Ragged {
                    index: y,
                    expected: width,
                    found: len,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                grid.cells[x][y] = match ch {
                    '.' => open,
                    '#' => blocked,
                    other => return Err(GridError::UnknownCell { ch: other, x, y }),
                };
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: &Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// The classification at `pos`, or `None` outside the grid.
    pub fn get(&self, pos: &Position) -> Option<i32> {
        if self.in_bounds(pos) {
            Some(self.cells[pos.x as usize][pos.y as usize])
        } else {
            None
        }
    }

    /// Overwrites a cell. Returns `false` and does nothing outside the grid.
    pub fn set(&mut self, pos: &Position, value: i32) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        self.cells[pos.x as usize][pos.y as usize] = value;
        true
    }

    /// True iff `pos` is inside the grid and holds `reachable_value`.
    /// Out of bounds is unreachable, never an error.
    pub fn is_reachable(&self, pos: &Position, reachable_value: i32) -> bool {
        self.get(pos) == Some(reachable_value)
    }

    /// In-bounds neighbour candidates of `pos`, in a fixed order: left, right,
    /// up, down, then (with `allow_diagonal`) up-left, up-right, down-left,
    /// down-right. Reachability is not checked here.
    pub fn neighbors(&self, pos: &Position, allow_diagonal: bool) -> Vec<Position> {
        let diagonals: &[(i32, i32)] = if allow_diagonal { &DIAGONAL } else { &[] };
        ORTHOGONAL
            .iter()
            .chain(diagonals)
            .map(|(dx, dy)| Position::new(pos.x + dx, pos.y + dy))
            .filter(|p| self.in_bounds(p))
            .collect()
    }

    /// Renders the grid as text with `path` overlaid.
    ///
    /// Legend: `S` start, `G` goal, `*` path, `.` reachable, `#` anything else.
    pub fn render(&self, path: &[Position], reachable_value: i32) -> String {
        let mut out = String::new();
        let start = path.first();
        let goal = path.last();

        out.push_str("   ");
        for x in 0..self.width {
            let _ = write!(out, "{:2}", x % 10);
        }
        out.push('\n');

        for y in 0..self.height {
            let _ = write!(out, "{:2} ", y);
            for x in 0..self.width {
                let pos = Position::new(x as i32, y as i32);
                let ch = if Some(&pos) == start {
                    'S'
                } else if Some(&pos) == goal {
                    'G'
                } else if path.contains(&pos) {
                    '*'
                } else if self.cells[x][y] == reachable_value {
                    '.'
                } else {
                    '#'
                };
                out.push(ch);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}
