//! Maze grid storage and cell queries.
//!
//! A [`Grid`] is a dense row-major array of [`Cell`]s whose dimensions are
//! always odd and at least 3x3: odd coordinates form the lattice of rooms,
//! even coordinates the walls that may be carved between them.

use std::collections::VecDeque;
use std::fmt;

use super::MazeError;

/// Smallest width or height a grid can have.
pub const MIN_DIMENSION: usize = 3;

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Open,
}

/// A cell coordinate, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the position shifted by `(dx, dy)`, or None if either
    /// coordinate would become negative.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal unit steps in N, S, W, E order.
const ORTHOGONAL: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Rectangular maze grid.
///
/// Grids are created by the generator and are read-only for everyone else;
/// regenerating a level builds a new grid instead of editing an old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Coerces a requested dimension to the nearest odd value `>= 3`.
    pub fn normalize_dimension(requested: usize) -> usize {
        let n = requested.max(MIN_DIMENSION);
        if n % 2 == 0 {
            n + 1
        } else {
            n
        }
    }

    /// Strict variant of [`Grid::normalize_dimension`] for callers that
    /// prefer rejecting zero-sized requests over clamping them.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if either dimension is zero.
    pub fn checked_dimensions(width: usize, height: usize) -> Result<(usize, usize), MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok((
            Self::normalize_dimension(width),
            Self::normalize_dimension(height),
        ))
    }

    /// Creates a grid of the normalized size with every cell a wall.
    pub(crate) fn walled(width: usize, height: usize) -> Self {
        let width = Self::normalize_dimension(width);
        let height = Self::normalize_dimension(height);
        Self {
            width,
            height,
            cells: vec![Cell::Wall; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Returns the cell at `pos`, or None when out of bounds.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.contains(pos) {
            Some(self.cells[pos.y * self.width + pos.x])
        } else {
            None
        }
    }

    pub fn is_open(&self, pos: Position) -> bool {
        self.get(pos) == Some(Cell::Open)
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if self.contains(pos) {
            self.cells[pos.y * self.width + pos.x] = cell;
        }
    }

    /// Returns one row of cells for rendering.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y.min(self.height) * self.width;
        let end = (start + self.width).min(self.cells.len());
        &self.cells[start..end]
    }

    /// All open cells in row-major order.
    pub fn open_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Open)
            .map(|(i, _)| Position::new(i % self.width, i / self.width))
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Open).count()
    }

    /// Iterates the in-bounds orthogonal neighbours of `pos`.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        ORTHOGONAL
            .iter()
            .filter_map(move |&(dx, dy)| pos.offset(dx, dy))
            .filter(move |p| self.contains(*p))
    }

    /// Number of open orthogonal neighbours of `pos`.
    pub fn open_neighbors(&self, pos: Position) -> usize {
        self.neighbors(pos).filter(|p| self.is_open(*p)).count()
    }

    /// Whether every border cell is a wall.
    pub fn border_is_walled(&self) -> bool {
        let top_bottom = (0..self.width).all(|x| {
            !self.is_open(Position::new(x, 0)) && !self.is_open(Position::new(x, self.height - 1))
        });
        let sides = (0..self.height).all(|y| {
            !self.is_open(Position::new(0, y)) && !self.is_open(Position::new(self.width - 1, y))
        });
        top_bottom && sides
    }

    /// Breadth-first flood fill over open cells starting at `start`.
    ///
    /// Returns a visited mask indexed like the cell array; empty when
    /// `start` is not open.
    fn flood(&self, start: Position) -> Vec<bool> {
        let mut visited = vec![false; self.cells.len()];
        if !self.is_open(start) {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited[start.y * self.width + start.x] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(current) {
                let idx = next.y * self.width + next.x;
                if !visited[idx] && self.cells[idx] == Cell::Open {
                    visited[idx] = true;
                    queue.push_back(next);
                }
            }
        }

        visited
    }

    /// Number of open cells reachable from `start` (including itself).
    pub fn reachable_from(&self, start: Position) -> usize {
        self.flood(start).iter().filter(|v| **v).count()
    }

    /// Whether `to` can be reached from `from` through open cells.
    pub fn is_reachable(&self, from: Position, to: Position) -> bool {
        if !self.is_open(to) {
            return false;
        }
        self.flood(from)[to.y * self.width + to.x]
    }

    /// The open cell minimizing `x + y`, first in row-major order on ties.
    pub fn start_position(&self) -> Option<Position> {
        self.open_positions()
            .into_iter()
            .reduce(|best, p| if p.x + p.y < best.x + best.y { p } else { best })
    }

    /// The open cell farthest from `origin` by Manhattan distance.
    ///
    /// Ties resolve to the first maximum in row-major order.
    pub fn farthest_open_from(&self, origin: Position) -> Option<Position> {
        self.open_positions().into_iter().reduce(|best, p| {
            if p.manhattan(origin) > best.manhattan(origin) {
                p
            } else {
                best
            }
        })
    }
}
