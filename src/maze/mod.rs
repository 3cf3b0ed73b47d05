//! Procedural maze generation.
//!
//! Mazes are carved as perfect spanning trees over an odd-coordinate
//! lattice, then optionally roughened by re-closing open cells on harder
//! levels. Start and exit selection helpers live on [`Grid`].

mod generator;
mod grid;

pub use generator::{
    add_extra_walls, carve_maze, extra_wall_chance, generate_level_maze, generate_maze,
    random_seed, EXTRA_WALL_MIN_LEVEL, MAX_RANDOM_SEED,
};
pub use grid::{Cell, Grid, Position, MIN_DIMENSION};

use thiserror::Error;

/// Errors raised by strict grid construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

/// How the extra-wall pass treats connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallPolicy {
    /// Close cells without checking connectivity. The exit may become
    /// unreachable; regenerating the level is the player's way out.
    #[default]
    Unchecked,
    /// Roll back any closure that cuts the start off from the exit.
    KeepExitReachable,
}
