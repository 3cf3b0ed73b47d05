//! Time-decayed visibility ("glow") tracking.
//!
//! Cells near the player light up when the player moves and fade out once
//! [`GLOW_DURATION`] has passed without another reveal. Nothing is ever
//! permanently explored: the map is a cache of last-seen timestamps.

use std::collections::HashMap;

use crate::maze::{Cell, Grid, Position};

/// Seconds a revealed cell stays visible after its last reveal.
pub const GLOW_DURATION: f64 = 0.7;

/// Tracks when each open cell was last lit up.
///
/// The tracker snapshots which cells are open when it is built, so only
/// open cells ever get timestamps. Build a new one (or call
/// [`VisibilityTracker::reset`]) whenever the grid is replaced.
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    width: usize,
    height: usize,
    open: Vec<bool>,
    last_seen: HashMap<Position, f64>,
    player: Position,
    glow_duration: f64,
}

impl VisibilityTracker {
    pub fn new(grid: &Grid) -> Self {
        Self::with_glow_duration(grid, GLOW_DURATION)
    }

    pub fn with_glow_duration(grid: &Grid, glow_duration: f64) -> Self {
        let mut tracker = Self {
            width: 0,
            height: 0,
            open: Vec::new(),
            last_seen: HashMap::new(),
            player: Position::new(1, 1),
            glow_duration,
        };
        tracker.reset(grid);
        tracker
    }

    /// Forgets every timestamp and adopts the shape of `grid`.
    pub fn reset(&mut self, grid: &Grid) {
        self.width = grid.width();
        self.height = grid.height();
        self.open = (0..self.height)
            .flat_map(|y| grid.row(y).iter().map(|cell| *cell == Cell::Open))
            .collect();
        self.last_seen.clear();
    }

    fn is_open(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height && self.open[pos.y * self.width + pos.x]
    }

    /// Lights every open cell within Manhattan distance `radius` of
    /// `position` and records `position` as the player's location.
    pub fn reveal(&mut self, position: Position, radius: usize, now: f64) {
        self.player = position;
        if self.width == 0 || self.height == 0 {
            return;
        }

        let x_min = position.x.saturating_sub(radius);
        let x_max = position.x.saturating_add(radius).min(self.width - 1);
        let y_min = position.y.saturating_sub(radius);
        let y_max = position.y.saturating_add(radius).min(self.height - 1);

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let cell = Position::new(x, y);
                if cell.manhattan(position) <= radius && self.is_open(cell) {
                    let ts = self.last_seen.entry(cell).or_insert(now);
                    if now > *ts {
                        *ts = now;
                    }
                }
            }
        }
    }

    /// Whether `cell` should be drawn at time `now`.
    pub fn is_visible(&self, cell: Position, now: f64) -> bool {
        if cell == self.player {
            return true;
        }
        self.last_seen
            .get(&cell)
            .is_some_and(|ts| now - ts <= self.glow_duration)
    }

    /// Timestamp of the most recent reveal of `cell`.
    pub fn last_seen(&self, cell: Position) -> Option<f64> {
        self.last_seen.get(&cell).copied()
    }

    pub fn player(&self) -> Position {
        self.player
    }

    /// Number of cells that have ever been lit since the last reset.
    pub fn tracked_cells(&self) -> usize {
        self.last_seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::generate_maze;

    /// A grid with every interior cell open, for geometry checks.
    fn open_room(width: usize, height: usize) -> Grid {
        let (mut grid, _) = generate_maze(width, height, Some(0));
        for y in 1..grid.height() - 1 {
            for x in 1..grid.width() - 1 {
                grid.set(Position::new(x, y), Cell::Open);
            }
        }
        grid
    }

    #[test]
    fn test_reveal_radius_scenario() {
        let grid = open_room(15, 15);
        let mut tracker = VisibilityTracker::new(&grid);
        tracker.reveal(Position::new(5, 5), 3, 0.0);

        assert!(tracker.is_visible(Position::new(5, 5), 0.0));
        assert!(tracker.is_visible(Position::new(5, 6), 0.0));
        assert!(tracker.is_visible(Position::new(8, 5), 0.0));
        // (7,7) is 4 steps away
        assert!(!tracker.is_visible(Position::new(7, 7), 0.0));

        assert!(tracker.is_visible(Position::new(8, 5), 0.7));
        assert!(!tracker.is_visible(Position::new(8, 5), 0.71));
        // The player's own cell never fades
        assert!(tracker.is_visible(Position::new(5, 5), 100.0));
    }

    #[test]
    fn test_walls_are_never_recorded() {
        let (grid, _) = generate_maze(21, 21, Some(4));
        let mut tracker = VisibilityTracker::new(&grid);
        tracker.reveal(Position::new(1, 1), 5, 0.0);

        assert!(!tracker.is_visible(Position::new(0, 0), 0.0));
        for pos in (0..grid.height())
            .flat_map(|y| (0..grid.width()).map(move |x| Position::new(x, y)))
        {
            if !grid.is_open(pos) {
                assert_eq!(tracker.last_seen(pos), None);
            }
        }
        assert!(tracker.tracked_cells() > 0);
    }

    #[test]
    fn test_unrevealed_and_out_of_bounds_are_hidden() {
        let grid = open_room(9, 9);
        let mut tracker = VisibilityTracker::new(&grid);
        tracker.reveal(Position::new(1, 1), 1, 0.0);
        assert!(!tracker.is_visible(Position::new(7, 7), 0.0));
        assert!(!tracker.is_visible(Position::new(100, 100), 0.0));
    }

    #[test]
    fn test_revisiting_refreshes_glow() {
        let grid = open_room(11, 11);
        let mut tracker = VisibilityTracker::new(&grid);
        tracker.reveal(Position::new(3, 3), 2, 0.0);
        tracker.reveal(Position::new(8, 8), 1, 1.0);
        assert!(!tracker.is_visible(Position::new(3, 4), 1.0));

        tracker.reveal(Position::new(3, 3), 2, 2.0);
        assert!(tracker.is_visible(Position::new(3, 4), 2.5));
        assert_eq!(tracker.last_seen(Position::new(3, 4)), Some(2.0));
    }

    #[test]
    fn test_timestamps_never_move_backwards() {
        let grid = open_room(9, 9);
        let mut tracker = VisibilityTracker::new(&grid);
        tracker.reveal(Position::new(4, 4), 1, 5.0);
        tracker.reveal(Position::new(4, 4), 1, 3.0);
        assert_eq!(tracker.last_seen(Position::new(4, 5)), Some(5.0));
    }

    #[test]
    fn test_reset_clears_timestamps() {
        let grid = open_room(9, 9);
        let mut tracker = VisibilityTracker::new(&grid);
        tracker.reveal(Position::new(4, 4), 2, 0.0);
        assert!(tracker.tracked_cells() > 0);

        let (next, _) = generate_maze(13, 13, Some(1));
        tracker.reset(&next);
        assert_eq!(tracker.tracked_cells(), 0);
    }

    #[test]
    fn test_reveal_clips_at_edges() {
        let grid = open_room(7, 7);
        let mut tracker = VisibilityTracker::new(&grid);
        tracker.reveal(Position::new(1, 1), 10, 0.0);
        assert_eq!(tracker.tracked_cells(), grid.open_count());
    }
}
