//! One level's worth of game state.
//!
//! A [`LevelSession`] owns the current grid, the player's position and the
//! visibility tracker, and replaces all three wholesale whenever the level
//! is regenerated or advanced. Times are seconds on a monotonic clock
//! supplied by the caller.

use crate::config::{self, GameConfig, PINGER_SHOW_SECS};
use crate::maze::{generate_level_maze, Grid, Position, WallPolicy};
use crate::tier::Tier;
use crate::visibility::VisibilityTracker;

/// What happened when the player tried to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The target was a wall or outside the grid.
    Blocked,
    /// The player moved.
    Moved,
    /// The player moved onto the exit.
    ExitReached,
}

/// Statistics for a finished (or in-progress) level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSummary {
    pub level: u32,
    pub elapsed_secs: f64,
    pub moves: u32,
    pub hints_used: u32,
}

/// State for the level being played.
#[derive(Debug, Clone)]
pub struct LevelSession {
    level: u32,
    tier: Tier,
    fixed_seed: Option<u64>,
    wall_policy: WallPolicy,
    seed: u64,
    grid: Grid,
    start: Position,
    exit: Position,
    player: Position,
    reveal_radius: usize,
    tracker: VisibilityTracker,
    moves: u32,
    hints_used: u32,
    started_at: f64,
    pinger_until: f64,
}

impl LevelSession {
    /// Builds the session for `config.start_level`.
    pub fn new(config: &GameConfig, now: f64) -> Self {
        Self::with_level(
            config::clamp_level(config.start_level),
            config.fixed_seed,
            config.wall_policy,
            now,
        )
    }

    /// Builds a session for an explicit level.
    pub fn with_level(level: u32, fixed_seed: Option<u64>, wall_policy: WallPolicy, now: f64) -> Self {
        let level = config::clamp_level(level);
        let (grid, seed, start, exit) = Self::build_grid(level, fixed_seed, wall_policy);
        let tracker = VisibilityTracker::new(&grid);

        let mut session = Self {
            level,
            tier: Tier::for_level(level),
            fixed_seed,
            wall_policy,
            seed,
            grid,
            start,
            exit,
            player: start,
            reveal_radius: config::reveal_radius(level),
            tracker,
            moves: 0,
            hints_used: 0,
            started_at: now,
            pinger_until: 0.0,
        };
        session.tracker.reveal(start, session.reveal_radius, now);
        session
    }

    fn build_grid(
        level: u32,
        fixed_seed: Option<u64>,
        wall_policy: WallPolicy,
    ) -> (Grid, u64, Position, Position) {
        let (width, height) = config::level_size(level);
        let (grid, seed) = generate_level_maze(width, height, fixed_seed, level, wall_policy);

        // (1,1) is never closed, so both lookups always succeed
        let start = grid.start_position().unwrap_or(Position::new(1, 1));
        let exit = grid.farthest_open_from(start).unwrap_or(start);

        if !grid.is_reachable(start, exit) {
            tracing::warn!(
                level,
                seed,
                "exit {} is walled off from the start; regenerate to continue",
                exit
            );
        }
        tracing::info!(level, seed, width = grid.width(), height = grid.height(), "generated level");

        (grid, seed, start, exit)
    }

    /// Replaces the grid for `level` and resets all per-level state.
    fn load_level(&mut self, level: u32, now: f64) {
        let level = config::clamp_level(level);
        let (grid, seed, start, exit) = Self::build_grid(level, self.fixed_seed, self.wall_policy);

        self.level = level;
        self.tier = Tier::for_level(level);
        self.seed = seed;
        self.tracker = VisibilityTracker::new(&grid);
        self.grid = grid;
        self.start = start;
        self.exit = exit;
        self.player = start;
        self.reveal_radius = config::reveal_radius(level);
        self.moves = 0;
        self.hints_used = 0;
        self.started_at = now;
        self.pinger_until = 0.0;
        self.tracker.reveal(start, self.reveal_radius, now);
    }

    /// New random maze for the same level. Drops any fixed seed.
    pub fn regenerate(&mut self, now: f64) {
        self.fixed_seed = None;
        self.load_level(self.level, now);
    }

    /// Moves on to the next level (staying on the last one at the top).
    pub fn advance(&mut self, now: f64) {
        self.load_level(self.level + 1, now);
    }

    /// Attempts a one-cell step by `(dx, dy)`.
    pub fn try_move(&mut self, dx: isize, dy: isize, now: f64) -> MoveOutcome {
        let Some(target) = self.player.offset(dx, dy) else {
            return MoveOutcome::Blocked;
        };
        if !self.grid.is_open(target) {
            return MoveOutcome::Blocked;
        }

        self.player = target;
        self.moves += 1;
        self.tracker.reveal(target, self.reveal_radius, now);

        if target == self.exit {
            MoveOutcome::ExitReached
        } else {
            MoveOutcome::Moved
        }
    }

    /// Counts a hint and shows the exit arrow for [`PINGER_SHOW_SECS`].
    pub fn trigger_hint(&mut self, now: f64) {
        self.hints_used += 1;
        self.pinger_until = now + PINGER_SHOW_SECS;
    }

    /// Whether the hint arrow should be drawn.
    pub fn pinger_active(&self, now: f64) -> bool {
        now < self.pinger_until
    }

    /// Seconds left on the hint arrow.
    pub fn pinger_remaining(&self, now: f64) -> f64 {
        (self.pinger_until - now).max(0.0)
    }

    /// Direction from the player to the exit in radians, with y growing
    /// downwards like screen coordinates.
    pub fn exit_bearing(&self) -> f64 {
        let dx = self.exit.x as f64 - self.player.x as f64;
        let dy = self.exit.y as f64 - self.player.y as f64;
        dy.atan2(dx)
    }

    pub fn is_visible(&self, cell: Position, now: f64) -> bool {
        self.tracker.is_visible(cell, now)
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.started_at).max(0.0)
    }

    pub fn summary(&self, now: f64) -> LevelSummary {
        LevelSummary {
            level: self.level,
            elapsed_secs: self.elapsed(now),
            moves: self.moves,
            hints_used: self.hints_used,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    pub fn reveal_radius(&self) -> usize {
        self.reveal_radius
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }
}
