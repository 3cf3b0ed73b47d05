//! Recursive-backtracker maze carving and difficulty perturbation.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::grid::{Cell, Grid, Position};
use super::WallPolicy;

/// Levels at or above this get the extra-wall pass.
pub const EXTRA_WALL_MIN_LEVEL: u32 = 3;

/// Largest seed drawn when the caller does not fix one.
pub const MAX_RANDOM_SEED: u64 = 1 << 30;

/// Lattice steps: two cells E, W, S, N.
const LATTICE_STEPS: [(isize, isize); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

/// Draws a fresh seed from the thread-local generator.
pub fn random_seed() -> u64 {
    rand::thread_rng().gen_range(0..=MAX_RANDOM_SEED)
}

/// Carves a perfect maze with a randomized depth-first backtracker.
///
/// The walk starts at `(1, 1)` and only visits odd lattice cells strictly
/// inside the border, so the result is a spanning tree over every lattice
/// cell and the border is never opened.
pub fn carve_maze<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::walled(width, height);
    let (gw, gh) = (grid.width(), grid.height());

    let origin = Position::new(1, 1);
    grid.set(origin, Cell::Open);
    let mut stack = vec![origin];
    let mut candidates: Vec<(Position, Position)> = Vec::with_capacity(4);

    while let Some(&current) = stack.last() {
        candidates.clear();
        for &(dx, dy) in &LATTICE_STEPS {
            let Some(next) = current.offset(dx, dy) else {
                continue;
            };
            let inside = (1..gw - 1).contains(&next.x) && (1..gh - 1).contains(&next.y);
            if inside && grid.get(next) == Some(Cell::Wall) {
                let between = Position::new(
                    (current.x + next.x) / 2,
                    (current.y + next.y) / 2,
                );
                candidates.push((next, between));
            }
        }

        if candidates.is_empty() {
            stack.pop();
        } else {
            let (next, between) = candidates[rng.gen_range(0..candidates.len())];
            grid.set(between, Cell::Open);
            grid.set(next, Cell::Open);
            stack.push(next);
        }
    }

    grid
}

/// Probability used by the extra-wall pass, or None below the threshold.
pub fn extra_wall_chance(level: u32) -> Option<f64> {
    if level < EXTRA_WALL_MIN_LEVEL {
        return None;
    }
    Some(0.04 + f64::from(level - EXTRA_WALL_MIN_LEVEL) * 0.015)
}

/// Re-closes a random sample of open cells to make a level harder.
///
/// `floor(open * chance)` cells are taken from a shuffled list of the open
/// cells. A sampled cell other than `(1, 1)` is closed when it still has at
/// least two open neighbours and a second draw lands under `chance`.
///
/// Under [`WallPolicy::Unchecked`] nothing keeps the maze connected, so the
/// exit can end up walled off. [`WallPolicy::KeepExitReachable`] picks the
/// exit of the carved maze up front and rolls back any closure that cuts it
/// off from the start.
///
/// Returns the number of cells closed.
pub fn add_extra_walls<R: Rng + ?Sized>(
    grid: &mut Grid,
    chance: f64,
    policy: WallPolicy,
    rng: &mut R,
) -> usize {
    let origin = Position::new(1, 1);
    let protected_exit = match policy {
        WallPolicy::Unchecked => None,
        WallPolicy::KeepExitReachable => grid.farthest_open_from(origin),
    };

    let mut opens = grid.open_positions();
    opens.shuffle(rng);
    let attempts = (opens.len() as f64 * chance) as usize;

    let mut closed = 0;
    for &pos in opens.iter().take(attempts) {
        if pos == origin {
            continue;
        }
        if grid.open_neighbors(pos) >= 2 && rng.gen::<f64>() < chance {
            if Some(pos) == protected_exit {
                continue;
            }
            grid.set(pos, Cell::Wall);
            if let Some(exit) = protected_exit {
                if !grid.is_reachable(origin, exit) {
                    grid.set(pos, Cell::Open);
                    continue;
                }
            }
            closed += 1;
        }
    }

    closed
}

/// Generates an unperturbed maze, returning it with the seed consumed.
pub fn generate_maze(width: usize, height: usize, seed: Option<u64>) -> (Grid, u64) {
    let seed = seed.unwrap_or_else(random_seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (carve_maze(width, height, &mut rng), seed)
}

/// Generates the maze for a level: carving followed by the extra-wall pass
/// for levels that qualify. Both stages share one RNG stream, so a seed
/// reproduces the perturbed grid too.
pub fn generate_level_maze(
    width: usize,
    height: usize,
    seed: Option<u64>,
    level: u32,
    policy: WallPolicy,
) -> (Grid, u64) {
    let seed = seed.unwrap_or_else(random_seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = carve_maze(width, height, &mut rng);

    if let Some(chance) = extra_wall_chance(level) {
        let closed = add_extra_walls(&mut grid, chance, policy, &mut rng);
        tracing::debug!(level, seed, closed, "applied extra walls");
    }

    (grid, seed)
}
