use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::{moves, Direction, Grid, History, HistoryEntry};

/// The tile value that wins the game.
pub const WINNING_TILE: u32 = 2048;

/// A discrete input to [`Session::handle_action()`], one per
/// keypress-equivalent event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move(Direction),
    Undo,
    RandomMove,
    AutoMove,
    Reset,
}

// How a probed move ranks during auto-play: a more open board beats a higher
// score, and the direction itself never influences the ordering.
#[derive(Copy, Clone, Debug)]
struct MoveCandidate {
    empty_cells: i32,
    score: u32,
    direction: Direction,
}

impl PartialEq for MoveCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MoveCandidate {}

impl PartialOrd for MoveCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MoveCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.empty_cells, self.score).cmp(&(other.empty_cells, other.score))
    }
}

/// One complete game: the grid plus score, best merged tile, undo history,
/// terminal flags and the RNG that drives tile seeding.
///
/// All state lives here; there is no ambient/static data. Every operation is
/// synchronous and runs to completion before the next one is accepted.
#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    score: u32,
    max_tile: u32,
    won: bool,
    lost: bool,
    history: History,
    rng: StdRng,
}

impl Session {
    /// Starts a game with two seeded tiles and an entropy-derived RNG seed.
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Starts a game with a fixed RNG seed, for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = Grid::empty();
        grid.reset(&mut rng);
        Session {
            grid,
            score: 0,
            max_tile: 0,
            won: false,
            lost: false,
            history: History::new(),
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The largest tile ever produced by a merge in this game.
    pub fn max_tile(&self) -> u32 {
        self.max_tile
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn lost(&self) -> bool {
        self.lost
    }

    /// Discards the game in progress and starts over: score, best tile,
    /// terminal flags and undo history are cleared, the grid is reseeded.
    pub fn reset(&mut self) {
        self.score = 0;
        self.max_tile = 0;
        self.won = false;
        self.lost = false;
        self.history.clear();
        self.grid.reset(&mut self.rng);
    }

    /// Slides the tiles in the given direction. Returns whether the move was
    /// effective, i.e. changed at least one cell.
    ///
    /// An effective move pushes the pre-move state onto the undo history,
    /// adds merge points to the score and spawns one new tile. A no-op move
    /// leaves grid, score and history untouched.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let before = HistoryEntry {
            grid: self.grid,
            score: self.score,
        };
        let outcome = moves::slide(&mut self.grid, direction);
        if outcome.moved {
            self.history.push(before);
            self.score += outcome.points;
            self.max_tile = self.max_tile.max(outcome.highest_merged);
            self.grid.spawn_tile(&mut self.rng);
        }
        outcome.moved
    }

    /// Restores the most recent snapshot, if any. Undo on an empty history
    /// is silently ignored.
    pub fn undo(&mut self) {
        if let Some(entry) = self.history.pop() {
            self.grid = entry.grid;
            self.score = entry.score;
        }
    }

    /// Applies one of the four directions uniformly at random.
    pub fn random_move(&mut self) {
        if let Some(&direction) = Direction::ALL.choose(&mut self.rng) {
            self.apply_move(direction);
        }
    }

    // Runs a real move (spawn included, so the RNG advances), measures the
    // outcome, then reverts. The local snapshot makes the revert
    // unconditional; the history entry an effective probe pushed is
    // discarded so simulations never pollute the undo stack.
    fn probe(&mut self, direction: Direction) -> MoveCandidate {
        let grid_before = self.grid;
        let score_before = self.score;
        let changed = self.apply_move(direction);
        let candidate = if changed {
            MoveCandidate {
                empty_cells: self.grid.empty_cells().len() as i32,
                score: self.score,
                direction,
            }
        } else {
            MoveCandidate {
                empty_cells: -1,
                score: 0,
                direction,
            }
        };
        if changed {
            self.history.pop();
        }
        self.grid = grid_before;
        self.score = score_before;
        candidate
    }

    /// Greedy one-ply lookahead: probes all four directions, then re-applies
    /// the one that leaves the most empty cells, with the resulting score as
    /// tie-breaker.
    ///
    /// Probing spawns real random tiles before reverting, so two calls from
    /// an identical position need not pick the same direction unless the
    /// session was seeded.
    pub fn auto_move(&mut self) {
        let best = Direction::ALL
            .map(|direction| self.probe(direction))
            .into_iter()
            .max();
        if let Some(candidate) = best {
            self.apply_move(candidate.direction);
        }
    }

    /// The action surface for input layers. Applies the engine operation,
    /// then recomputes the terminal flags.
    ///
    /// Once `won` or `lost` is set, every action except [`Action::Reset`] is
    /// ignored; Reset is always honored.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Reset => {
                self.reset();
                return;
            }
            _ if self.won || self.lost => return,
            Action::Move(direction) => {
                self.apply_move(direction);
            }
            Action::Undo => self.undo(),
            Action::RandomMove => self.random_move(),
            Action::AutoMove => self.auto_move(),
        }
        if self.max_tile >= WINNING_TILE {
            self.won = true;
        }
        self.lost = !self.grid.has_moves();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
