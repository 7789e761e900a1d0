//! Tick-driven overlay sweeps replaying a solver result.
//!
//! The sweeps never block: each event-loop tick advances them a fixed
//! amount and the renderer paints whatever prefix is currently shown, so
//! key polling keeps interleaving with the replay. Each sweep carries the
//! session epoch it was started under; a bumped epoch (new maze, reset)
//! aborts it at the next tick instead of racing the new state.

use maze_engine::{Position, SolveResult};

/// Cells revealed per tick during the exploration phase
const EXPLORE_CELLS_PER_TICK: usize = 5;
/// Ticks separating the exploration phase from the path reveal
const PAUSE_TICKS: u32 = 3;
/// Ticks a fully revealed hint stays on screen before the base frame
/// is restored
const HINT_LINGER_TICKS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Exploring,
    Pausing(u32),
    Revealing,
    Done,
}

/// Replays a solve: all explored cells first, a short pause, then the
/// final path, one cell per tick. Phases are strictly sequential; the
/// reveal never starts before every exploration cell is shown.
pub struct SolveSweep {
    explored: Vec<Position>,
    path: Vec<Position>,
    explored_shown: usize,
    path_shown: usize,
    phase: Phase,
    epoch: u64,
}

impl SolveSweep {
    pub fn new(result: &SolveResult, epoch: u64) -> Self {
        Self {
            explored: result.explored.clone(),
            path: result.path.clone(),
            explored_shown: 0,
            path_shown: 0,
            phase: Phase::Exploring,
            epoch,
        }
    }

    /// The session epoch this sweep belongs to
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Advance one tick
    pub fn update(&mut self) {
        match self.phase {
            Phase::Exploring => {
                self.explored_shown =
                    (self.explored_shown + EXPLORE_CELLS_PER_TICK).min(self.explored.len());
                if self.explored_shown == self.explored.len() {
                    self.phase = Phase::Pausing(PAUSE_TICKS);
                }
            }
            Phase::Pausing(0) => {
                self.phase = Phase::Revealing;
            }
            Phase::Pausing(remaining) => {
                self.phase = Phase::Pausing(remaining - 1);
            }
            Phase::Revealing => {
                self.path_shown = (self.path_shown + 1).min(self.path.len());
                if self.path_shown == self.path.len() {
                    self.phase = Phase::Done;
                }
            }
            Phase::Done => {}
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Exploration cells painted so far
    pub fn explored_cells(&self) -> &[Position] {
        &self.explored[..self.explored_shown]
    }

    /// Path cells painted so far
    pub fn path_cells(&self) -> &[Position] {
        &self.path[..self.path_shown]
    }
}

/// Reveals the first half of a solution path, one cell per tick, lingers
/// briefly, then the overlay disappears and the base frame is back.
pub struct HintTrail {
    cells: Vec<Position>,
    shown: usize,
    linger: u32,
    epoch: u64,
}

impl HintTrail {
    /// Takes `floor(path_len / 2)` cells off the front of the full path
    pub fn new(path: &[Position], epoch: u64) -> Self {
        let half = path.len() / 2;
        Self {
            cells: path[..half].to_vec(),
            shown: 0,
            linger: HINT_LINGER_TICKS,
            epoch,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn update(&mut self) {
        if self.shown < self.cells.len() {
            self.shown += 1;
        } else if self.linger > 0 {
            self.linger -= 1;
        }
    }

    pub fn is_done(&self) -> bool {
        self.shown == self.cells.len() && self.linger == 0
    }

    /// Hint cells painted so far
    pub fn cells(&self) -> &[Position] {
        &self.cells[..self.shown]
    }
}
