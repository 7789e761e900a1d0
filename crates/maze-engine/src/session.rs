use crate::maze::{Direction, Maze, Position};
use std::time::{Duration, Instant};

/// What the session is currently doing. Movement is only accepted in
/// `Playing`; solver-driven animations and benchmark runs hold the other
/// modes so player input cannot interleave with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Playing,
    Animating,
    Comparing,
}

/// One maze game: the maze plus all mutable per-game state.
///
/// The clock starts lazily on the first accepted move, not on creation,
/// and stops on the winning move or on `reset`.
pub struct Session {
    maze: Maze,
    player: Position,
    /// Cells visited by the player, recorded once each at first visit
    recorded_path: Vec<Position>,
    active: bool,
    start_time: Option<Instant>,
    elapsed: Duration,
    best_known_path_length: Option<usize>,
    mode: Mode,
}

impl Session {
    /// Start a session on a freshly generated maze. The player stands on
    /// the start cell, which is not pre-recorded: user steps are zero
    /// until the first accepted move.
    pub fn new(maze: Maze) -> Self {
        let player = maze.start();
        Self {
            maze,
            player,
            recorded_path: Vec::new(),
            active: true,
            start_time: None,
            elapsed: Duration::ZERO,
            best_known_path_length: None,
            mode: Mode::Playing,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn recorded_path(&self) -> &[Position] {
        &self.recorded_path
    }

    /// Distinct cells visited so far; the denominator of the efficiency score
    pub fn user_steps(&self) -> usize {
        self.recorded_path.len()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn best_path_length(&self) -> Option<usize> {
        self.best_known_path_length
    }

    /// Record the solver's best path length for scoring
    pub fn set_best_path_length(&mut self, len: usize) {
        self.best_known_path_length = Some(len);
    }

    pub fn clock_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Time spent playing so far
    pub fn elapsed(&self) -> Duration {
        match self.start_time {
            Some(started) if self.active => self.elapsed + started.elapsed(),
            _ => self.elapsed,
        }
    }

    /// Format the elapsed time as MM:SS
    pub fn elapsed_string(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Try to move the player one cell. Rejected silently when the game
    /// is over, an animation or comparison holds the session, the move
    /// leaves the grid, or the target cell is a wall.
    ///
    /// On acceptance the destination is recorded once, at first visit;
    /// revisits neither re-append nor reorder.
    pub fn attempt_move(&mut self, direction: Direction) -> bool {
        if !self.active || self.mode != Mode::Playing {
            return false;
        }

        let Some(target) = self.maze.step(self.player, direction) else {
            return false;
        };
        if !self.maze.is_open(target) {
            return false;
        }

        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }

        self.player = target;
        if !self.recorded_path.contains(&target) {
            self.recorded_path.push(target);
        }
        true
    }

    /// True iff the player stands on the goal. The first true observation
    /// ends the game: the clock stops and no further moves are accepted
    /// until `reset` or a new session.
    pub fn check_win(&mut self) -> bool {
        if self.player != self.maze.goal() {
            return false;
        }
        if self.active {
            self.active = false;
            if let Some(started) = self.start_time {
                self.elapsed += started.elapsed();
            }
        }
        true
    }

    /// Back to the start on the same maze: path, clock and best-known
    /// path length cleared, the session accepts moves again.
    pub fn reset(&mut self) {
        self.player = self.maze.start();
        self.recorded_path.clear();
        self.active = true;
        self.start_time = None;
        self.elapsed = Duration::ZERO;
        self.best_known_path_length = None;
        self.mode = Mode::Playing;
    }
}
