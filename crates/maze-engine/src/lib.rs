//! Core maze game engine.
//!
//! Everything with real state, ordering or failure concerns lives here,
//! free of any terminal dependency: the maze model, the per-game session
//! state machine, the efficiency score, the solver service contract with
//! its HTTP and mock backends, and the multi-algorithm benchmark harness.

pub mod benchmark;
pub mod maze;
pub mod score;
pub mod service;
pub mod session;

pub use benchmark::{compare_algorithms, ComparisonRecord, REPORTED_TIME_UNIT_MS};
pub use maze::{Cell, Direction, Maze, Position};
pub use score::compute_score;
pub use service::{
    Algorithm, HttpSolverService, MockSolverService, ServiceConfig, ServiceError, ServiceResult,
    SolveResult, SolverService,
};
pub use session::{Mode, Session};
