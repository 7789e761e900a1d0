//! Solver service abstraction
//!
//! The maze generator and the pathfinding algorithms live behind a
//! request/response boundary. This module defines the contract the game
//! expects from that service and two backends:
//! - Http: the real JSON-over-HTTP service
//! - Mock: in-memory scripted backend for testing

use crate::maze::{Maze, Position};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// The fixed algorithm set the service understands, in benchmark order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    Greedy,
    Bidirectional,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::Greedy,
        Algorithm::Bidirectional,
        Algorithm::AStar,
    ];

    /// Name used on the wire
    pub fn wire_name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Greedy => "greedy",
            Algorithm::Bidirectional => "bidirectional",
            Algorithm::AStar => "astar",
        }
    }

    /// The next algorithm in the fixed order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name().to_uppercase())
    }
}

/// One solver response: exploration order, the path (empty when the goal
/// is unreachable) and the service's optional self-reported metrics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolveResult {
    #[serde(default)]
    pub explored: Vec<Position>,
    #[serde(default)]
    pub path: Vec<Position>,
    /// Reported solve time; the unit contract is seconds
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default)]
    pub steps: Option<u64>,
    #[serde(default)]
    pub path_length: Option<u64>,
}

impl SolveResult {
    /// An empty path is the service's normal "unreachable" outcome
    pub fn no_path(&self) -> bool {
        self.path.is_empty()
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that can occur talking to the solver service
#[derive(Debug, Clone)]
pub enum ServiceError {
    /// Connection refused, timed out, or otherwise unreachable
    Unavailable(String),
    /// The service answered with an error status
    Server(String),
    /// The service answered with a payload we cannot use
    InvalidResponse(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(e) => write!(f, "Solver unavailable: {}", e),
            Self::Server(e) => write!(f, "Solver error: {}", e),
            Self::InvalidResponse(e) => write!(f, "Invalid solver response: {}", e),
        }
    }
}

/// Trait for solver service backends
pub trait SolverService: Send + Sync {
    /// Request a fresh maze; rows/cols are optional sizing hints
    fn generate_maze(&self, rows: Option<usize>, cols: Option<usize>) -> ServiceResult<Maze>;

    /// Run one named algorithm over the maze from `start` to `end`
    fn solve(
        &self,
        maze: &Maze,
        start: Position,
        end: Position,
        algorithm: Algorithm,
    ) -> ServiceResult<SolveResult>;

    /// Get backend name for display
    fn backend_name(&self) -> &'static str;
}

// Shared handles delegate, so callers can keep a reference to a backend
// they have already handed to the app.
impl<T: SolverService + ?Sized> SolverService for std::sync::Arc<T> {
    fn generate_maze(&self, rows: Option<usize>, cols: Option<usize>) -> ServiceResult<Maze> {
        (**self).generate_maze(rows, cols)
    }

    fn solve(
        &self,
        maze: &Maze,
        start: Position,
        end: Position,
        algorithm: Algorithm,
    ) -> ServiceResult<SolveResult> {
        (**self).solve(maze, start, end, algorithm)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

// ==================== HTTP Backend ====================

/// Configuration for the HTTP backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ServiceConfig {
    /// Read the base URL from MAZE_SOLVER_URL, defaulting otherwise
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("MAZE_SOLVER_URL") {
            config.base_url = url;
        }
        config
    }
}

/// JSON-over-HTTP solver service client.
///
/// Every request carries an explicit timeout; a hung service surfaces as
/// `ServiceError::Unavailable` instead of hanging the UI.
pub struct HttpSolverService {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpSolverService {
    pub fn new(config: ServiceConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn map_err(err: ureq::Error) -> ServiceError {
        match err {
            ureq::Error::Status(code, _) => ServiceError::Server(format!("HTTP {}", code)),
            ureq::Error::Transport(t) => ServiceError::Unavailable(t.to_string()),
        }
    }
}

impl SolverService for HttpSolverService {
    fn generate_maze(&self, rows: Option<usize>, cols: Option<usize>) -> ServiceResult<Maze> {
        let mut request = self.agent.get(&format!("{}/generate", self.base_url));
        if let Some(rows) = rows {
            request = request.query("rows", &rows.to_string());
        }
        if let Some(cols) = cols {
            request = request.query("cols", &cols.to_string());
        }

        let grid: Vec<Vec<u8>> = request
            .call()
            .map_err(Self::map_err)?
            .into_json()
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

        Maze::from_grid(&grid)
            .ok_or_else(|| ServiceError::InvalidResponse("empty or ragged maze grid".to_string()))
    }

    fn solve(
        &self,
        maze: &Maze,
        start: Position,
        end: Position,
        algorithm: Algorithm,
    ) -> ServiceResult<SolveResult> {
        #[derive(Serialize)]
        struct SolveRequest<'a> {
            maze: Vec<Vec<u8>>,
            start: Position,
            end: Position,
            algo: &'a str,
        }

        let response = self
            .agent
            .post(&format!("{}/solve", self.base_url))
            .send_json(&SolveRequest {
                maze: maze.to_grid(),
                start,
                end,
                algo: algorithm.wire_name(),
            })
            .map_err(Self::map_err)?;

        response
            .into_json()
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "HTTP"
    }
}

// ==================== Mock Backend for Testing ====================

/// In-memory scripted solver service for testing
pub struct MockSolverService {
    grid: Mutex<Vec<Vec<u8>>>,
    results: Mutex<VecDeque<SolveResult>>,
    solve_calls: Mutex<Vec<Algorithm>>,
    available: Mutex<bool>,
}

impl MockSolverService {
    pub fn new() -> Self {
        Self {
            grid: Mutex::new(vec![vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 0]]),
            results: Mutex::new(VecDeque::new()),
            solve_calls: Mutex::new(Vec::new()),
            available: Mutex::new(true),
        }
    }

    /// Set the grid returned by `generate_maze`
    pub fn set_maze(&self, grid: Vec<Vec<u8>>) {
        *self.grid.lock().unwrap() = grid;
    }

    /// Queue a scripted solve result; `solve` pops them in order and
    /// answers "no path" once the queue is empty
    pub fn queue_result(&self, result: SolveResult) {
        self.results.lock().unwrap().push_back(result);
    }

    /// Algorithms passed to `solve`, in call order
    pub fn solve_calls(&self) -> Vec<Algorithm> {
        self.solve_calls.lock().unwrap().clone()
    }

    /// Set whether the backend should answer at all
    pub fn set_available(&self, available: bool) {
        *self.available.lock().unwrap() = available;
    }
}

impl Default for MockSolverService {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for MockSolverService {
    fn generate_maze(&self, _rows: Option<usize>, _cols: Option<usize>) -> ServiceResult<Maze> {
        if !*self.available.lock().unwrap() {
            return Err(ServiceError::Unavailable("mock unavailable".to_string()));
        }

        Maze::from_grid(&self.grid.lock().unwrap())
            .ok_or_else(|| ServiceError::InvalidResponse("empty or ragged maze grid".to_string()))
    }

    fn solve(
        &self,
        _maze: &Maze,
        _start: Position,
        _end: Position,
        algorithm: Algorithm,
    ) -> ServiceResult<SolveResult> {
        if !*self.available.lock().unwrap() {
            return Err(ServiceError::Unavailable("mock unavailable".to_string()));
        }

        self.solve_calls.lock().unwrap().push(algorithm);
        Ok(self
            .results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    fn backend_name(&self) -> &'static str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Position;

    #[test]
    fn test_algorithm_wire_names_in_fixed_order() {
        let names: Vec<&str> = Algorithm::ALL.iter().map(|a| a.wire_name()).collect();
        assert_eq!(
            names,
            ["bfs", "dfs", "dijkstra", "greedy", "bidirectional", "astar"]
        );
    }

    #[test]
    fn test_algorithm_cycle_wraps() {
        let mut algorithm = Algorithm::Bfs;
        for _ in 0..Algorithm::ALL.len() {
            algorithm = algorithm.next();
        }
        assert_eq!(algorithm, Algorithm::Bfs);
    }

    #[test]
    fn test_solve_result_wire_form() {
        // The reference service omits time/steps/path_length entirely.
        let json = r#"{"explored": [[0,0],[0,1]], "path": [[0,0],[0,1],[1,1]]}"#;
        let result: SolveResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.explored.len(), 2);
        assert_eq!(result.path[2], Position::new(1, 1));
        assert_eq!(result.time, None);
        assert_eq!(result.steps, None);
        assert!(!result.no_path());

        let empty: SolveResult = serde_json::from_str(r#"{"explored": [], "path": []}"#).unwrap();
        assert!(empty.no_path());
    }

    #[test]
    fn test_mock_backend_scripted_results() {
        let service = MockSolverService::new();
        let maze = service.generate_maze(None, None).unwrap();
        assert_eq!(maze.rows(), 3);

        service.queue_result(SolveResult {
            path: vec![Position::new(0, 0), Position::new(0, 1)],
            ..SolveResult::default()
        });

        let first = service
            .solve(&maze, maze.start(), maze.goal(), Algorithm::Bfs)
            .unwrap();
        assert_eq!(first.path.len(), 2);

        // Queue exhausted: no path.
        let second = service
            .solve(&maze, maze.start(), maze.goal(), Algorithm::AStar)
            .unwrap();
        assert!(second.no_path());

        assert_eq!(service.solve_calls(), [Algorithm::Bfs, Algorithm::AStar]);
    }

    #[test]
    fn test_mock_unavailable() {
        let service = MockSolverService::new();
        service.set_available(false);

        let result = service.generate_maze(None, None);
        assert!(matches!(result, Err(ServiceError::Unavailable(_))));
    }

    #[test]
    fn test_config_default() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.timeout_secs, 10);
    }
}
