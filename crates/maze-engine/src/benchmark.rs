//! Multi-algorithm benchmark harness
//!
//! Runs every algorithm once over the same maze, start to goal, strictly
//! sequentially, and assembles one comparison record per algorithm for
//! the reporting surface.

use crate::maze::Maze;
use crate::service::{Algorithm, ServiceResult, SolverService};
use std::time::Instant;

/// Unit contract with the solver service: self-reported solve times are
/// in seconds, displayed latencies in milliseconds.
pub const REPORTED_TIME_UNIT_MS: f64 = 1000.0;

/// One algorithm's showing in a comparison run
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRecord {
    pub algorithm: Algorithm,
    pub elapsed_ms: f64,
    pub steps_explored: u64,
    pub path_length: u64,
}

/// Query the service once per algorithm in the fixed order, always from
/// the maze's global start to its global goal. Each call is awaited
/// before the next begins; total harness latency is the sum of the six.
///
/// Latency prefers the service's self-reported time when it is a positive
/// number, converted per [`REPORTED_TIME_UNIT_MS`]; otherwise the
/// client-side wall-clock measurement is used. Reported step and path
/// counts default to zero when absent. An algorithm that finds no path
/// still yields a record, with `path_length` 0; a transport or server
/// failure aborts the whole run.
pub fn compare_algorithms(
    service: &dyn SolverService,
    maze: &Maze,
) -> ServiceResult<Vec<ComparisonRecord>> {
    let start = maze.start();
    let goal = maze.goal();

    let mut records = Vec::with_capacity(Algorithm::ALL.len());
    for &algorithm in &Algorithm::ALL {
        let clock = Instant::now();
        let result = service.solve(maze, start, goal, algorithm)?;
        let measured_ms = clock.elapsed().as_secs_f64() * 1000.0;

        let elapsed_ms = match result.time {
            Some(reported) if reported > 0.0 => reported * REPORTED_TIME_UNIT_MS,
            _ => measured_ms,
        };

        records.push(ComparisonRecord {
            algorithm,
            elapsed_ms,
            steps_explored: result.steps.unwrap_or(0),
            path_length: result.path_length.unwrap_or(0),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Position;
    use crate::service::{MockSolverService, ServiceError, SolveResult};

    fn result_with(time: Option<f64>, steps: Option<u64>, path_length: Option<u64>) -> SolveResult {
        SolveResult {
            explored: vec![Position::new(0, 0)],
            path: vec![Position::new(0, 0), Position::new(1, 1)],
            time,
            steps,
            path_length,
        }
    }

    #[test]
    fn test_one_record_per_algorithm_in_order() {
        let service = MockSolverService::new();
        let maze = service.generate_maze(None, None).unwrap();
        for _ in 0..6 {
            service.queue_result(result_with(None, Some(4), Some(2)));
        }

        let records = compare_algorithms(&service, &maze).unwrap();
        assert_eq!(records.len(), 6);
        let order: Vec<Algorithm> = records.iter().map(|r| r.algorithm).collect();
        assert_eq!(order, Algorithm::ALL);
        assert_eq!(service.solve_calls(), Algorithm::ALL);
        assert!(records.iter().all(|r| r.path_length == 2));
    }

    #[test]
    fn test_reported_time_preferred_and_converted() {
        let service = MockSolverService::new();
        let maze = service.generate_maze(None, None).unwrap();
        // First algorithm reports 0.25s, the rest report nothing usable.
        service.queue_result(result_with(Some(0.25), None, None));
        for time in [None, Some(0.0), Some(-1.0), None, None] {
            service.queue_result(result_with(time, None, None));
        }

        let records = compare_algorithms(&service, &maze).unwrap();
        assert_eq!(records[0].elapsed_ms, 250.0);
        // Fallback is the client-side measurement: tiny but non-negative.
        for record in &records[1..] {
            assert!(record.elapsed_ms >= 0.0);
            assert!(record.elapsed_ms < 250.0);
        }
    }

    #[test]
    fn test_missing_counts_default_to_zero() {
        let service = MockSolverService::new();
        let maze = service.generate_maze(None, None).unwrap();
        // Queue left empty: every solve answers "no path" with no counts.
        let records = compare_algorithms(&service, &maze).unwrap();

        assert_eq!(records.len(), 6);
        for record in &records {
            assert_eq!(record.steps_explored, 0);
            assert_eq!(record.path_length, 0);
        }
    }

    #[test]
    fn test_service_failure_aborts_run() {
        let service = MockSolverService::new();
        let maze = service.generate_maze(None, None).unwrap();
        service.set_available(false);

        let result = compare_algorithms(&service, &maze);
        assert!(matches!(result, Err(ServiceError::Unavailable(_))));
    }
}
