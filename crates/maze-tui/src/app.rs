use crate::animations::{HintTrail, SolveSweep};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use crossterm::terminal;
use maze_engine::{
    compare_algorithms, compute_score, Algorithm, ComparisonRecord, Direction, Mode, Session,
    SolverService,
};
use std::time::Duration;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Benchmark results chart
    Comparison,
}

/// Minimum terminal surface needed to draw the comparison chart
pub const MIN_CHART_WIDTH: u16 = 64;
pub const MIN_CHART_HEIGHT: u16 = 14;

/// The main application state
pub struct App {
    /// Service calls run on the event loop thread; the agent's request
    /// timeout bounds how long input can stall, and the session mode
    /// guard keeps state consistent across the call.
    /// TODO: move solve/generate onto a worker thread and drain a
    /// channel from tick() so input keeps flowing during slow requests.
    service: Box<dyn SolverService>,
    /// Current game, absent until the first successful generation
    pub session: Option<Session>,
    /// Algorithm used for solve and hint requests
    pub algorithm: Algorithm,
    pub theme: Theme,
    theme_index: usize,
    pub screen_state: ScreenState,
    /// In-flight solver replay animation
    pub sweep: Option<SolveSweep>,
    /// In-flight hint reveal
    pub hint: Option<HintTrail>,
    /// Records from the last benchmark run
    pub comparison: Option<Vec<ComparisonRecord>>,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Efficiency score of the finished game, if scorable
    pub score: Option<f64>,
    maze_rows: usize,
    maze_cols: usize,
    /// Bumped by generate/reset; stale sweeps abort at the next tick
    epoch: u64,
}

impl App {
    pub fn new(service: Box<dyn SolverService>, maze_rows: usize, maze_cols: usize) -> Self {
        Self {
            service,
            session: None,
            algorithm: Algorithm::AStar,
            theme: Theme::dark(),
            theme_index: 0,
            screen_state: ScreenState::Playing,
            sweep: None,
            hint: None,
            comparison: None,
            message: None,
            message_timer: 0,
            score: None,
            maze_rows,
            maze_cols,
            epoch: 0,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.service.backend_name()
    }

    /// Get the tick rate based on what is on screen
    pub fn tick_rate(&self) -> Duration {
        if self.sweep.is_some() || self.hint.is_some() {
            Duration::from_millis(33) // 30 FPS while a sweep is running
        } else {
            Duration::from_millis(100)
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Request a fresh maze and start a new session on it. On failure the
    /// previous session, if any, is left untouched.
    pub fn generate(&mut self) {
        match self
            .service
            .generate_maze(Some(self.maze_rows), Some(self.maze_cols))
        {
            Ok(maze) => {
                self.epoch += 1;
                self.cancel_animations();
                self.session = Some(Session::new(maze));
                self.comparison = None;
                self.score = None;
                self.screen_state = ScreenState::Playing;
                self.show_message(&format!("New {}x{} maze", self.maze_rows, self.maze_cols));
            }
            Err(e) => self.show_message(&format!("{}", e)),
        }
    }

    pub fn generate_sized(&mut self, rows: usize, cols: usize) {
        self.maze_rows = rows;
        self.maze_cols = cols;
        self.generate();
    }

    /// Back to the start of the current maze
    pub fn reset(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.epoch += 1;
        self.cancel_animations();
        self.score = None;
        if let Some(session) = &mut self.session {
            session.reset();
        }
        self.show_message("Back to the start");
    }

    /// Ask the solver for a path from the player to the goal and replay
    /// its exploration and solution as a sweep animation.
    pub fn solve(&mut self) {
        let outcome = match &self.session {
            Some(session) if session.mode() == Mode::Playing => self.service.solve(
                session.maze(),
                session.player(),
                session.maze().goal(),
                self.algorithm,
            ),
            Some(_) => {
                self.show_message("Hold on, a run is in progress");
                return;
            }
            None => {
                self.show_message("Generate a maze first");
                return;
            }
        };

        match outcome {
            Err(e) => self.show_message(&format!("{}", e)),
            Ok(result) if result.no_path() => self.show_message("No path found from here"),
            Ok(result) => {
                if let Some(session) = &mut self.session {
                    session.set_best_path_length(result.path.len());
                    session.set_mode(Mode::Animating);
                }
                self.sweep = Some(SolveSweep::new(&result, self.epoch));
            }
        }
    }

    /// Reveal the first half of a fresh solution from the player's
    /// current position
    pub fn request_hint(&mut self) {
        let outcome = match &self.session {
            Some(session) if session.mode() == Mode::Playing => self.service.solve(
                session.maze(),
                session.player(),
                session.maze().goal(),
                self.algorithm,
            ),
            Some(_) => {
                self.show_message("Hold on, a run is in progress");
                return;
            }
            None => {
                self.show_message("Generate a maze first");
                return;
            }
        };

        match outcome {
            Err(e) => self.show_message(&format!("{}", e)),
            Ok(result) if result.no_path() => {
                self.show_message("No hint available, no path found")
            }
            Ok(result) => {
                if let Some(session) = &mut self.session {
                    session.set_mode(Mode::Animating);
                }
                self.hint = Some(HintTrail::new(&result.path, self.epoch));
                self.show_message("Hint: follow the orange cells");
            }
        }
    }

    /// Run every algorithm over the current maze and show the chart.
    /// `width`/`height` is the reporting surface available for it.
    pub fn compare_with_surface(&mut self, width: u16, height: u16) {
        let maze = match &self.session {
            Some(session) if session.mode() == Mode::Playing => session.maze().clone(),
            Some(_) => {
                self.show_message("Hold on, a run is in progress");
                return;
            }
            None => {
                self.show_message("Generate a maze first");
                return;
            }
        };

        if width < MIN_CHART_WIDTH || height < MIN_CHART_HEIGHT {
            self.show_message("Terminal too small for the comparison chart");
            return;
        }

        if let Some(session) = &mut self.session {
            session.set_mode(Mode::Comparing);
        }
        let outcome = compare_algorithms(self.service.as_ref(), &maze);
        if let Some(session) = &mut self.session {
            session.set_mode(Mode::Playing);
        }

        match outcome {
            Ok(records) => {
                self.comparison = Some(records);
                self.screen_state = ScreenState::Comparison;
            }
            Err(e) => self.show_message(&format!("{}", e)),
        }
    }

    /// Update animations and timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        // A finished or stale sweep is dropped one tick after its last
        // cell was painted, which is the final base-frame redraw.
        if let Some(mut sweep) = self.sweep.take() {
            if sweep.epoch() == self.epoch && !sweep.is_done() {
                sweep.update();
                self.sweep = Some(sweep);
            }
        }
        if let Some(mut hint) = self.hint.take() {
            if hint.epoch() == self.epoch && !hint.is_done() {
                hint.update();
                self.hint = Some(hint);
            }
        }

        if self.sweep.is_none() && self.hint.is_none() {
            if let Some(session) = &mut self.session {
                if session.mode() == Mode::Animating {
                    session.set_mode(Mode::Playing);
                }
            }
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Comparison => self.handle_comparison_key(key),
            ScreenState::Playing => self.handle_game_key(key),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            // Movement
            KeyCode::Up | KeyCode::Char('w') => self.try_move(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') => self.try_move(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') => self.try_move(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') => self.try_move(Direction::Right),

            // Solver actions
            KeyCode::Char('h') => self.request_hint(),
            KeyCode::Enter => self.solve(),
            KeyCode::Char('c') => {
                let (width, height) = terminal::size().unwrap_or((80, 24));
                self.compare_with_surface(width, height);
            }
            KeyCode::Tab => {
                self.algorithm = self.algorithm.next();
                self.show_message(&format!("Algorithm: {}", self.algorithm));
            }

            // Maze lifecycle
            KeyCode::Char('g') => self.generate(),
            KeyCode::Char('1') => self.generate_sized(10, 15),
            KeyCode::Char('2') => self.generate_sized(25, 35),
            KeyCode::Char('3') => self.generate_sized(40, 50),
            KeyCode::Char('r') => self.reset(),

            KeyCode::Char('t') => self.cycle_theme(),

            _ => {}
        }
        AppAction::Continue
    }

    fn handle_comparison_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('c') => {
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn try_move(&mut self, direction: Direction) {
        let Some(session) = &mut self.session else {
            return;
        };
        if !session.attempt_move(direction) {
            // Out of bounds, wall, game over or animation in progress:
            // rejected silently.
            return;
        }
        if session.check_win() {
            let score = compute_score(session.best_path_length(), session.user_steps());
            self.score = score;
            match score {
                Some(score) => {
                    self.show_message(&format!("You solved the maze! Score: {:.1}", score))
                }
                None => self.show_message("You solved the maze!"),
            }
        }
    }

    fn cycle_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % 3;
        self.theme = match self.theme_index {
            0 => Theme::dark(),
            1 => Theme::light(),
            _ => Theme::high_contrast(),
        };
    }

    fn cancel_animations(&mut self) {
        self.sweep = None;
        self.hint = None;
        if let Some(session) = &mut self.session {
            if session.mode() == Mode::Animating {
                session.set_mode(Mode::Playing);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use maze_engine::{MockSolverService, Position, SolveResult};
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn best_path_3x3() -> Vec<Position> {
        vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(0, 2),
            Position::new(1, 2),
            Position::new(2, 2),
        ]
    }

    fn app_with_mock() -> (App, Arc<MockSolverService>) {
        let mock = Arc::new(MockSolverService::new());
        let mut app = App::new(Box::new(mock.clone()), 3, 3);
        app.generate();
        (app, mock)
    }

    #[test]
    fn test_generate_creates_session() {
        let (app, _mock) = app_with_mock();
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.maze().rows(), 3);
        assert_eq!(session.player(), Position::new(0, 0));
        assert_eq!(app.screen_state, ScreenState::Playing);
    }

    #[test]
    fn test_generate_failure_keeps_previous_session() {
        let (mut app, mock) = app_with_mock();
        app.handle_key(key(KeyCode::Right));

        mock.set_available(false);
        app.generate();

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.player(), Position::new(0, 1));
        assert!(app.message.as_deref().unwrap().contains("unavailable"));
    }

    #[test]
    fn test_arrow_keys_move_the_player() {
        let (mut app, _mock) = app_with_mock();
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char('a')));
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.player(), Position::new(1, 0));
        assert_eq!(session.user_steps(), 3);
    }

    #[test]
    fn test_walk_to_win_scores_against_best_path() {
        let (mut app, mock) = app_with_mock();
        mock.queue_result(SolveResult {
            explored: best_path_3x3(),
            path: best_path_3x3(),
            ..SolveResult::default()
        });

        app.solve();
        assert!(app.sweep.is_some());
        while app.sweep.is_some() {
            app.tick();
        }

        for code in [KeyCode::Right, KeyCode::Right, KeyCode::Down, KeyCode::Down] {
            app.handle_key(key(code));
        }

        let session = app.session.as_ref().unwrap();
        assert!(!session.is_active());
        // best 5 vs 4 distinct cells: clamped at 100.
        assert_eq!(app.score, Some(100.0));
    }

    #[test]
    fn test_solve_no_path_leaves_best_unchanged() {
        let (mut app, _mock) = app_with_mock();
        // Queue left empty: the mock answers "no path".
        app.solve();

        assert!(app.sweep.is_none());
        assert_eq!(app.session.as_ref().unwrap().best_path_length(), None);
        assert!(app.message.as_deref().unwrap().contains("No path"));
    }

    #[test]
    fn test_movement_ignored_while_animating() {
        let (mut app, mock) = app_with_mock();
        mock.queue_result(SolveResult {
            explored: best_path_3x3(),
            path: best_path_3x3(),
            ..SolveResult::default()
        });

        app.solve();
        assert_eq!(app.session.as_ref().unwrap().mode(), Mode::Animating);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.session.as_ref().unwrap().player(), Position::new(0, 0));

        while app.sweep.is_some() {
            app.tick();
        }
        assert_eq!(app.session.as_ref().unwrap().mode(), Mode::Playing);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.session.as_ref().unwrap().player(), Position::new(0, 1));
    }

    #[test]
    fn test_generate_cancels_stale_sweep() {
        let (mut app, mock) = app_with_mock();
        mock.queue_result(SolveResult {
            explored: best_path_3x3(),
            path: best_path_3x3(),
            ..SolveResult::default()
        });

        app.solve();
        assert!(app.sweep.is_some());
        app.generate();

        assert!(app.sweep.is_none());
        assert_eq!(app.session.as_ref().unwrap().mode(), Mode::Playing);
    }

    #[test]
    fn test_hint_reveals_half_the_path() {
        let (mut app, mock) = app_with_mock();
        mock.queue_result(SolveResult {
            path: best_path_3x3(),
            ..SolveResult::default()
        });

        app.request_hint();
        let hint = app.hint.as_ref().unwrap();
        assert!(hint.cells().is_empty());

        for _ in 0..10 {
            app.tick();
        }
        // floor(5 / 2) = 2 cells revealed, no more.
        assert_eq!(app.hint.as_ref().unwrap().cells().len(), 2);
    }

    #[test]
    fn test_compare_needs_a_big_enough_surface() {
        let (mut app, _mock) = app_with_mock();
        app.compare_with_surface(40, 10);

        assert!(app.comparison.is_none());
        assert_eq!(app.screen_state, ScreenState::Playing);
        assert!(app.message.as_deref().unwrap().contains("too small"));
    }

    #[test]
    fn test_compare_builds_six_records() {
        let (mut app, mock) = app_with_mock();
        for _ in 0..6 {
            mock.queue_result(SolveResult {
                path: best_path_3x3(),
                path_length: Some(5),
                ..SolveResult::default()
            });
        }

        app.compare_with_surface(80, 24);

        assert_eq!(app.screen_state, ScreenState::Comparison);
        let records = app.comparison.as_ref().unwrap();
        assert_eq!(records.len(), 6);
        assert!(records.iter().all(|r| r.path_length == 5));
        // Benchmarks always run start-to-goal from the global corners.
        assert_eq!(app.session.as_ref().unwrap().mode(), Mode::Playing);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen_state, ScreenState::Playing);
    }

    #[test]
    fn test_solver_actions_need_a_maze() {
        let mock = Arc::new(MockSolverService::new());
        mock.set_available(false);
        let mut app = App::new(Box::new(mock), 3, 3);
        app.generate();
        assert!(app.session.is_none());

        app.solve();
        assert!(app.message.as_deref().unwrap().contains("Generate a maze"));
        app.request_hint();
        assert!(app.message.as_deref().unwrap().contains("Generate a maze"));
        app.compare_with_surface(80, 24);
        assert!(app.message.as_deref().unwrap().contains("Generate a maze"));
    }

    #[test]
    fn test_tab_cycles_algorithm() {
        let (mut app, _mock) = app_with_mock();
        assert_eq!(app.algorithm, Algorithm::AStar);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.algorithm, Algorithm::Bfs);
    }
}
