use serde::{Deserialize, Serialize};

/// A single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
}

/// A position on the maze grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

// Wire form is a [row, col] pair.
impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Position> for (usize, usize) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

/// A player movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row/column displacement for this direction
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// A rectangular grid of open/wall cells, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    cells: Vec<Vec<Cell>>,
}

impl Maze {
    /// Build a maze from the service's wire form: a 2D array of
    /// 0 (open) / nonzero (wall) integers. Returns `None` when the grid
    /// is empty or ragged; cell values are otherwise taken as-is.
    pub fn from_grid(grid: &[Vec<u8>]) -> Option<Self> {
        let first_len = grid.first()?.len();
        if first_len == 0 || grid.iter().any(|row| row.len() != first_len) {
            return None;
        }

        let cells = grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&v| if v == 0 { Cell::Open } else { Cell::Wall })
                    .collect()
            })
            .collect();

        Some(Self { cells })
    }

    /// The wire form of this maze, for solve requests
    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&c| if c == Cell::Open { 0 } else { 1 })
                    .collect()
            })
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    /// The fixed entry cell
    pub fn start(&self) -> Position {
        Position::new(0, 0)
    }

    /// The fixed exit cell, always the bottom-right corner
    pub fn goal(&self) -> Position {
        Position::new(self.rows() - 1, self.cols() - 1)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows() && pos.col < self.cols()
    }

    pub fn is_open(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.cells[pos.row][pos.col] == Cell::Open
    }

    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// The cell the player would land on moving in `direction`, if it
    /// stays on the grid
    pub fn step(&self, from: Position, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row = from.row as isize + dr;
        let col = from.col as isize + dc;
        if row < 0 || col < 0 {
            return None;
        }
        let pos = Position::new(row as usize, col as usize);
        self.in_bounds(pos).then_some(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_3x3() -> Maze {
        Maze::from_grid(&[vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 0]]).unwrap()
    }

    #[test]
    fn test_from_grid_shape_checks() {
        assert!(Maze::from_grid(&[]).is_none());
        assert!(Maze::from_grid(&[vec![]]).is_none());
        assert!(Maze::from_grid(&[vec![0, 1], vec![0]]).is_none());
        assert!(Maze::from_grid(&[vec![0]]).is_some());
    }

    #[test]
    fn test_derived_anchors() {
        let maze = open_3x3();
        assert_eq!(maze.start(), Position::new(0, 0));
        assert_eq!(maze.goal(), Position::new(2, 2));
        assert_eq!(maze.rows(), 3);
        assert_eq!(maze.cols(), 3);
    }

    #[test]
    fn test_walls_and_bounds() {
        let maze = Maze::from_grid(&[vec![0, 1], vec![0, 0]]).unwrap();
        assert!(maze.is_open(Position::new(0, 0)));
        assert!(!maze.is_open(Position::new(0, 1)));
        assert!(!maze.is_open(Position::new(2, 0)));
        assert_eq!(maze.cell(Position::new(0, 1)), Cell::Wall);
    }

    #[test]
    fn test_step_stays_on_grid() {
        let maze = open_3x3();
        let start = maze.start();
        assert_eq!(maze.step(start, Direction::Up), None);
        assert_eq!(maze.step(start, Direction::Left), None);
        assert_eq!(
            maze.step(start, Direction::Down),
            Some(Position::new(1, 0))
        );
        assert_eq!(maze.step(maze.goal(), Direction::Down), None);
        assert_eq!(maze.step(maze.goal(), Direction::Right), None);
    }

    #[test]
    fn test_wire_round_trip_preserves_walls() {
        let grid = vec![vec![0, 1, 0], vec![1, 0, 1]];
        let maze = Maze::from_grid(&grid).unwrap();
        assert_eq!(maze.to_grid(), grid);
    }

    #[test]
    fn test_position_wire_form() {
        let pos: Position = serde_json::from_str("[3, 7]").unwrap();
        assert_eq!(pos, Position::new(3, 7));
        assert_eq!(serde_json::to_string(&pos).unwrap(), "[3,7]");
    }
}
