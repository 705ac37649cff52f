use thiserror::Error;

use crate::{lines, HEIGHT, WIDTH};

/// One of the two sides of a game. `One` always moves first.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }

    /// 1-based seat number for display
    pub fn number(self) -> usize {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }
}

/// Status of a game after a move has been applied
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Win(Player),
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Playing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Invalid move, column {0} out of range. Columns must be between 0 and {}", WIDTH - 1)]
    InvalidColumn(usize),
    #[error("Invalid move, column {0} full")]
    ColumnFull(usize),
}

/// A 6x7 Connect 4 grid
///
/// Row 0 is the bottom of the board. Pieces only ever land on the lowest
/// empty cell of a column, so the occupied cells of every column form a
/// contiguous run starting at row 0.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// True if `column` is on the board and its top cell is empty
    pub fn is_column_open(&self, column: usize) -> bool {
        column < WIDTH && self.cells[HEIGHT - 1][column].is_empty()
    }

    /// Returns the lowest empty row of `column`
    pub fn drop_row(&self, column: usize) -> Result<usize, MoveError> {
        if column >= WIDTH {
            return Err(MoveError::InvalidColumn(column));
        }
        (0..HEIGHT)
            .find(|&row| self.cells[row][column].is_empty())
            .ok_or(MoveError::ColumnFull(column))
    }

    /// Sets a cell directly. The caller guarantees `row` is the drop row of `column`.
    pub fn place(&mut self, row: usize, column: usize, player: Player) {
        self.cells[row][column] = player.cell();
    }

    /// Empties a cell, undoing a `place` on the top piece of a column
    pub fn clear(&mut self, row: usize, column: usize) {
        self.cells[row][column] = Cell::Empty;
    }

    /// Drops a piece for `player` into `column` and reports the resulting state
    pub fn apply_move(&mut self, column: usize, player: Player) -> Result<(usize, GameState), MoveError> {
        let row = self.drop_row(column)?;
        self.place(row, column, player);
        Ok((row, lines::detect_terminal(self, row, column, player)))
    }

    /// Columns that can still take a piece, left to right
    pub fn open_columns(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.is_column_open(column)).collect()
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    /// Number of pieces in `column`
    pub fn height(&self, column: usize) -> usize {
        (0..HEIGHT)
            .take_while(|&row| !self.cells[row][column].is_empty())
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Free-function form of [`Board::is_column_open`]
pub fn is_column_open(board: &Board, column: usize) -> bool {
    board.is_column_open(column)
}

/// Free-function form of [`Board::apply_move`]
pub fn apply_move(board: &mut Board, column: usize, player: Player) -> Result<(usize, GameState), MoveError> {
    board.apply_move(column, player)
}
