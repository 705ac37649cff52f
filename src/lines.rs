//! Line-of-four detection

use crate::board::{Board, Cell, GameState, Player};
use crate::{HEIGHT, LINE, WIDTH};

/// The four directions a line can run in
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// bottom-left to top-right
    Rising,
    /// top-left to bottom-right
    Falling,
}

pub const DIRECTIONS: [Direction; 4] = [
    Direction::Horizontal,
    Direction::Vertical,
    Direction::Rising,
    Direction::Falling,
];

impl Direction {
    // (row step, column step)
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Rising => (1, 1),
            Direction::Falling => (-1, 1),
        }
    }
}

/// `LINE` consecutive cells along one direction, as (row, column) pairs
pub type Window = [(usize, usize); LINE];

/// Every window on the board running in `direction`
pub fn windows(direction: Direction) -> impl Iterator<Item = Window> {
    let (dr, dc) = direction.step();
    // start cells are chosen so the whole window stays on the board
    let rows = match dr {
        0 => 0..HEIGHT,
        1 => 0..HEIGHT - LINE + 1,
        _ => LINE - 1..HEIGHT,
    };
    let columns = match dc {
        0 => 0..WIDTH,
        _ => 0..WIDTH - LINE + 1,
    };
    rows.flat_map(move |row| {
        columns.clone().map(move |column| {
            let mut window = [(0, 0); LINE];
            for (i, cell) in window.iter_mut().enumerate() {
                *cell = (
                    (row as isize + dr * i as isize) as usize,
                    (column as isize + dc * i as isize) as usize,
                );
            }
            window
        })
    })
}

/// Every window on the board, in all four directions
pub fn all_windows() -> impl Iterator<Item = Window> {
    let directions: &'static [Direction] = &DIRECTIONS;
    directions.iter().flat_map(|&direction| windows(direction))
}

/// True if every cell of `window` holds `cell`
pub fn filled_with(board: &Board, window: &Window, cell: Cell) -> bool {
    window.iter().all(|&(row, column)| board.get(row, column) == cell)
}

/// Checks for four `player` tiles in a line after a move at (`row`, `column`)
///
/// Horizontal and vertical lines are only searched through the anchor cell;
/// diagonals are searched over the whole board, which is equivalent as long
/// as this is called straight after every move.
pub fn has_four(board: &Board, row: usize, column: usize, player: Player) -> bool {
    let cell = player.cell();
    windows(Direction::Horizontal)
        .filter(|window| window[0].0 == row)
        .chain(windows(Direction::Vertical).filter(|window| window[0].1 == column))
        .chain(windows(Direction::Rising))
        .chain(windows(Direction::Falling))
        .any(|window| filled_with(board, &window, cell))
}

/// True if there are no empty cells left
pub fn is_draw(board: &Board) -> bool {
    board.count(Cell::Empty) == 0
}

/// State of the game after `player` moved to (`row`, `column`)
pub fn detect_terminal(board: &Board, row: usize, column: usize, player: Player) -> GameState {
    if has_four(board, row, column, player) {
        GameState::Win(player)
    } else if is_draw(board) {
        GameState::Draw
    } else {
        GameState::Playing
    }
}
