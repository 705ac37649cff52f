//! Static position scoring

use crate::board::{Board, Cell, Player};
use crate::lines::{all_windows, filled_with, windows, Direction, Window};
use crate::{CENTER_COLUMN, HEIGHT, LINE, WIDTH};

pub const CENTER_BONUS: i32 = 3;
pub const FOUR_SCORE: i32 = 100;
pub const THREE_SCORE: i32 = 10;
pub const TWO_SCORE: i32 = 5;
pub const OPPONENT_THREE_PENALTY: i32 = -8;

/// Scores a single window from `player`'s point of view
fn score_window(board: &Board, window: &Window, player: Player) -> i32 {
    let (own, opponent) = (player.cell(), player.other().cell());
    let count = |cell: Cell| {
        window
            .iter()
            .filter(|&&(row, column)| board.get(row, column) == cell)
            .count()
    };
    let (mine, theirs, empty) = (count(own), count(opponent), count(Cell::Empty));

    let mut score = match (mine, empty) {
        (4, _) => FOUR_SCORE,
        (3, 1) => THREE_SCORE,
        (2, 2) => TWO_SCORE,
        _ => 0,
    };
    if theirs == 3 && empty == 1 {
        score += OPPONENT_THREE_PENALTY;
    }
    score
}

/// Heuristic value of `board` for `player`, higher is better
///
/// Sums a bonus for every piece in the centre column with the score of every
/// window of four on the board. The board is scored as given, regardless of
/// how many plies away from the current position it is.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    let center = (0..HEIGHT)
        .filter(|&row| board.get(row, CENTER_COLUMN) == player.cell())
        .count() as i32;

    center * CENTER_BONUS
        + all_windows()
            .map(|window| score_window(board, &window, player))
            .sum::<i32>()
}

/// Cheap single-ply score used by the greedy strategy
///
/// Counts `player`'s pieces within `LINE - 1` cells of (`row`, `column`) along
/// its row and its column, plus one for every completed diagonal line of
/// `player`'s anywhere on the board.
pub fn adjacency_score(board: &Board, row: usize, column: usize, player: Player) -> i32 {
    let cell = player.cell();
    let reach = LINE - 1;

    let across = (column.saturating_sub(reach)..(column + reach + 1).min(WIDTH))
        .filter(|&c| c != column && board.get(row, c) == cell)
        .count();
    let along = (row.saturating_sub(reach)..(row + reach + 1).min(HEIGHT))
        .filter(|&r| r != row && board.get(r, column) == cell)
        .count();
    let diagonals = windows(Direction::Rising)
        .chain(windows(Direction::Falling))
        .filter(|window| filled_with(board, window, cell))
        .count();

    (across + along + diagonals) as i32
}
