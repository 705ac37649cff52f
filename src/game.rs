use anyhow::{anyhow, Result};

use crate::board::{Board, GameState, Player};
use crate::config::EngineConfig;
use crate::selector::{play_automated_move, AutomatedTurn};
use crate::WIDTH;

/// A game in progress: the board plus whose turn it is and the moves so far
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Player,
    moves: Vec<usize>,
    pub state: GameState,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::One,
            moves: Vec::new(),
            state: GameState::Playing,
        }
    }

    /// Replays a string of 1-indexed column digits, e.g. `"4453"`
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut game = Self::new();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    let _ = game.play_checked(column as usize)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player_to_move(&self) -> Player {
        self.to_move
    }

    /// Columns played so far, 0-indexed, in order
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Plays a human move given as a 1-indexed column
    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState> {
        if column_one_indexed < 1 || column_one_indexed > WIDTH {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                WIDTH
            ));
        }
        let column = column_one_indexed - 1;
        if !self.board.is_column_open(column) {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }
        self.play(column)
    }

    /// Plays a 0-indexed column for the side to move
    pub fn play(&mut self, column: usize) -> Result<GameState> {
        if self.state.is_over() {
            return Err(anyhow!("Invalid move, the game is already over"));
        }
        let (_, state) = self.board.apply_move(column, self.to_move)?;
        self.record(column, state);
        Ok(state)
    }

    /// Lets the engine described by `config` play for the side to move
    pub fn play_automated(&mut self, config: &EngineConfig) -> Result<AutomatedTurn> {
        if self.state.is_over() {
            return Err(anyhow!("Invalid move, the game is already over"));
        }
        let turn = play_automated_move(&mut self.board, self.to_move, config)?;
        match turn.column {
            Some(column) => self.record(column, turn.state),
            None => self.state = turn.state,
        }
        Ok(turn)
    }

    fn record(&mut self, column: usize, state: GameState) {
        self.moves.push(column);
        self.state = state;
        self.to_move = self.to_move.other();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
