//! A move-selection engine for playing the board game 'Connect 4'
//!
//! The engine expands the current position into a small game tree, scores
//! the candidate positions with a positional heuristic and picks a column,
//! taking an immediate win or blocking an immediate loss when one exists.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{board::{GameState, Player}, config::EngineConfig, game::Game};
//! use connect4_engine::selector::play_automated_move;
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has three in a row along the bottom
//! let game = Game::from_moves("112233")?;
//! let mut board = *game.board();
//! let turn = play_automated_move(&mut board, Player::One, &EngineConfig::default())?;
//!
//! assert_eq!(turn.column, Some(3));
//! assert_eq!(turn.state, GameState::Win(Player::One));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod lines;

pub mod tree;

pub mod evaluate;

pub mod selector;

pub mod game;

pub mod store;

pub mod config;

pub mod display;

pub mod tournament;

mod test;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of tiles in a line needed to win
pub const LINE: usize = 4;

/// The column holding the centre bonus in the position heuristic
pub const CENTER_COLUMN: usize = WIDTH / 2;

/// The deepest game tree the engine will build, see [`tree::build`]
pub const MAX_SEARCH_DEPTH: usize = 6;

// a line must fit along every direction of the board
const_assert!(LINE <= WIDTH && LINE <= HEIGHT);
// move strings use a single digit per column
const_assert!(WIDTH <= 9);
const_assert!(MAX_SEARCH_DEPTH >= 1);
