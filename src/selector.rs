//! Move selection for the computer player
//!
//! Two strategies share the [`Strategy`] interface:
//!
//! * [`TacticalHeuristic`] expands the position one ply (or more, see
//!   [`ScoreBackup`]), takes an immediate win, otherwise blocks an immediate
//!   loss, otherwise picks the column whose resulting position scores best
//!   under [`evaluate`].
//! * [`Greedy`] scores single trial placements by the pieces around them.
//!
//! Ties always go to the leftmost column.

use log::{debug, trace};

use crate::board::{Board, GameState, MoveError, Player};
use crate::config::{EngineConfig, ScoreBackup, StrategyKind};
use crate::evaluate::{adjacency_score, evaluate};
use crate::lines::has_four;
use crate::tree;

/// Why a column was picked
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Reason {
    /// The move completes a line
    Win,
    /// The opponent would complete a line in this column
    Block,
    /// Best heuristic score
    Score,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Decision {
    pub column: usize,
    pub score: i32,
    pub reason: Reason,
}

/// A way of choosing the computer's next column
pub trait Strategy {
    fn name(&self) -> &str;

    /// Picks a column for `automated` without touching `board`
    ///
    /// Returns `None` only when every column is full.
    fn decide(&self, board: &Board, automated: Player, opponent: Player) -> Option<Decision>;
}

/// Keeps the first strictly greater score seen, so ties go to the leftmost column
fn keep_best(best: &mut Option<Decision>, column: usize, score: i32) {
    if best.map_or(true, |current| score > current.score) {
        *best = Some(Decision {
            column,
            score,
            reason: Reason::Score,
        });
    }
}

pub struct TacticalHeuristic {
    depth: usize,
    backup: ScoreBackup,
}

impl TacticalHeuristic {
    pub fn new(depth: usize, backup: ScoreBackup) -> Self {
        Self { depth, backup }
    }

    /// First depth-1 position, left to right, where `automated` has just completed a line
    fn immediate_win<'a>(
        board: &Board,
        root: &'a tree::GameTreeNode,
        automated: Player,
    ) -> Option<&'a tree::GameTreeNode> {
        root.children.iter().find(|child| match child.column {
            // the child's piece sits on the parent's drop row
            Some(column) => board
                .drop_row(column)
                .map_or(false, |row| has_four(&child.board, row, column, automated)),
            None => false,
        })
    }

    fn block(board: &Board, opponent: Player) -> Option<usize> {
        board.open_columns().into_iter().find(|&column| {
            let mut trial = *board;
            match trial.drop_row(column) {
                Ok(row) => {
                    trial.place(row, column, opponent);
                    has_four(&trial, row, column, opponent)
                }
                Err(_) => false,
            }
        })
    }
}

impl Strategy for TacticalHeuristic {
    fn name(&self) -> &str {
        "tactical"
    }

    fn decide(&self, board: &Board, automated: Player, opponent: Player) -> Option<Decision> {
        debug_assert_eq!(opponent, automated.other());

        // scoring depth-1 positions directly makes any deeper level dead weight
        let depth = match self.backup {
            ScoreBackup::Immediate => 1,
            ScoreBackup::Minimax => crate::config::clamp_depth(self.depth),
        };
        let mut root = tree::build(board, depth, automated);
        trace!("built tree of depth {} with {} nodes", depth, root.node_count());

        if root.children.is_empty() {
            return None;
        }

        if let Some(child) = Self::immediate_win(board, &root, automated) {
            return child.column.map(|column| Decision {
                column,
                score: evaluate(&child.board, automated),
                reason: Reason::Win,
            });
        }

        if let Some(column) = Self::block(board, opponent) {
            return Some(Decision {
                column,
                score: 0,
                reason: Reason::Block,
            });
        }

        match self.backup {
            ScoreBackup::Immediate => {
                for child in root.children.iter_mut() {
                    child.score = evaluate(&child.board, automated);
                }
            }
            ScoreBackup::Minimax => {
                root.back_up(automated, automated);
            }
        }

        let mut best = None;
        for child in &root.children {
            if let Some(column) = child.column {
                trace!("column {} scores {}", column, child.score);
                keep_best(&mut best, column, child.score);
            }
        }
        best
    }
}

/// Single-ply strategy scoring each trial placement with [`adjacency_score`]
pub struct Greedy;

impl Strategy for Greedy {
    fn name(&self) -> &str {
        "greedy"
    }

    fn decide(&self, board: &Board, automated: Player, _opponent: Player) -> Option<Decision> {
        // one scratch board, each trial placement is undone before the next
        let mut scratch = *board;
        let mut best = None;
        for column in board.open_columns() {
            if let Ok(row) = scratch.drop_row(column) {
                scratch.place(row, column, automated);
                let score = adjacency_score(&scratch, row, column, automated);
                scratch.clear(row, column);
                trace!("column {} scores {}", column, score);
                keep_best(&mut best, column, score);
            }
        }
        best
    }
}

/// Builds the strategy named by `config`
pub fn strategy_for(config: &EngineConfig) -> Box<dyn Strategy + Send + Sync> {
    match config.strategy {
        StrategyKind::TacticalHeuristic => Box::new(TacticalHeuristic::new(config.search_depth, config.backup)),
        StrategyKind::Greedy => Box::new(Greedy),
    }
}

/// Chooses a column for `automated` without changing `board`
///
/// Returns `None` only when every column is full.
pub fn select_automated_move(
    board: &Board,
    automated: Player,
    opponent: Player,
    search_depth: usize,
    strategy: StrategyKind,
) -> Option<usize> {
    let config = EngineConfig {
        strategy,
        search_depth,
        ..EngineConfig::default()
    };
    strategy_for(&config)
        .decide(board, automated, opponent)
        .map(|decision| decision.column)
}

/// The result of one computer turn
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct AutomatedTurn {
    /// `None` if the board was already full
    pub column: Option<usize>,
    pub row: Option<usize>,
    pub reason: Option<Reason>,
    pub state: GameState,
}

/// Chooses a move for `automated` and commits it to `board`
///
/// A full board is reported as a draw and left untouched.
pub fn play_automated_move(
    board: &mut Board,
    automated: Player,
    config: &EngineConfig,
) -> Result<AutomatedTurn, MoveError> {
    let strategy = strategy_for(config);
    match strategy.decide(board, automated, automated.other()) {
        Some(decision) => {
            let (row, state) = board.apply_move(decision.column, automated)?;
            debug!(
                "{} strategy played column {} ({:?}, score {}) -> {:?}",
                strategy.name(),
                decision.column,
                decision.reason,
                decision.score,
                state
            );
            Ok(AutomatedTurn {
                column: Some(decision.column),
                row: Some(row),
                reason: Some(decision.reason),
                state,
            })
        }
        None => {
            debug!("{} strategy found no open column", strategy.name());
            Ok(AutomatedTurn {
                column: None,
                row: None,
                reason: None,
                state: GameState::Draw,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::WIDTH;

    const DRAWN_GAME: &str = "656173566152215676422337377473141445425321";

    #[test]
    fn win_beats_block() -> anyhow::Result<()> {
        // player one: row 0 columns 0-2, player two: column 6 rows 0-2
        let game = Game::from_moves("172737")?;
        let decision = TacticalHeuristic::new(3, ScoreBackup::Immediate)
            .decide(game.board(), Player::One, Player::Two)
            .unwrap();
        assert_eq!(decision.column, 3);
        assert_eq!(decision.reason, Reason::Win);
        Ok(())
    }

    #[test]
    fn blocks_an_open_three() -> anyhow::Result<()> {
        let game = Game::from_moves("17273")?;
        let decision = TacticalHeuristic::new(3, ScoreBackup::Immediate)
            .decide(game.board(), Player::Two, Player::One)
            .unwrap();
        assert_eq!(decision.column, 3);
        assert_eq!(decision.reason, Reason::Block);
        Ok(())
    }

    #[test]
    fn blocks_a_vertical_three() -> anyhow::Result<()> {
        // player one stacks column 2, player two scatters
        let game = Game::from_moves("21272")?;
        let column = select_automated_move(game.board(), Player::Two, Player::One, 3, StrategyKind::TacticalHeuristic);
        assert_eq!(column, Some(1));
        Ok(())
    }

    #[test]
    fn heuristic_prefers_the_centre_on_an_empty_board() {
        let decision = TacticalHeuristic::new(3, ScoreBackup::Immediate)
            .decide(&Board::new(), Player::One, Player::Two)
            .unwrap();
        assert_eq!(decision.column, 3);
        assert_eq!(decision.reason, Reason::Score);
        assert_eq!(decision.score, 3);
    }

    #[test]
    fn ties_go_to_the_leftmost_column() -> anyhow::Result<()> {
        // a filled centre column keeps the position mirror symmetric
        let game = Game::from_moves("444444")?;
        let board = game.board();

        let scores: Vec<Option<i32>> = (0..WIDTH)
            .map(|column| {
                let mut child = *board;
                child.apply_move(column, Player::One).ok().map(|_| evaluate(&child, Player::One))
            })
            .collect();
        let best = scores.iter().flatten().max().copied();
        let first_best = scores.iter().position(|&score| score == best && best.is_some());

        let column = select_automated_move(board, Player::One, Player::Two, 3, StrategyKind::TacticalHeuristic);
        assert_eq!(column, first_best);
        assert!(column.unwrap() < 3);
        for _ in 0..5 {
            assert_eq!(
                select_automated_move(board, Player::One, Player::Two, 3, StrategyKind::TacticalHeuristic),
                column
            );
        }
        Ok(())
    }

    #[test]
    fn never_picks_a_full_column() -> anyhow::Result<()> {
        let game = Game::from_moves("444444333333")?;
        for &strategy in &[StrategyKind::TacticalHeuristic, StrategyKind::Greedy] {
            let column = select_automated_move(game.board(), Player::One, Player::Two, 2, strategy).unwrap();
            assert!(game.board().is_column_open(column));
        }
        Ok(())
    }

    #[test]
    fn full_board_is_a_draw_without_placement() -> anyhow::Result<()> {
        let game = Game::from_moves(DRAWN_GAME)?;
        let mut board = *game.board();
        let before = board;

        for &strategy in &[StrategyKind::TacticalHeuristic, StrategyKind::Greedy] {
            assert_eq!(select_automated_move(&board, Player::One, Player::Two, 3, strategy), None);
            let config = EngineConfig {
                strategy,
                ..EngineConfig::default()
            };
            let turn = play_automated_move(&mut board, Player::One, &config)?;
            assert_eq!(turn.column, None);
            assert_eq!(turn.state, GameState::Draw);
            assert_eq!(board, before);
        }
        Ok(())
    }

    #[test]
    fn selection_does_not_touch_the_board() -> anyhow::Result<()> {
        let game = Game::from_moves("4453")?;
        let board = *game.board();
        for &strategy in &[StrategyKind::TacticalHeuristic, StrategyKind::Greedy] {
            let _ = select_automated_move(&board, Player::One, Player::Two, 4, strategy);
        }
        assert_eq!(&board, game.board());
        Ok(())
    }

    #[test]
    fn greedy_ties_go_left() {
        assert_eq!(
            Greedy.decide(&Board::new(), Player::One, Player::Two),
            Some(Decision {
                column: 0,
                score: 0,
                reason: Reason::Score,
            })
        );
    }

    #[test]
    fn greedy_builds_next_to_its_own_pieces() -> anyhow::Result<()> {
        // player one on columns 1 and 3 along the bottom, player two on 7
        let game = Game::from_moves("1737")?;
        let decision = Greedy.decide(game.board(), Player::One, Player::Two).unwrap();
        // columns 2 and 4 both see two neighbours in the bottom row
        assert_eq!(decision.column, 1);
        assert_eq!(decision.score, 2);
        Ok(())
    }

    #[test]
    fn minimax_backup_matches_immediate_at_depth_one() -> anyhow::Result<()> {
        let game = Game::from_moves("4453")?;
        let immediate = TacticalHeuristic::new(1, ScoreBackup::Immediate).decide(game.board(), Player::One, Player::Two);
        let minimax = TacticalHeuristic::new(1, ScoreBackup::Minimax).decide(game.board(), Player::One, Player::Two);
        assert_eq!(immediate, minimax);
        Ok(())
    }

    #[test]
    fn minimax_backup_uses_the_deeper_tree() -> anyhow::Result<()> {
        let game = Game::from_moves("4453")?;
        let board = game.board();
        let decision = TacticalHeuristic::new(2, ScoreBackup::Minimax)
            .decide(board, Player::One, Player::Two)
            .unwrap();

        let mut root = tree::build(board, 2, Player::One);
        let best = root.back_up(Player::One, Player::One);
        assert_eq!(decision.score, best);
        let first = root.children.iter().find(|child| child.score == best).unwrap();
        assert_eq!(Some(decision.column), first.column);
        Ok(())
    }
}
