#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};

    use crate::board::{apply_move, Board, Cell, GameState, MoveError, Player};
    use crate::config::{EngineConfig, StrategyKind};
    use crate::game::Game;
    use crate::lines::{all_windows, detect_terminal, filled_with, has_four, is_draw};
    use crate::selector::{play_automated_move, select_automated_move, Reason};
    use crate::{HEIGHT, WIDTH};

    // 42 moves without a line of four, ending on column 1
    const DRAWN_GAME: &str = "656173566152215676422337377473141445425321";

    // a fixed pseudo-random column sequence so the property tests are reproducible
    fn columns(seed: u64, len: usize) -> Vec<usize> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((state >> 33) % WIDTH as u64) as usize
            })
            .collect()
    }

    fn any_line(board: &Board, player: Player) -> bool {
        all_windows().any(|window| filled_with(board, &window, player.cell()))
    }

    #[test]
    pub fn win_now_scenario() -> Result<()> {
        let mut board = Board::new();
        for column in 0..3 {
            apply_move(&mut board, column, Player::One)?;
        }
        assert_eq!(board.get(0, 3), Cell::Empty);

        let column = select_automated_move(&board, Player::One, Player::Two, 3, StrategyKind::TacticalHeuristic);
        assert_eq!(column, Some(3));

        let turn = play_automated_move(&mut board, Player::One, &EngineConfig::default())?;
        assert_eq!(turn.column, Some(3));
        assert_eq!(turn.reason, Some(Reason::Win));
        assert_eq!(turn.state, GameState::Win(Player::One));
        Ok(())
    }

    #[test]
    pub fn draw_scenario() -> Result<()> {
        let (setup, last) = DRAWN_GAME.split_at(DRAWN_GAME.len() - 1);
        let mut game = Game::from_moves(setup)?;
        assert_eq!(game.state, GameState::Playing);
        assert_eq!(game.board().open_columns(), vec![0]);

        let last = last.parse::<usize>()?;
        assert_eq!(game.play_checked(last)?, GameState::Draw);
        assert!(is_draw(game.board()));
        assert!(!any_line(game.board(), Player::One));
        assert!(!any_line(game.board(), Player::Two));
        Ok(())
    }

    #[test]
    pub fn gravity_after_random_games() -> Result<()> {
        for seed in 0..50 {
            let mut board = Board::new();
            let mut player = Player::One;
            for column in columns(seed, 60) {
                match apply_move(&mut board, column, player) {
                    Ok((_, state)) => {
                        player = player.other();
                        if state.is_over() {
                            break;
                        }
                    }
                    Err(MoveError::ColumnFull(_)) => continue,
                    Err(err) => return Err(anyhow!(err)),
                }
            }
            for column in 0..WIDTH {
                let height = board.height(column);
                for row in height..HEIGHT {
                    assert_eq!(board.get(row, column), Cell::Empty, "seed {}", seed);
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn detection_matches_a_full_scan() -> Result<()> {
        // has_four straight after a move agrees with scanning every window
        for seed in 100..160 {
            let mut board = Board::new();
            let mut player = Player::One;
            for column in columns(seed, 42) {
                let row = match board.drop_row(column) {
                    Ok(row) => row,
                    Err(_) => continue,
                };
                board.place(row, column, player);
                assert_eq!(has_four(&board, row, column, player), any_line(&board, player));
                if detect_terminal(&board, row, column, player).is_over() {
                    break;
                }
                player = player.other();
            }
        }
        Ok(())
    }

    #[test]
    pub fn engines_never_choose_full_columns() -> Result<()> {
        for &strategy in &[StrategyKind::TacticalHeuristic, StrategyKind::Greedy] {
            for seed in 200..220 {
                let mut game = Game::new();
                for column in columns(seed, 10) {
                    if game.board().is_column_open(column) && !game.state.is_over() {
                        game.play(column)?;
                    }
                }
                let config = EngineConfig {
                    strategy,
                    search_depth: 2,
                    ..EngineConfig::default()
                };
                while !game.state.is_over() {
                    let before = *game.board();
                    let turn = game.play_automated(&config)?;
                    let column = turn.column.ok_or_else(|| anyhow!("no move on an open board"))?;
                    assert!(before.is_column_open(column));
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn engine_plays_a_full_game_against_itself() -> Result<()> {
        let mut game = Game::new();
        let config = EngineConfig::default();
        while !game.state.is_over() {
            game.play_automated(&config)?;
        }
        match game.state {
            GameState::Win(player) => assert!(any_line(game.board(), player)),
            GameState::Draw => assert!(is_draw(game.board())),
            GameState::Playing => unreachable!(),
        }
        Ok(())
    }
}
