//! Finished and in-progress game records, owned by the host application

use thiserror::Error;

use crate::board::{Board, MoveError, Player};

pub type GameId = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    Won { winner: String, loser: String },
    Draw,
}

#[derive(Clone, Debug)]
pub struct GameRecord {
    pub id: GameId,
    /// Names of the first and second player
    pub players: [String; 2],
    /// Columns played, 0-indexed, starting with the first player
    pub moves: Vec<usize>,
    pub result: Option<GameResult>,
}

impl GameRecord {
    /// Boards after each recorded move, in order
    pub fn replay(&self) -> Result<Vec<Board>, MoveError> {
        let mut board = Board::new();
        let mut player = Player::One;
        let mut boards = Vec::with_capacity(self.moves.len());
        for &column in &self.moves {
            board.apply_move(column, player)?;
            boards.push(board);
            player = player.other();
        }
        Ok(boards)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Game {0} not found")]
    UnknownGame(GameId),
    #[error("Game {0} already has a result")]
    Finished(GameId),
}

/// A player's row in the leaderboard
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing {
    pub player: String,
    pub wins: usize,
    pub losses: usize,
    pub net: i64,
}

/// All games played in a session, numbered from 1
#[derive(Clone, Debug, Default)]
pub struct GameStore {
    games: Vec<GameRecord>,
}

impl GameStore {
    pub fn new() -> Self {
        Self { games: Vec::new() }
    }

    /// Opens a record for a new game. Names are stored lower-cased.
    pub fn create(&mut self, first: &str, second: &str) -> GameId {
        let id = self.games.len() + 1;
        self.games.push(GameRecord {
            id,
            players: [first.to_lowercase(), second.to_lowercase()],
            moves: Vec::new(),
            result: None,
        });
        id
    }

    pub fn get(&self, id: GameId) -> Result<&GameRecord, StoreError> {
        id.checked_sub(1)
            .and_then(|index| self.games.get(index))
            .ok_or(StoreError::UnknownGame(id))
    }

    fn get_mut(&mut self, id: GameId) -> Result<&mut GameRecord, StoreError> {
        match id.checked_sub(1) {
            Some(index) if index < self.games.len() => Ok(&mut self.games[index]),
            _ => Err(StoreError::UnknownGame(id)),
        }
    }

    pub fn append_move(&mut self, id: GameId, column: usize) -> Result<(), StoreError> {
        let record = self.get_mut(id)?;
        if record.result.is_some() {
            return Err(StoreError::Finished(id));
        }
        record.moves.push(column);
        Ok(())
    }

    pub fn set_result(&mut self, id: GameId, result: GameResult) -> Result<(), StoreError> {
        let record = self.get_mut(id)?;
        if record.result.is_some() {
            return Err(StoreError::Finished(id));
        }
        record.result = Some(result);
        Ok(())
    }

    pub fn games(&self) -> impl Iterator<Item = &GameRecord> {
        self.games.iter()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Ids of the games `name` won and lost
    pub fn find_games_by_player(&self, name: &str) -> (Vec<GameId>, Vec<GameId>) {
        let name = name.to_lowercase();
        let mut won = Vec::new();
        let mut lost = Vec::new();
        for game in &self.games {
            if let Some(GameResult::Won { winner, loser }) = &game.result {
                if *winner == name {
                    won.push(game.id);
                } else if *loser == name {
                    lost.push(game.id);
                }
            }
        }
        (won, lost)
    }

    /// Win/loss table sorted by net wins, best first
    ///
    /// Draws count for neither side. Players with equal net wins keep the
    /// order in which they first appear.
    pub fn leaderboard(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = Vec::new();

        for game in &self.games {
            if let Some(GameResult::Won { winner, loser }) = &game.result {
                let index = standing_index(&mut standings, winner);
                standings[index].wins += 1;
                let index = standing_index(&mut standings, loser);
                standings[index].losses += 1;
            }
        }
        for standing in standings.iter_mut() {
            standing.net = standing.wins as i64 - standing.losses as i64;
        }
        // stable sort keeps first-appearance order on ties
        standings.sort_by(|a, b| b.net.cmp(&a.net));
        standings
    }
}

fn standing_index(standings: &mut Vec<Standing>, player: &str) -> usize {
    match standings.iter().position(|s| s.player == player) {
        Some(index) => index,
        None => {
            standings.push(Standing {
                player: player.to_string(),
                wins: 0,
                losses: 0,
                net: 0,
            });
            standings.len() - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn won(winner: &str, loser: &str) -> GameResult {
        GameResult::Won {
            winner: winner.to_string(),
            loser: loser.to_string(),
        }
    }

    #[test]
    fn ids_start_at_one() {
        let mut store = GameStore::new();
        assert_eq!(store.create("Ann", "CPU"), 1);
        assert_eq!(store.create("Bob", "CPU"), 2);
        assert_eq!(store.get(1).unwrap().players, ["ann".to_string(), "cpu".to_string()]);
        assert_eq!(store.get(0).unwrap_err(), StoreError::UnknownGame(0));
        assert_eq!(store.get(3).unwrap_err(), StoreError::UnknownGame(3));
    }

    #[test]
    fn moves_are_appended_until_the_result() {
        let mut store = GameStore::new();
        let id = store.create("ann", "bob");
        store.append_move(id, 3).unwrap();
        store.append_move(id, 2).unwrap();
        store.set_result(id, won("ann", "bob")).unwrap();
        assert_eq!(store.get(id).unwrap().moves, vec![3, 2]);
        assert_eq!(store.append_move(id, 1), Err(StoreError::Finished(id)));
        assert_eq!(store.set_result(id, GameResult::Draw), Err(StoreError::Finished(id)));
        assert_eq!(store.append_move(9, 1), Err(StoreError::UnknownGame(9)));
    }

    #[test]
    fn replay_rebuilds_each_position() {
        let mut store = GameStore::new();
        let id = store.create("ann", "bob");
        for &column in &[3, 3, 4] {
            store.append_move(id, column).unwrap();
        }
        let boards = store.get(id).unwrap().replay().unwrap();
        assert_eq!(boards.len(), 3);
        assert_eq!(boards[0].count(crate::board::Cell::Empty), 41);
        assert_eq!(boards[2].get(0, 4), crate::board::Cell::PlayerOne);
        assert_eq!(boards[1].get(1, 3), crate::board::Cell::PlayerTwo);
    }

    #[test]
    fn replay_reports_illegal_moves() {
        let mut store = GameStore::new();
        let id = store.create("ann", "bob");
        for _ in 0..7 {
            store.append_move(id, 0).unwrap();
        }
        assert_eq!(store.get(id).unwrap().replay().unwrap_err(), MoveError::ColumnFull(0));
    }

    #[test]
    fn player_records() {
        let mut store = GameStore::new();
        for (first, second, result) in vec![
            ("ann", "cpu", won("ann", "cpu")),
            ("ann", "cpu", won("cpu", "ann")),
            ("ann", "cpu", GameResult::Draw),
            ("bob", "ann", won("ann", "bob")),
        ] {
            let id = store.create(first, second);
            store.set_result(id, result).unwrap();
        }
        assert_eq!(store.find_games_by_player("ANN"), (vec![1, 4], vec![2]));
        assert_eq!(store.find_games_by_player("bob"), (vec![], vec![4]));
    }

    #[test]
    fn leaderboard_orders_by_net_wins() {
        let mut store = GameStore::new();
        for result in vec![
            won("cpu", "ann"),
            won("bob", "ann"),
            won("ann", "bob"),
            won("cpu", "bob"),
            GameResult::Draw,
        ] {
            let id = store.create("x", "y");
            store.set_result(id, result).unwrap();
        }
        let board: Vec<_> = store
            .leaderboard()
            .into_iter()
            .map(|s| (s.player, s.wins, s.losses, s.net))
            .collect();
        assert_eq!(
            board,
            vec![
                ("cpu".to_string(), 2, 0, 2),
                ("ann".to_string(), 1, 2, -1),
                ("bob".to_string(), 1, 2, -1),
            ]
        );
    }
}
