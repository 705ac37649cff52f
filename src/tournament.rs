//! Engine-versus-engine matches over every short opening
//!
//! Both engines are deterministic, so a match series enumerates every
//! sequence of `opening_plies` forced moves and lets the engines play out
//! the rest, once from each seat. The games are independent of each other
//! and are played in parallel.

use anyhow::Result;
use indicatif::*;
use log::info;
use rayon::prelude::*;

use std::time::Instant;

use crate::board::{GameState, Player};
use crate::config::EngineConfig;
use crate::game::Game;
use crate::store::{GameId, GameResult, GameStore};
use crate::WIDTH;

/// An engine taking part in a match series
#[derive(Clone, Debug)]
pub struct Entrant {
    pub name: String,
    pub engine: EngineConfig,
}

/// A finished engine game
#[derive(Clone, Debug)]
pub struct MatchReport {
    /// Names of the first and second player
    pub players: [String; 2],
    pub opening: Vec<usize>,
    /// Every column played, including the opening
    pub moves: Vec<usize>,
    pub state: GameState,
}

impl MatchReport {
    pub fn result(&self) -> GameResult {
        match self.state {
            GameState::Win(player) => GameResult::Won {
                winner: self.players[player.number() - 1].clone(),
                loser: self.players[player.other().number() - 1].clone(),
            },
            _ => GameResult::Draw,
        }
    }
}

/// Every sequence of `plies` columns, in lexicographic order, that leaves the game running
pub fn openings(plies: usize) -> Vec<Vec<usize>> {
    let mut openings = vec![Vec::new()];
    for _ in 0..plies {
        openings = openings
            .into_iter()
            .flat_map(|opening| {
                (0..WIDTH).map(move |column| {
                    let mut next = opening.clone();
                    next.push(column);
                    next
                })
            })
            .filter(|opening| {
                let mut game = Game::new();
                opening
                    .iter()
                    .all(|&column| matches!(game.play(column), Ok(GameState::Playing)))
            })
            .collect();
    }
    openings
}

/// Plays `opening` and then lets the two engines alternate until the game ends
pub fn play_match(opening: &[usize], first: &Entrant, second: &Entrant) -> Result<MatchReport> {
    let mut game = Game::new();
    for &column in opening {
        game.play(column)?;
    }
    while !game.state.is_over() {
        let entrant = match game.player_to_move() {
            Player::One => first,
            Player::Two => second,
        };
        game.play_automated(&entrant.engine)?;
    }
    Ok(MatchReport {
        players: [first.name.clone(), second.name.clone()],
        opening: opening.to_vec(),
        moves: game.moves().to_vec(),
        state: game.state,
    })
}

/// Plays every opening twice, once with each entrant moving first
pub fn run(a: &Entrant, b: &Entrant, opening_plies: usize, show_progress: bool) -> Result<Vec<MatchReport>> {
    let start = Instant::now();
    let jobs: Vec<(Vec<usize>, bool)> = openings(opening_plies)
        .into_iter()
        .flat_map(|opening| vec![(opening.clone(), false), (opening, true)])
        .collect();
    info!(
        "playing {} games between {} and {} from {}-ply openings",
        jobs.len(),
        a.name,
        b.name,
        opening_plies
    );

    let progress = if show_progress {
        ProgressBar::new(jobs.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing matches: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let reports = jobs
        .par_iter()
        .map(|(opening, swapped)| {
            let report = if *swapped {
                play_match(opening, b, a)
            } else {
                play_match(opening, a, b)
            };
            progress.inc(1);
            report
        })
        .collect::<Result<Vec<_>>>()?;

    progress.finish();
    info!("match series completed in {}", HumanDuration(start.elapsed()));
    Ok(reports)
}

/// Stores finished matches in order, returning their ids
pub fn record(store: &mut GameStore, reports: &[MatchReport]) -> Result<Vec<GameId>> {
    let mut ids = Vec::with_capacity(reports.len());
    for report in reports {
        let id = store.create(&report.players[0], &report.players[1]);
        for &column in &report.moves {
            store.append_move(id, column)?;
        }
        store.set_result(id, report.result())?;
        ids.push(id);
    }
    Ok(ids)
}
