use anyhow::Result;
use clap::Parser;
use log::info;

use std::io::{stdin, stdout, Write};
use std::path::PathBuf;

use connect4_engine::board::{GameState, Player};
use connect4_engine::config::{AppConfig, EngineConfig, StrategyKind};
use connect4_engine::display::display;
use connect4_engine::game::Game;
use connect4_engine::selector::strategy_for;
use connect4_engine::store::{GameId, GameResult, GameStore};
use connect4_engine::tournament::{self, Entrant};

const CPU_NAME: &str = "cpu";

#[derive(Parser, Debug)]
#[command(name = "connect4", about = "Play Connect 4 against a friend or the computer")]
struct Args {
    /// TOML file with engine settings
    #[arg(long, default_value = "connect4.toml")]
    config: PathBuf,

    /// Computer strategy: tactical | greedy
    #[arg(long)]
    strategy: Option<StrategyKind>,

    /// Search depth of the computer player
    #[arg(long)]
    depth: Option<usize>,

    /// Play the configured engines against each other instead of an interactive game
    #[arg(long)]
    tournament: bool,
}

/// Who sits in each seat of the current pairing
struct Seats {
    names: [String; 2],
    cpu: bool,
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    stdout().flush().expect("failed to flush to stdout!");
    let mut buffer = String::new();
    stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

fn ask_yes_no(message: &str) -> Result<bool> {
    loop {
        match prompt(message)?.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_number(message: &str) -> Result<usize> {
    loop {
        let answer = prompt(message)?;
        match answer.parse::<usize>() {
            Ok(number) => return Ok(number),
            Err(_) => println!("Invalid number: {}", answer),
        }
    }
}

fn choose_seats() -> Result<Seats> {
    let cpu = ask_yes_no("Play against the computer? y/n: ")?;
    let first = prompt("Enter player 1's name: ")?.to_lowercase();
    let second = if cpu {
        CPU_NAME.to_string()
    } else {
        prompt("Enter player 2's name: ")?.to_lowercase()
    };
    Ok(Seats {
        names: [first, second],
        cpu,
    })
}

/// Runs one interactive game and records it in `store`
fn play_game(seats: &Seats, engine: &EngineConfig, store: &mut GameStore) -> Result<GameId> {
    let mut game = Game::new();
    let id = store.create(&seats.names[0], &seats.names[1]);
    info!("starting game {} between {} and {}", id, seats.names[0], seats.names[1]);

    loop {
        display(game.board())?;

        match game.state {
            GameState::Playing => {
                let player = game.player_to_move();
                if seats.cpu && player == Player::Two {
                    println!("Computer is thinking...");
                    let turn = game.play_automated(engine)?;
                    if let Some(column) = turn.column {
                        println!("Computer plays column {}", column + 1);
                        store.append_move(id, column)?;
                    }
                    continue;
                }

                let answer = prompt(&format!("{}'s move > ", seats.names[player.number() - 1]))?;
                let column = match answer.parse::<usize>() {
                    Err(_) => {
                        println!("Invalid number: {}", answer);
                        continue;
                    }
                    Ok(column) => column,
                };
                if let Err(err) = game.play_checked(column) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
                store.append_move(id, column - 1)?;
            }

            GameState::Win(player) => {
                let winner = seats.names[player.number() - 1].clone();
                let loser = seats.names[player.other().number() - 1].clone();
                println!("The winner is {}!", winner);
                store.set_result(id, GameResult::Won { winner, loser })?;
                break;
            }
            GameState::Draw => {
                println!("Game is a draw!");
                store.set_result(id, GameResult::Draw)?;
                break;
            }
        }
    }
    Ok(id)
}

fn replay_game(store: &GameStore) -> Result<()> {
    if store.is_empty() {
        println!("No games played yet");
        return Ok(());
    }
    println!("List of games:");
    for game in store.games() {
        let (winner, loser) = match &game.result {
            Some(GameResult::Won { winner, loser }) => (winner.as_str(), loser.as_str()),
            Some(GameResult::Draw) => ("draw", "draw"),
            None => ("-", "-"),
        };
        println!(" - Game number: {}\n     Winner: {}\n     Loser: {}", game.id, winner, loser);
    }

    let record = loop {
        match store.get(ask_number("Enter game number: ")?) {
            Ok(record) => break record,
            Err(err) => println!("{}", err),
        }
    };
    for board in record.replay()? {
        display(&board)?;
        std::thread::sleep(std::time::Duration::from_millis(1000));
    }
    match &record.result {
        Some(GameResult::Won { winner, loser }) => println!("Winner: {}  Loser: {}", winner, loser),
        Some(GameResult::Draw) => println!("Draw"),
        None => println!("Unfinished"),
    }
    Ok(())
}

fn print_leaderboard(store: &GameStore) {
    println!("{:>3}  {:<16}{:>6}{:>8}{:>10}", "", "Player", "Wins", "Losses", "Net Wins");
    for (rank, standing) in store.leaderboard().iter().enumerate() {
        println!(
            "{:>3}  {:<16}{:>6}{:>8}{:>10}",
            rank + 1,
            standing.player,
            standing.wins,
            standing.losses,
            standing.net
        );
    }
}

fn print_player_record(store: &GameStore) -> Result<()> {
    let name = prompt("Enter name of player: ")?.to_lowercase();
    let (won, lost) = store.find_games_by_player(&name);
    println!(
        " - Player name: {}\n     Games won: {:?}\n     Games lost: {:?}",
        name, won, lost
    );
    Ok(())
}

fn run_tournament(config: &AppConfig) -> Result<()> {
    let cpu = Entrant {
        name: strategy_for(&config.cpu).name().to_string(),
        engine: config.cpu.clone(),
    };
    let mut challenger = Entrant {
        name: strategy_for(&config.tournament.challenger).name().to_string(),
        engine: config.tournament.challenger.clone(),
    };
    if challenger.name == cpu.name {
        challenger.name.push_str("-challenger");
    }

    let reports = tournament::run(&cpu, &challenger, config.tournament.opening_plies, true)?;
    let mut store = GameStore::new();
    tournament::record(&mut store, &reports)?;
    let draws = reports
        .iter()
        .filter(|report| report.state == GameState::Draw)
        .count();
    println!("{} games played, {} drawn", reports.len(), draws);
    print_leaderboard(&store);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(&args.config)?;
    if let Some(strategy) = args.strategy {
        config.cpu.strategy = strategy;
    }
    if let Some(depth) = args.depth {
        config.cpu.search_depth = depth;
    }
    config.validate()?;

    if args.tournament {
        return run_tournament(&config);
    }

    println!("Welcome to Connect 4\n");
    let mut store = GameStore::new();
    let mut seats = choose_seats()?;
    play_game(&seats, &config.cpu, &mut store)?;

    loop {
        println!("\nMain menu:");
        println!("  1. Play again\n  2. Replay game\n  3. Show leaderboard\n  4. Player record\n  5. Exit\n");
        match ask_number("Choose an option from the main menu: ")? {
            1 => {
                if !ask_yes_no("Are the same players playing? y/n: ")? {
                    seats = choose_seats()?;
                }
                play_game(&seats, &config.cpu, &mut store)?;
            }
            2 => replay_game(&store)?,
            3 => print_leaderboard(&store),
            4 => print_player_record(&store)?,
            5 => break,
            other => println!("Unknown option {}", other),
        }
    }
    Ok(())
}
