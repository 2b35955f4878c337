use anyhow::{anyhow, Result};

use std::io::{stdin, stdout, Stdin, Write};
use std::time::Duration;

use connectn_ai::{arena::play_series, *};

mod display;
use display::display;

const SELFPLAY_GAMES: usize = 20;
const SELFPLAY_DEPTH: usize = 4;
const SELFPLAY_SECONDS: u64 = 2;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => play_interactive(),
        Some("selfplay") => selfplay(&args[1..]),
        Some(other) => Err(anyhow!(
            "unknown command '{}', expected no arguments or 'selfplay [games] [depth] [seconds]'",
            other
        )),
    }
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> Result<T> {
    match args.get(index) {
        Some(arg) => arg
            .parse::<T>()
            .map_err(|_| anyhow!("could not parse '{}' as a number", arg)),
        None => Ok(default),
    }
}

/// Plays the alpha-beta agent against a random agent and prints the tally
fn selfplay(args: &[String]) -> Result<()> {
    let games = parse_arg(args, 0, SELFPLAY_GAMES)?;
    let depth = parse_arg(args, 1, SELFPLAY_DEPTH)?;
    let seconds = parse_arg(args, 2, SELFPLAY_SECONDS)?;

    let config = AgentConfig::default()
        .with_max_depth(depth)
        .with_time_budget(Duration::from_secs(seconds));
    let agent = AlphaBetaAgent::with_config("alpha-beta", config)?;

    println!(
        "Playing {} games of alpha-beta (depth {}, {}s) against random moves\n",
        games, depth, seconds
    );

    let result = play_series(
        games,
        &ArrayBoard::standard(),
        |_| Box::new(agent.clone()) as Box<dyn Agent>,
        |game| Box::new(RandomAgent::seeded("random", game as u64)) as Box<dyn Agent>,
    )?;

    println!(
        "{}: {} wins, {}: {} wins, {} draws",
        result.names.0, result.wins.0, result.names.1, result.wins.1, result.draws
    );
    Ok(())
}

fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_board(stdin: &Stdin) -> Result<ArrayBoard> {
    loop {
        let mut buffer = String::new();
        print!("Board width, height and line length (enter for 7 6 4): ");
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;

        if buffer.trim().is_empty() {
            return Ok(ArrayBoard::standard());
        }
        let numbers = buffer
            .split_whitespace()
            .map(|number| number.parse::<usize>())
            .collect::<Result<Vec<_>, _>>();
        match numbers.as_deref() {
            Ok(&[width, height, connect]) => match ArrayBoard::new(width, height, connect) {
                Ok(board) => return Ok(board),
                Err(err) => println!("{}", err),
            },
            _ => println!("Expected three numbers, e.g. '7 6 4'"),
        }
    }
}

fn play_interactive() -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Connect N\n");

    let mut board = ask_board(&stdin)?;
    let ai_players = (
        ask_yes_no(&stdin, "Is player 1 AI controlled?")?,
        ask_yes_no(&stdin, "Is player 2 AI controlled?")?,
    );
    let agent = AlphaBetaAgent::new("alpha-beta", config::DEFAULT_MAX_DEPTH)?;

    // game loop
    loop {
        display(&board)?;

        match board.outcome() {
            GameState::Playing => {
                let player = board.player_to_move();
                let next_move =
                    // AI player
                    if (player == Player::One && ai_players.0) || (player == Player::Two && ai_players.1) {
                        println!("AI is thinking...");
                        stdout().flush()?;

                        // slow down play if both players are AI
                        if ai_players == (true, true) {
                            std::thread::sleep(Duration::new(1, 0));
                        }

                        let report = agent
                            .analyse(&board)
                            .ok_or_else(|| anyhow!("no legal move for player {}", player))?;

                        if report.is_proven_win() {
                            println!("Player {} can force a win within {} moves.", player, report.depth);
                        } else if report.is_proven_loss() {
                            println!("Player {} can force a win within {} moves.", player.other(), report.depth);
                        } else {
                            println!(
                                "Searched {} moves ahead ({} positions, {:.1}s), score {}",
                                report.depth,
                                report.node_count,
                                report.elapsed.as_secs_f64(),
                                report.score
                            );
                        }

                        println!("Best move: {}", report.column + 1);
                        report.column + 1

                    // human player
                    } else {
                        print!("Move input > ");
                        stdout().flush()?;
                        let mut input_str = String::new();
                        stdin.read_line(&mut input_str)?;

                        match input_str.trim().parse::<usize>() {
                            Err(_) => {
                                println!("Invalid number: {}", input_str.trim());
                                continue;
                            }
                            Ok(column) => column,
                        }
                    };

                if let Err(err) = board.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::PlayerOneWin => {
                println!("Player 1 wins!");
                break;
            }
            GameState::PlayerTwoWin => {
                println!("Player 2 wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
