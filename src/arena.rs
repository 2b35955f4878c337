//! Plays games and series of games between agents

use anyhow::{anyhow, Result};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::debug;
use rayon::prelude::*;

use crate::{
    agent::Agent,
    arrayboard::ArrayBoard,
    board::{GameBoard, GameState, Player},
};

use std::time::Instant;

/// A finished game
#[derive(Clone, Debug)]
pub struct GameRecord {
    /// The final position
    pub board: ArrayBoard,
    /// The side that made the first move of this game
    pub first_player: Player,
}

impl GameRecord {
    pub fn outcome(&self) -> GameState {
        self.board.outcome()
    }

    /// Whether the agent that moved first won
    pub fn first_agent_won(&self) -> bool {
        self.outcome().winner() == Some(self.first_player)
    }

    /// Whether the agent that moved second won
    pub fn second_agent_won(&self) -> bool {
        self.outcome().winner() == Some(self.first_player.other())
    }
}

/// Plays `board` to the end, `first` moving for the side to move
///
/// Every move is validated, so an agent returning an illegal or no column
/// aborts the game with an error naming it.
pub fn play_game(
    board: ArrayBoard,
    first: &mut dyn Agent,
    second: &mut dyn Agent,
) -> Result<GameRecord> {
    let mut board = board;
    let first_player = board.player_to_move();

    while !board.outcome().is_over() {
        let agent: &mut dyn Agent = if board.player_to_move() == first_player {
            &mut *first
        } else {
            &mut *second
        };

        let column = agent.go(&board).ok_or_else(|| {
            anyhow!(
                "{} did not choose a move after {} moves",
                agent.name(),
                board.num_moves()
            )
        })?;
        if let Err(err) = board.play_checked(column + 1) {
            return Err(anyhow!("{} chose an illegal move: {}", agent.name(), err));
        }
    }

    Ok(GameRecord {
        board,
        first_player,
    })
}

/// Tally of a series of games between two agents
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesResult {
    pub names: (String, String),
    pub wins: (usize, usize),
    pub draws: usize,
}

impl SeriesResult {
    pub fn games(&self) -> usize {
        self.wins.0 + self.wins.1 + self.draws
    }
}

/// Plays `games` games from `board` between agents built by `make_one` and `make_two`
///
/// The factories receive the game index. Agent one starts the even games and
/// agent two the odd ones. Games are played in parallel.
pub fn play_series<F, G>(
    games: usize,
    board: &ArrayBoard,
    make_one: F,
    make_two: G,
) -> Result<SeriesResult>
where
    F: Fn(usize) -> Box<dyn Agent> + Sync,
    G: Fn(usize) -> Box<dyn Agent> + Sync,
{
    let start = Instant::now();
    let names = (
        make_one(0).name().to_string(),
        make_two(0).name().to_string(),
    );

    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    // (agent one won, agent two won) per game
    let results = (0..games)
        .into_par_iter()
        .map(|game| -> Result<(bool, bool)> {
            let mut one = make_one(game);
            let mut two = make_two(game);

            let result = if game % 2 == 0 {
                let record = play_game(board.clone(), one.as_mut(), two.as_mut())?;
                (record.first_agent_won(), record.second_agent_won())
            } else {
                let record = play_game(board.clone(), two.as_mut(), one.as_mut())?;
                (record.second_agent_won(), record.first_agent_won())
            };
            debug!("game {} finished: {:?}", game, result);

            progress.inc(1);
            Ok(result)
        })
        .collect::<Result<Vec<_>>>()?;

    progress.finish();

    let mut series = SeriesResult {
        names,
        ..SeriesResult::default()
    };
    for result in results {
        match result {
            (true, _) => series.wins.0 += 1,
            (_, true) => series.wins.1 += 1,
            _ => series.draws += 1,
        }
    }
    debug!(
        "series of {} games completed in {}",
        series.games(),
        HumanDuration(start.elapsed())
    );
    Ok(series)
}
