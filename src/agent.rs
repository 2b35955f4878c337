//! Players that choose moves for a board

use anyhow::Result;
use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    arrayboard::ArrayBoard, board::GameBoard, config::AgentConfig, heuristic::*, solver::Solver,
};

use std::time::{Duration, Instant};

/// Something that can take a turn in a game
pub trait Agent: Send {
    fn name(&self) -> &str;

    /// Chooses a 0-indexed column to play on `board`, or `None` if no move is legal
    fn go(&mut self, board: &ArrayBoard) -> Option<usize>;
}

/// Summary of an iterative deepening search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    /// The chosen 0-indexed column
    pub column: usize,
    /// The score of the iteration the column was taken from
    pub score: i32,
    /// The depth of the iteration the column was taken from
    pub depth: usize,
    /// Nodes visited across all iterations
    pub node_count: usize,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn is_proven_win(&self) -> bool {
        self.score == WIN_SCORE
    }

    pub fn is_proven_loss(&self) -> bool {
        self.score == LOSS_SCORE
    }
}

/// An agent running iterative deepening alpha-beta search under a time budget
#[derive(Clone, Debug)]
pub struct AlphaBetaAgent {
    name: String,
    config: AgentConfig,
}

impl AlphaBetaAgent {
    /// Creates an agent searching at most `max_depth` plies with the default time budget
    pub fn new<S: Into<String>>(name: S, max_depth: usize) -> Result<Self> {
        Self::with_config(name, AgentConfig::default().with_max_depth(max_depth))
    }

    pub fn with_config<S: Into<String>>(name: S, config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            name: name.into(),
            config,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Chooses a column for the side to move on `board`
    pub fn select_move<B: GameBoard>(&self, board: &B) -> Option<usize> {
        self.analyse(board).map(|report| report.column)
    }

    /// Searches `board` with iterative deepening and reports the chosen move
    ///
    /// # Notes
    /// With the default config a board whose game is already decided yields
    /// `None`, like a full board. The time budget is only checked between
    /// depths, so the search can overrun it by at most one iteration. A proven win or loss ends the
    /// search at the depth it was found. Otherwise the move of the deepest
    /// completed iteration is kept, as scores of different depths are not
    /// comparable.
    pub fn analyse<B: GameBoard>(&self, board: &B) -> Option<SearchReport> {
        let start = Instant::now();
        let root = board.player_to_move();
        let mut node_count = 0;
        let mut report = None;

        for depth in 1..=self.config.max_depth {
            let mut solver =
                Solver::new(root).with_stop_at_decided(self.config.stop_at_decided);
            let result = solver.search(board, depth);
            node_count += solver.node_count;

            // no legal moves (or a decided game), nothing to choose from at any depth
            let column = result.column()?;
            let elapsed = start.elapsed();
            debug!(
                "{}: depth {}/{}, score {}, column {}, nodes {}, {:.3}s",
                self.name,
                depth,
                self.config.max_depth,
                result.score,
                column + 1,
                solver.node_count,
                elapsed.as_secs_f64()
            );

            report = Some(SearchReport {
                column,
                score: result.score,
                depth,
                node_count,
                elapsed,
            });

            if is_proven(result.score) {
                info!(
                    "{}: proven {} at depth {}",
                    self.name,
                    if result.score == WIN_SCORE { "win" } else { "loss" },
                    depth
                );
                break;
            }
            if elapsed > self.config.time_budget {
                info!(
                    "{}: time budget of {:.1}s exhausted after depth {}",
                    self.name,
                    self.config.time_budget.as_secs_f64(),
                    depth
                );
                break;
            }
        }
        report
    }
}

impl Agent for AlphaBetaAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn go(&mut self, board: &ArrayBoard) -> Option<usize> {
        self.select_move(board)
    }
}

/// An agent playing uniformly random legal moves
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an agent whose move sequence is reproducible
    pub fn seeded<S: Into<String>>(name: S, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn go(&mut self, board: &ArrayBoard) -> Option<usize> {
        board.free_columns().choose(&mut self.rng).copied()
    }
}
