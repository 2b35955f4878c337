//! A game tree search agent for 'Connect N' style games
//!
//! The agent runs depth-limited minimax search with alpha-beta pruning under
//! iterative deepening, scoring positions at the search horizon with a
//! heuristic that favours blocking the opponent.
//!
//! # Basic Usage
//!
//! ```
//! use connectn_ai::{agent::AlphaBetaAgent, arrayboard::ArrayBoard};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player 1 has three tokens stacked in the first column
//! let board = ArrayBoard::from_moves("121212")?;
//! let agent = AlphaBetaAgent::new("alpha-beta", 4)?;
//!
//! assert_eq!(agent.select_move(&board), Some(0));
//!# Ok(())
//!# }
//! ```

pub use anyhow;

pub mod board;

pub mod arrayboard;

pub mod heuristic;

pub mod solver;

pub mod config;

pub mod agent;

pub mod arena;

mod test;

pub use agent::{Agent, AlphaBetaAgent, RandomAgent, SearchReport};
pub use arrayboard::ArrayBoard;
pub use board::{Cell, GameBoard, GameState, Player};
pub use config::AgentConfig;
pub use solver::{SearchNode, SearchResult, Solver};
