//! Static evaluation of positions reached at the search horizon

use static_assertions::const_assert;

use crate::arrayboard::MAX_CELLS;
use crate::board::{GameBoard, Player};

/// Score of a position already won by the searching player
pub const WIN_SCORE: i32 = 1_000_000;
/// Score of a position already lost by the searching player
pub const LOSS_SCORE: i32 = -WIN_SCORE;

/// Upper bound of the initial search window
pub const SCORE_POS_INF: i32 = 10_000_000;
/// Lower bound of the initial search window
pub const SCORE_NEG_INF: i32 = -SCORE_POS_INF;

/// Weight of a searching player's token on a completable line
pub const OWN_LINE_WEIGHT: i32 = 1;
/// Weight of an opponent's token on a completable line
pub const OPPONENT_LINE_WEIGHT: i32 = -5;

// a proven result must outweigh any board full of opponent tokens
const_assert!(WIN_SCORE as usize > 5 * MAX_CELLS);
const_assert!(SCORE_POS_INF > WIN_SCORE);

/// Whether `score` is one of the proven win/loss sentinels
pub fn is_proven(score: i32) -> bool {
    score == WIN_SCORE || score == LOSS_SCORE
}

/// Scores `board` from the point of view of `player`
///
/// A finished game scores `WIN_SCORE` or `LOSS_SCORE`. Otherwise every token
/// that still lies on a completable line counts for its owner, with the
/// opponent's tokens weighted five times heavier so the agent favours
/// blocking over building.
pub fn evaluate<B: GameBoard>(board: &B, player: Player) -> i32 {
    let opponent = player.other();
    let to_move = board.player_to_move();

    match board.outcome().winner() {
        Some(winner) if winner == player && to_move == opponent => return WIN_SCORE,
        Some(winner) if winner == opponent && to_move == player => return LOSS_SCORE,
        _ => {}
    }

    let mut score = 0;
    for x in 0..board.width() {
        for y in 0..board.height() {
            let owner = match board.cell(x, y).owner() {
                Some(owner) => owner,
                None => continue,
            };
            if !board.completable_line_at(x, y) {
                continue;
            }
            score += if owner == player {
                OWN_LINE_WEIGHT
            } else {
                OPPONENT_LINE_WEIGHT
            };
        }
    }
    score
}
