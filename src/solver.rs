//! Depth-limited minimax search with alpha-beta pruning

use crate::{board::*, heuristic::*};

/// A board reached from its parent by dropping a token in `column`
#[derive(Clone, Debug)]
pub struct SearchNode<B> {
    pub board: B,
    pub column: usize,
}

/// The outcome of searching a position
///
/// `best` is the child chosen by the side to move, or `None` when the
/// position was evaluated as a leaf. `score` is always from the point of view
/// of the player the search runs for.
#[derive(Clone, Debug)]
pub struct SearchResult<B> {
    pub best: Option<SearchNode<B>>,
    pub score: i32,
}

impl<B> SearchResult<B> {
    fn leaf(score: i32) -> Self {
        Self { best: None, score }
    }

    /// The column leading to the chosen child
    pub fn column(&self) -> Option<usize> {
        self.best.as_ref().map(|node| node.column)
    }
}

/// Returns every board reachable in one move, in ascending column order
pub fn successors<B: GameBoard>(board: &B) -> Vec<SearchNode<B>> {
    board
        .free_columns()
        .into_iter()
        .map(|column| {
            let mut next = board.clone();
            next.drop_token(column);
            SearchNode {
                board: next,
                column,
            }
        })
        .collect()
}

/// A game tree searcher scoring positions for a fixed player
///
/// # Notes
/// Max and min plies alternate strictly, but every leaf is evaluated for
/// the same `root` player, so the scores never flip sign between plies.
///
/// By default a node is a leaf only when the depth is exhausted or the board
/// is full, so play continues past a completed line. With
/// [`Solver::with_stop_at_decided`] a decided game is a leaf as well.
#[derive(Clone, Debug)]
pub struct Solver {
    root: Player,
    stop_at_decided: bool,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    /// Creates a new `Solver` scoring positions for `root`
    pub fn new(root: Player) -> Self {
        Self {
            root,
            stop_at_decided: false,
            node_count: 0,
        }
    }

    /// Treats won and drawn positions as leaves instead of expanding their open columns
    pub fn with_stop_at_decided(mut self, stop_at_decided: bool) -> Self {
        self.stop_at_decided = stop_at_decided;
        self
    }

    fn is_leaf<B: GameBoard>(&self, board: &B, depth: usize) -> bool {
        depth == 0 || (self.stop_at_decided && board.outcome().is_over())
    }

    /// Searches `board` to `depth` plies with a full window, `root` choosing first
    pub fn search<B: GameBoard>(&mut self, board: &B, depth: usize) -> SearchResult<B> {
        self.alphabeta(board, depth, SCORE_NEG_INF, SCORE_POS_INF, true)
    }

    /// Performs game tree search with alpha-beta pruning
    ///
    /// The maximising side cuts off once its best score reaches `beta` and
    /// the minimising side once its best score falls to `alpha`. With a full
    /// window the returned score equals that of [`Solver::minimax`].
    pub fn alphabeta<B: GameBoard>(
        &mut self,
        board: &B,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> SearchResult<B> {
        self.node_count += 1;

        if self.is_leaf(board, depth) {
            return SearchResult::leaf(evaluate(board, self.root));
        }
        let children = successors(board);
        if children.is_empty() {
            return SearchResult::leaf(evaluate(board, self.root));
        }

        let mut best = None;
        let mut best_score = if maximizing { SCORE_NEG_INF } else { SCORE_POS_INF };
        for child in children {
            let score = self
                .alphabeta(&child.board, depth - 1, alpha, beta, !maximizing)
                .score;

            // only a strictly better score replaces the best, so ties keep the lowest column
            let improved = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improved {
                best_score = score;
                best = Some(child);
            }

            if maximizing {
                // the minimising parent already has a line at least this good
                if best_score >= beta {
                    break;
                }
                alpha = alpha.max(best_score);
            } else {
                // the maximising parent already has a line at least this good
                if best_score <= alpha {
                    break;
                }
                beta = beta.min(best_score);
            }
        }

        SearchResult {
            best,
            score: best_score,
        }
    }

    /// Performs plain minimax search over the same tree as [`Solver::alphabeta`]
    pub fn minimax<B: GameBoard>(
        &mut self,
        board: &B,
        depth: usize,
        maximizing: bool,
    ) -> SearchResult<B> {
        self.node_count += 1;

        if self.is_leaf(board, depth) {
            return SearchResult::leaf(evaluate(board, self.root));
        }
        let children = successors(board);
        if children.is_empty() {
            return SearchResult::leaf(evaluate(board, self.root));
        }

        let mut best = None;
        let mut best_score = if maximizing { SCORE_NEG_INF } else { SCORE_POS_INF };
        for child in children {
            let score = self.minimax(&child.board, depth - 1, !maximizing).score;
            let improved = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improved {
                best_score = score;
                best = Some(child);
            }
        }

        SearchResult {
            best,
            score: best_score,
        }
    }
}
