//! The rules-engine interface consumed by the search

/// One of the two sides of the game
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The opponent of this player
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The `GameState` representing a win for this player
    pub fn win(self) -> GameState {
        match self {
            Player::One => GameState::PlayerOneWin,
            Player::Two => GameState::PlayerTwoWin,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::One => write!(f, "1"),
            Player::Two => write!(f, "2"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The owner of the token in this cell, if any
    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl GameState {
    /// The winning player, if the game has been won
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameState::PlayerOneWin => Some(Player::One),
            GameState::PlayerTwoWin => Some(Player::Two),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Playing)
    }
}

/// A board of a connection game, as seen by the search
///
/// # Notes
/// Coordinates are `(x, y)` with `x` the column and `y = 0` the bottom row.
/// Cloning must produce a fully independent board.
pub trait GameBoard: Clone {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn cell(&self, x: usize, y: usize) -> Cell;

    /// The side whose token is dropped next
    fn player_to_move(&self) -> Player;

    /// The non-full columns in ascending order; empty only when the board is full.
    /// A decided game still reports its open columns
    fn free_columns(&self) -> Vec<usize>;

    /// Drops a token for the side to move into `column` and passes the turn.
    /// `column` must be one of `free_columns()`
    fn drop_token(&mut self, column: usize);

    fn outcome(&self) -> GameState;

    /// Whether the occupied cell at `(x, y)` lies on a line of the connection
    /// length that its owner could still complete
    fn completable_line_at(&self, x: usize, y: usize) -> bool;
}
