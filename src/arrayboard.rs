//! A grid implementation of the connection game rules

use anyhow::{anyhow, Result};

use crate::board::{Cell, GameBoard, GameState, Player};

use std::fmt;

/// The widest board accepted by `ArrayBoard::new`
pub const MAX_WIDTH: usize = 16;
/// The tallest board accepted by `ArrayBoard::new`
pub const MAX_HEIGHT: usize = 16;
/// Upper bound on the number of cells of any board
pub const MAX_CELLS: usize = MAX_WIDTH * MAX_HEIGHT;

// horizontal, vertical and both diagonals, each walked in the positive x or y direction
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// A Connect-N board stored as a flat grid of cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayBoard {
    cells: Vec<Cell>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    width: usize,
    height: usize,
    connect: usize,
    player: Player,
    moves: Vec<usize>,
    state: GameState,
}

impl ArrayBoard {
    /// Creates an empty board of the given size where `connect` tokens in a row win
    pub fn new(width: usize, height: usize, connect: usize) -> Result<Self> {
        if width == 0 || height == 0 || connect == 0 {
            return Err(anyhow!(
                "Invalid board, dimensions {}x{} connect {} must all be positive",
                width,
                height,
                connect
            ));
        }
        if width > MAX_WIDTH || height > MAX_HEIGHT {
            return Err(anyhow!(
                "Invalid board, {}x{} exceeds the maximum size of {}x{}",
                width,
                height,
                MAX_WIDTH,
                MAX_HEIGHT
            ));
        }
        if connect > width.max(height) {
            return Err(anyhow!(
                "Invalid board, a line of {} does not fit on a {}x{} board",
                connect,
                width,
                height
            ));
        }
        Ok(Self {
            cells: vec![Cell::Empty; width * height],
            heights: vec![0; width],
            width,
            height,
            connect,
            player: Player::One,
            moves: Vec::new(),
            state: GameState::Playing,
        })
    }

    /// The classic 7x6 Connect 4 board
    pub fn standard() -> Self {
        Self {
            cells: vec![Cell::Empty; 7 * 6],
            heights: vec![0; 7],
            width: 7,
            height: 6,
            connect: 4,
            player: Player::One,
            moves: Vec::new(),
            state: GameState::Playing,
        }
    }

    /// Creates a standard board from a string of 1-indexed column digits
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        Self::standard().with_moves(moves)
    }

    /// Plays a string of 1-indexed column digits on this board
    pub fn with_moves<S: AsRef<str>>(mut self, moves: S) -> Result<Self> {
        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    let _ = self.play_checked(column as usize)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(self)
    }

    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState> {
        if self.state.is_over() {
            return Err(anyhow!("Invalid move, the game is already over"));
        }
        if column_one_indexed < 1 || column_one_indexed > self.width {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                self.width
            ));
        }
        let column = column_one_indexed - 1;
        if !self.playable(column) {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }

        self.play(column);
        Ok(self.state)
    }

    /// Plays a 0-indexed column without validation
    pub fn play(&mut self, column: usize) {
        debug_assert!(self.playable(column), "column {} is full", column);

        let player = self.player;
        let won = self.check_winning_move(column);

        self.cells[column + self.width * self.heights[column]] = player.into();
        self.heights[column] += 1;
        self.moves.push(column);
        self.player = player.other();

        // the first completed line decides the game, later drops cannot change it
        self.state = if self.state.is_over() {
            self.state
        } else if won {
            player.win()
        } else if self.moves.len() == self.width * self.height {
            GameState::Draw
        } else {
            GameState::Playing
        };
    }

    /// The board with both players' tokens, the turn and any winner exchanged
    pub fn swapped_colors(&self) -> Self {
        let mut swapped = self.clone();
        for cell in swapped.cells.iter_mut() {
            *cell = match cell.owner() {
                Some(player) => player.other().into(),
                None => Cell::Empty,
            };
        }
        swapped.player = self.player.other();
        swapped.state = match self.state.winner() {
            Some(winner) => winner.other().win(),
            None => self.state,
        };
        swapped
    }

    pub fn connect(&self) -> usize {
        self.connect
    }

    pub fn num_moves(&self) -> usize {
        self.moves.len()
    }

    /// The 0-indexed columns played so far, in order
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    pub fn playable(&self, column: usize) -> bool {
        column < self.width && self.heights[column] < self.height
    }

    fn get(&self, x: isize, y: isize) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return None;
        }
        Some(self.cells[x as usize + self.width * y as usize])
    }

    // number of consecutive `cell`s starting one step away from (x, y)
    fn run_length(&self, x: isize, y: isize, dx: isize, dy: isize, cell: Cell) -> usize {
        let mut run = 0;
        let (mut x, mut y) = (x + dx, y + dy);
        while self.get(x, y) == Some(cell) {
            run += 1;
            x += dx;
            y += dy;
        }
        run
    }

    /// Whether dropping a token for the side to move in `column` completes a line
    pub fn check_winning_move(&self, column: usize) -> bool {
        let player = Cell::from(self.player);
        let (x, y) = (column as isize, self.heights[column] as isize);

        DIRECTIONS.iter().any(|&(dx, dy)| {
            self.run_length(x, y, dx, dy, player) + self.run_length(x, y, -dx, -dy, player) + 1
                >= self.connect
        })
    }
}

impl Default for ArrayBoard {
    fn default() -> Self {
        Self::standard()
    }
}

impl GameBoard for ArrayBoard {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[x + self.width * y]
    }

    fn player_to_move(&self) -> Player {
        self.player
    }

    fn free_columns(&self) -> Vec<usize> {
        (0..self.width).filter(|&column| self.playable(column)).collect()
    }

    fn drop_token(&mut self, column: usize) {
        self.play(column);
    }

    fn outcome(&self) -> GameState {
        self.state
    }

    fn completable_line_at(&self, x: usize, y: usize) -> bool {
        let owner = self.cell(x, y);
        if owner.is_empty() {
            return false;
        }
        let (x, y) = (x as isize, y as isize);
        let length = self.connect as isize;

        // try every window of `connect` cells through (x, y) in every direction
        DIRECTIONS.iter().any(|&(dx, dy)| {
            (0..length).any(|offset| {
                let (start_x, start_y) = (x - offset * dx, y - offset * dy);
                (0..length).all(|i| match self.get(start_x + i * dx, start_y + i * dy) {
                    Some(cell) => cell == owner || cell.is_empty(),
                    None => false,
                })
            })
        })
    }
}

impl fmt::Display for ArrayBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let symbol = match self.cell(x, y) {
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
