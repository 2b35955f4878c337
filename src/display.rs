use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use connectn_ai::{ArrayBoard, Cell, GameBoard};

use std::io::{stdout, Write};

/// The terminal position of cell `(x, y)` for a board whose bottom row sits just above `origin`
fn cell_position((origin_x, origin_y): (u16, u16), x: usize, y: usize) -> (u16, u16) {
    // a short terminal clips the top rows instead of wrapping around
    (
        origin_x.saturating_add(x as u16),
        origin_y.saturating_sub(1 + y as u16),
    )
}

/// Draws `board` at the cursor, column numbers on top
pub fn display(board: &ArrayBoard) -> Result<()> {
    let mut stdout = stdout();
    let (width, height) = (board.width(), board.height());

    // column numbers beyond 9 only show their last digit
    let cols: String = (1..=width).map(|x| (x % 10).to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..height {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for y in 0..height {
        for x in 0..width {
            let (pos_x, pos_y) = cell_position((origin_x, origin_y), x, y);

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match board.cell(x, y) {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x + width as u16, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::cell_position;

    #[test]
    pub fn cell_positions() {
        assert_eq!(cell_position((2, 10), 0, 0), (2, 9));
        assert_eq!(cell_position((2, 10), 3, 5), (5, 4));
        // a board taller than the space above the cursor clamps to the top row
        assert_eq!(cell_position((0, 3), 1, 5), (1, 0));
        assert_eq!(cell_position((0, 0), 0, 0), (0, 0));
    }
}
