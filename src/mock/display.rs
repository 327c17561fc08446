use std::io::{self, Write};

use shakmaty::{File, Rank, Square};

use crate::BoardDisplay;
use crate::feedback::SquareFeedback;
use crate::session::Frame;

/// Terminal-based board display for development and testing.
///
/// Renders a [`Frame`] as an 8×8 grid with ANSI color-coded squares
/// matching the feedback type (origin, destinations, captures).
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Create a new terminal display.
    pub fn new() -> Self {
        Self
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl BoardDisplay for TerminalDisplay {
    type Error = DisplayError;

    fn show(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        render_frame(&mut io::stdout(), frame)
    }
}

/// Render a frame to any writer. Extracted for testability.
fn render_frame(w: &mut impl Write, frame: &Frame<'_>) -> Result<(), DisplayError> {
    let board = frame.board();
    for rank in Rank::ALL.iter().rev() {
        write!(w, " {} ", rank.char())?;
        for file in File::ALL {
            let square = Square::from_coords(file, *rank);
            let symbol = board.piece_at(square).map_or('·', |piece| piece.char());
            let cell = format_square(symbol, frame.feedback().get(square));
            write!(w, "{cell}")?;
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    writeln!(w, "{:?} to move", frame.side_to_move())?;
    if let Some(ghost) = frame.ghost() {
        writeln!(
            w,
            "holding {} from {} at ({}, {})",
            ghost.piece.char(),
            ghost.origin,
            ghost.position.x,
            ghost.position.y
        )?;
    }
    w.flush()?;
    Ok(())
}

/// Wrap a cell symbol in the ANSI background for its feedback variant.
fn format_square(symbol: char, feedback: Option<SquareFeedback>) -> String {
    match feedback {
        Some(SquareFeedback::Destination) => format!("\x1b[44m {symbol} \x1b[0m"),
        Some(SquareFeedback::Capture) => format!("\x1b[41m {symbol} \x1b[0m"),
        Some(SquareFeedback::Origin) => format!("\x1b[42m {symbol} \x1b[0m"),
        None => format!(" {symbol} "),
    }
}
