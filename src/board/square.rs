use shakmaty::{File, Rank, Square};

use super::Piece;

/// Converts grid coordinates to a square.
///
/// Row 0 is the top of the board (rank 8, Black's home row) and column 0 is
/// the a-file. Returns `None` when either coordinate is outside `0..8`.
pub fn square_at(row: i32, col: i32) -> Option<Square> {
    if !(0..8).contains(&row) || !(0..8).contains(&col) {
        return None;
    }
    Some(Square::from_coords(
        File::new(col as u32),
        Rank::new((7 - row) as u32),
    ))
}

/// Grid row of a square (0 = rank 8).
#[inline]
pub fn row_of(square: Square) -> u8 {
    (7 - u32::from(square.rank())) as u8
}

/// Grid column of a square (0 = a-file).
#[inline]
pub fn col_of(square: Square) -> u8 {
    u32::from(square.file()) as u8
}

/// One of the 64 board cells.
///
/// Position and color are fixed at construction; the occupant slot is the
/// only mutable part.
#[derive(Debug)]
pub struct Cell {
    square: Square,
    light: bool,
    occupant: Option<Piece>,
}

impl Cell {
    pub(super) fn new(square: Square) -> Self {
        Self {
            square,
            light: (row_of(square) + col_of(square)) % 2 == 0,
            occupant: None,
        }
    }

    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub fn is_light(&self) -> bool {
        self.light
    }

    #[inline]
    pub fn occupant(&self) -> Option<&Piece> {
        self.occupant.as_ref()
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Puts `piece` in the slot, handing back whatever was there.
    pub(super) fn replace(&mut self, piece: Piece) -> Option<Piece> {
        self.occupant.replace(piece)
    }

    pub(super) fn take(&mut self) -> Option<Piece> {
        self.occupant.take()
    }
}
