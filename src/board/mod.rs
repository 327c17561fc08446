mod piece;
mod square;

pub use piece::{Piece, PieceId, PieceKind, resource_name};
pub use square::{Cell, col_of, row_of, square_at};

use log::{debug, error};
use shakmaty::{Bitboard, Color, Square};
use thiserror::Error;

use crate::assets::{AssetSource, load_sprite};

/// Setup integrity failures. A board is only handed out when setup succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("square {0} is missing from the grid")]
    SquareMissing(Square),
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),
    #[error("too many pieces in layout")]
    TooManyPieces,
}

/// A single starting placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub square: Square,
    pub side: Color,
    pub kind: PieceKind,
}

/// Starting placements applied by [`BoardState::with_layout`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    placements: Vec<Placement>,
}

impl Layout {
    #[inline]
    pub const fn new() -> Self {
        Self {
            placements: Vec::new(),
        }
    }

    /// Two kings on the e-file, bishops on the c- and f-files.
    pub fn standard() -> Self {
        Self::new()
            .with(Square::E8, Color::Black, PieceKind::King)
            .with(Square::E1, Color::White, PieceKind::King)
            .with(Square::C8, Color::Black, PieceKind::Bishop)
            .with(Square::F8, Color::Black, PieceKind::Bishop)
            .with(Square::C1, Color::White, PieceKind::Bishop)
            .with(Square::F1, Color::White, PieceKind::Bishop)
    }

    #[must_use]
    pub fn with(mut self, square: Square, side: Color, kind: PieceKind) -> Self {
        self.placements.push(Placement { square, side, kind });
        self
    }

    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }
}

/// The 8×8 grid and the side to move.
///
/// Each piece lives in exactly one cell's occupant slot. Moving a piece takes
/// it out of its origin slot and puts it in the destination slot; whatever
/// was in the destination is dropped (a capture).
#[derive(Debug)]
pub struct BoardState {
    cells: [Cell; 64],
    side_to_move: Color,
    next_id: u8,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoardState {
    /// All 64 cells, no pieces, White to move.
    pub fn empty() -> Self {
        Self {
            cells: std::array::from_fn(|idx| Cell::new(Square::new(idx as u32))),
            side_to_move: Color::White,
            next_id: 0,
        }
    }

    /// The standard six-piece setup.
    pub fn initialize(assets: &mut impl AssetSource) -> Result<Self, SetupError> {
        Self::with_layout(&Layout::standard(), assets)
    }

    /// Builds the grid and applies every placement of `layout`.
    ///
    /// Fails if a target cell cannot be found or is already taken.
    pub fn with_layout(layout: &Layout, assets: &mut impl AssetSource) -> Result<Self, SetupError> {
        let mut board = Self::empty();
        for placement in layout.placements() {
            board.spawn(*placement, assets).inspect_err(|err| {
                error!("board setup aborted: {err}");
            })?;
        }
        debug!("board set up with {} pieces", board.occupied().count());
        Ok(board)
    }

    fn spawn(
        &mut self,
        placement: Placement,
        assets: &mut impl AssetSource,
    ) -> Result<PieceId, SetupError> {
        let Placement { square, side, kind } = placement;
        let cell = self
            .cells
            .get(usize::from(square))
            .ok_or(SetupError::SquareMissing(square))?;
        if cell.is_occupied() {
            return Err(SetupError::SquareOccupied(square));
        }

        let id = PieceId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(SetupError::TooManyPieces)?;

        let sprite = load_sprite(assets, &resource_name(side, kind));
        self.cell_mut(square).replace(Piece::new(id, side, kind, sprite));
        Ok(id)
    }

    #[inline]
    fn cell_mut(&mut self, square: Square) -> &mut Cell {
        &mut self.cells[usize::from(square)]
    }

    #[inline]
    pub fn cell(&self, square: Square) -> &Cell {
        &self.cells[usize::from(square)]
    }

    /// All cells in square index order (a1, b1, ..., h8).
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Occupant at grid coordinates; `None` for empty or off-board.
    pub fn occupancy_at(&self, row: i32, col: i32) -> Option<&Piece> {
        square_at(row, col).and_then(|square| self.piece_at(square))
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.cell(square).occupant()
    }

    /// Puts `piece` on `square`, returning the piece it displaced, if any.
    pub fn place_piece(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.cell_mut(square).replace(piece)
    }

    /// Empties `square`, returning its former occupant.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        self.cell_mut(square).take()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Hands the move to the other side. Called once per committed move.
    #[inline]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.other();
    }

    /// Every occupied square.
    pub fn occupied(&self) -> Bitboard {
        self.pieces().map(|(square, _)| square).collect()
    }

    /// Squares occupied by `side`.
    pub fn by_side(&self, side: Color) -> Bitboard {
        self.pieces()
            .filter(|(_, piece)| piece.side() == side)
            .map(|(square, _)| square)
            .collect()
    }

    /// Current square of a piece, found by scanning occupancy.
    pub fn locate(&self, id: PieceId) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.id() == id)
            .map(|(square, _)| square)
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> {
        self.cells
            .iter()
            .filter_map(|cell| cell.occupant().map(|piece| (cell.square(), piece)))
    }
}
