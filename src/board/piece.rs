use shakmaty::{Color, Role};

use crate::assets::Sprite;

/// Identity of a piece, assigned in placement order when a board is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u8);

impl PieceId {
    #[inline]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Movement capability of a piece.
///
/// Each kind owns one entry in the move rule table
/// (see [`crate::move_gen::rule_for`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Bishop,
}

impl PieceKind {
    /// The matching chess role, used for notation and display letters.
    #[inline]
    pub const fn role(self) -> Role {
        match self {
            PieceKind::King => Role::King,
            PieceKind::Bishop => Role::Bishop,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::King => "king",
            PieceKind::Bishop => "bishop",
        }
    }
}

/// Asset name of the sprite for a piece, e.g. `"wbishop"` or `"bking"`.
pub fn resource_name(side: Color, kind: PieceKind) -> String {
    format!("{}{}", side.char(), kind.name())
}

/// A piece on the board.
///
/// Not `Clone`: the square holding a piece is its only owner, so moving a
/// piece always transfers it out of one slot and into another.
#[derive(Debug)]
pub struct Piece {
    id: PieceId,
    side: Color,
    kind: PieceKind,
    sprite: Option<Sprite>,
}

impl Piece {
    pub fn new(id: PieceId, side: Color, kind: PieceKind, sprite: Option<Sprite>) -> Self {
        Self {
            id,
            side,
            kind,
            sprite,
        }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Image handle, or `None` when the asset failed to load.
    #[inline]
    pub fn sprite(&self) -> Option<&Sprite> {
        self.sprite.as_ref()
    }

    /// Notation letter: uppercase for White, lowercase for Black.
    pub fn char(&self) -> char {
        let role = self.kind.role();
        self.side.fold_wb(role.upper_char(), role.char())
    }
}
