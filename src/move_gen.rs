use log::debug;
use shakmaty::{Bitboard, Square};

use crate::board::{BoardState, PieceKind, col_of, row_of, square_at};

/// Row/column steps of the four diagonals.
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// How a piece kind moves: slide along each direction until the board edge
/// or a blocker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRule {
    pub directions: &'static [(i8, i8)],
}

// Kings have no movement rule on this board.
const KING_RULE: MoveRule = MoveRule { directions: &[] };
const BISHOP_RULE: MoveRule = MoveRule {
    directions: &DIAGONALS,
};

/// Move rule table lookup.
pub const fn rule_for(kind: PieceKind) -> &'static MoveRule {
    match kind {
        PieceKind::King => &KING_RULE,
        PieceKind::Bishop => &BISHOP_RULE,
    }
}

/// Destinations the piece on `origin` may legally move to.
///
/// Each ray stops at the first occupied square, which is included only if it
/// holds an opposing piece. An empty origin yields no moves.
pub fn legal_moves(board: &BoardState, origin: Square) -> Bitboard {
    let Some(piece) = board.piece_at(origin) else {
        debug!("legal moves requested for empty square {origin}");
        return Bitboard::EMPTY;
    };
    let side = piece.side();

    slide(origin, rule_for(piece.kind()), |target| {
        match board.piece_at(target) {
            None => Reach::Continue,
            Some(other) if other.side() != side => Reach::Last,
            Some(_) => Reach::Blocked,
        }
    })
}

/// Squares the piece on `origin` controls.
///
/// Blocking is ignored: every square along each ray up to the board edge is
/// included, whatever occupies it.
pub fn controlled_squares(board: &BoardState, origin: Square) -> Bitboard {
    let Some(piece) = board.piece_at(origin) else {
        debug!("controlled squares requested for empty square {origin}");
        return Bitboard::EMPTY;
    };
    slide(origin, rule_for(piece.kind()), |_| Reach::Continue)
}

/// The legal moves from `origin` that land on an opposing piece.
pub fn captures(board: &BoardState, origin: Square) -> Bitboard {
    legal_moves(board, origin) & board.occupied()
}

/// What happens when a ray reaches a square.
enum Reach {
    /// Include it and keep going.
    Continue,
    /// Include it and end the ray.
    Last,
    /// End the ray without including it.
    Blocked,
}

fn slide(origin: Square, rule: &MoveRule, mut reach: impl FnMut(Square) -> Reach) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    let (row0, col0) = (i32::from(row_of(origin)), i32::from(col_of(origin)));

    for &(dr, dc) in rule.directions {
        let (mut row, mut col) = (row0 + i32::from(dr), col0 + i32::from(dc));
        while let Some(target) = square_at(row, col) {
            match reach(target) {
                Reach::Continue => targets.add(target),
                Reach::Last => {
                    targets.add(target);
                    break;
                }
                Reach::Blocked => break,
            }
            row += i32::from(dr);
            col += i32::from(dc);
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NoAssets;
    use crate::board::Layout;
    use shakmaty::Color;
    use test_case::test_case;

    fn board(layout: Layout) -> BoardState {
        BoardState::with_layout(&layout, &mut NoAssets).expect("valid layout")
    }

    fn squares(list: &[Square]) -> Bitboard {
        list.iter().copied().collect()
    }

    #[test]
    fn test_lone_bishop_reaches_every_diagonal_square() {
        let board = board(Layout::new().with(Square::D4, Color::White, PieceKind::Bishop));

        let moves = legal_moves(&board, Square::D4);

        assert_eq!(moves.count(), 13);
        for sq in [Square::A1, Square::G1, Square::A7, Square::H8, Square::E5] {
            assert!(moves.contains(sq), "{sq} should be reachable");
        }
        assert!(!moves.contains(Square::D4));
        assert!(!moves.contains(Square::D5));
    }

    #[test_case(Square::A1, 7; "corner")]
    #[test_case(Square::H8, 7; "far corner")]
    #[test_case(Square::C1, 7; "edge")]
    #[test_case(Square::E4, 13; "centre")]
    fn test_bishop_move_count_on_empty_board(origin: Square, expected: usize) {
        let board = board(Layout::new().with(origin, Color::Black, PieceKind::Bishop));
        assert_eq!(legal_moves(&board, origin).count(), expected);
    }

    #[test]
    fn test_capture_ends_ray() {
        // Bishop (7,2), opposing king (2,7)
        let board = board(
            Layout::new()
                .with(Square::C1, Color::White, PieceKind::Bishop)
                .with(Square::H6, Color::Black, PieceKind::King),
        );

        let moves = legal_moves(&board, Square::C1);

        assert!(moves.contains(Square::H6), "capture on h6");
        assert_eq!(
            moves,
            squares(&[
                Square::D2,
                Square::E3,
                Square::F4,
                Square::G5,
                Square::H6,
                Square::B2,
                Square::A3,
            ])
        );
        assert_eq!(captures(&board, Square::C1), squares(&[Square::H6]));
    }

    #[test]
    fn test_friendly_piece_blocks_ray() {
        // Bishop (7,2), friendly king (5,4)
        let board = board(
            Layout::new()
                .with(Square::C1, Color::White, PieceKind::Bishop)
                .with(Square::E3, Color::White, PieceKind::King),
        );

        let moves = legal_moves(&board, Square::C1);

        assert_eq!(moves, squares(&[Square::D2, Square::B2, Square::A3]));
        for beyond in [Square::E3, Square::F4, Square::G5, Square::H6] {
            assert!(!moves.contains(beyond), "{beyond} is behind the blocker");
        }
        assert!(captures(&board, Square::C1).is_empty());
    }

    #[test]
    fn test_controlled_squares_ignore_blockers() {
        let board = board(
            Layout::new()
                .with(Square::C1, Color::White, PieceKind::Bishop)
                .with(Square::E3, Color::White, PieceKind::King)
                .with(Square::B2, Color::Black, PieceKind::Bishop),
        );

        let controlled = controlled_squares(&board, Square::C1);

        assert_eq!(
            controlled,
            squares(&[
                Square::D2,
                Square::E3,
                Square::F4,
                Square::G5,
                Square::H6,
                Square::B2,
                Square::A3,
            ])
        );
    }

    #[test]
    fn test_king_has_no_moves() {
        let board = board(Layout::standard());

        assert!(legal_moves(&board, Square::E1).is_empty());
        assert!(legal_moves(&board, Square::E8).is_empty());
        assert!(controlled_squares(&board, Square::E1).is_empty());
    }

    #[test]
    fn test_empty_origin_has_no_moves() {
        let board = board(Layout::standard());
        assert!(legal_moves(&board, Square::D4).is_empty());
        assert!(controlled_squares(&board, Square::D4).is_empty());
    }

    #[test]
    fn test_start_position_bishop_moves() {
        let board = board(Layout::standard());

        let moves = legal_moves(&board, Square::C1);

        assert!(moves.contains(Square::B2));
        assert!(moves.contains(Square::A3));
        assert!(moves.contains(Square::H6));
        assert_eq!(moves.count(), 7);
    }
}
