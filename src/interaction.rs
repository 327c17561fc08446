use log::{debug, info, warn};
use shakmaty::{Color, Square};

use crate::board::{BoardState, PieceId, PieceKind, col_of, row_of, square_at};
use crate::move_gen;

/// Pointer position in board pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Input delivered by the pointer collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    Press(Point),
    Drag(Point),
    Release(Point),
}

/// Largest square size whose whole board still fits in `i32` pixel coordinates.
pub const MAX_SQUARE_SIZE: u32 = (i32::MAX / 8) as u32;

/// Maps pixels to squares on a square board of 8×8 equal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    square_size: u32,
    drag_offset: i32,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::new(50, 24)
    }
}

impl BoardGeometry {
    /// `square_size` is capped at [`MAX_SQUARE_SIZE`]. `drag_offset` is
    /// subtracted from the pointer while dragging so the ghost sprite sits
    /// centred under the cursor.
    pub const fn new(square_size: u32, drag_offset: i32) -> Self {
        let square_size = if square_size > MAX_SQUARE_SIZE {
            MAX_SQUARE_SIZE
        } else {
            square_size
        };
        Self {
            square_size,
            drag_offset,
        }
    }

    /// Width and height of the board in pixels.
    #[inline]
    pub const fn board_size(&self) -> u32 {
        self.square_size * 8
    }

    /// The square under `point`, or `None` when it is off the board.
    pub fn square_at(&self, point: Point) -> Option<Square> {
        let size = self.size();
        if size == 0 || point.x < 0 || point.y < 0 {
            return None;
        }
        square_at(point.y / size, point.x / size)
    }

    /// Pixel centre of `square`.
    pub fn centre_of(&self, square: Square) -> Point {
        let size = self.size();
        let centre = |index: u8| i32::from(index) * size + size / 2;
        Point::new(centre(col_of(square)), centre(row_of(square)))
    }

    fn ghost_position(&self, point: Point) -> Point {
        Point::new(
            point.x.saturating_sub(self.drag_offset),
            point.y.saturating_sub(self.drag_offset),
        )
    }

    #[inline]
    fn size(&self) -> i32 {
        // `new` caps the size well below `i32::MAX`.
        i32::try_from(self.square_size).unwrap_or(0)
    }
}

/// A piece held under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drag {
    pub piece: PieceId,
    pub origin: Square,
    /// Where the ghost sprite is drawn.
    pub pointer: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Drag),
}

/// Result of feeding one pointer event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event has no meaning in the current state.
    Ignored,
    /// Press on an empty square or off the board.
    NothingToPick { square: Option<Square> },
    /// Press on a piece of the side not to move.
    NotYourTurn { square: Square, side: Color },
    PickedUp { piece: PieceId, origin: Square },
    Dragged { pointer: Point },
    Committed {
        piece: PieceId,
        from: Square,
        to: Square,
        captured: Option<(PieceId, PieceKind)>,
    },
    Reverted {
        piece: PieceId,
        origin: Square,
        target: Option<Square>,
    },
}

impl Outcome {
    /// Whether the host should redraw after this outcome.
    ///
    /// A refused press leaves nothing new to show.
    #[inline]
    pub fn needs_render(&self) -> bool {
        !matches!(self, Outcome::Ignored | Outcome::NotYourTurn { .. })
    }

    #[inline]
    pub fn is_commit(&self) -> bool {
        matches!(self, Outcome::Committed { .. })
    }
}

/// Press-drag-release state machine.
///
/// The controller never owns pieces: a held piece stays in its origin cell
/// until the release commits it elsewhere.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    geometry: BoardGeometry,
    state: DragState,
}

impl InteractionController {
    pub fn new(geometry: BoardGeometry) -> Self {
        Self {
            geometry,
            state: DragState::Idle,
        }
    }

    #[inline]
    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    #[inline]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[inline]
    pub fn drag(&self) -> Option<&Drag> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag),
            DragState::Idle => None,
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag().is_some()
    }

    /// Drops any held piece without touching the board.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn handle(&mut self, board: &mut BoardState, event: PointerEvent) -> Outcome {
        match event {
            PointerEvent::Press(point) => self.press(board, point),
            PointerEvent::Drag(point) => self.drag_to(point),
            PointerEvent::Release(point) => self.release(board, point),
        }
    }

    pub fn press(&mut self, board: &BoardState, point: Point) -> Outcome {
        if let DragState::Dragging(drag) = self.state {
            debug!("press at {point:?} ignored while holding {}", drag.piece);
            return Outcome::Ignored;
        }

        let square = self.geometry.square_at(point);
        let Some((origin, piece)) =
            square.and_then(|sq| board.piece_at(sq).map(|piece| (sq, piece)))
        else {
            return Outcome::NothingToPick { square };
        };

        if piece.side() != board.side_to_move() {
            debug!(
                "{:?} to move, {} on {origin} stays put",
                board.side_to_move(),
                piece.char()
            );
            return Outcome::NotYourTurn {
                square: origin,
                side: piece.side(),
            };
        }

        debug!("picked up {} {} from {origin}", piece.char(), piece.id());
        self.state = DragState::Dragging(Drag {
            piece: piece.id(),
            origin,
            pointer: point,
        });
        Outcome::PickedUp {
            piece: piece.id(),
            origin,
        }
    }

    pub fn drag_to(&mut self, point: Point) -> Outcome {
        let ghost = self.geometry.ghost_position(point);
        match &mut self.state {
            DragState::Dragging(drag) => {
                drag.pointer = ghost;
                Outcome::Dragged { pointer: ghost }
            }
            DragState::Idle => Outcome::Ignored,
        }
    }

    pub fn release(&mut self, board: &mut BoardState, point: Point) -> Outcome {
        let DragState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return Outcome::Ignored;
        };

        let target = self.geometry.square_at(point);
        let legal = move_gen::legal_moves(board, drag.origin);

        match target {
            Some(to) if legal.contains(to) => commit(board, drag, to),
            _ => {
                debug!(
                    "move of {} from {} to {target:?} reverted",
                    drag.piece, drag.origin
                );
                Outcome::Reverted {
                    piece: drag.piece,
                    origin: drag.origin,
                    target,
                }
            }
        }
    }
}

/// Transfers the held piece from its origin to `to` and passes the turn.
fn commit(board: &mut BoardState, drag: Drag, to: Square) -> Outcome {
    let Some(piece) = board.remove_piece(drag.origin) else {
        warn!("held piece {} vanished from {}", drag.piece, drag.origin);
        return Outcome::Reverted {
            piece: drag.piece,
            origin: drag.origin,
            target: Some(to),
        };
    };

    let letter = piece.char();
    let captured = board
        .place_piece(to, piece)
        .map(|taken| (taken.id(), taken.kind()));
    board.toggle_side_to_move();

    match captured {
        Some((id, kind)) => info!("{letter} {}x{to}, captured {} {id}", drag.origin, kind.name()),
        None => info!("{letter} {}-{to}", drag.origin),
    }

    Outcome::Committed {
        piece: drag.piece,
        from: drag.origin,
        to,
        captured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NoAssets;
    use crate::board::Layout;
    use test_case::test_case;

    fn standard() -> BoardState {
        BoardState::initialize(&mut NoAssets).unwrap()
    }

    fn controller() -> InteractionController {
        InteractionController::new(BoardGeometry::default())
    }

    #[test_case(Point::new(0, 0), Some(Square::A8))]
    #[test_case(Point::new(49, 49), Some(Square::A8))]
    #[test_case(Point::new(50, 0), Some(Square::B8))]
    #[test_case(Point::new(125, 375), Some(Square::C1))]
    #[test_case(Point::new(399, 399), Some(Square::H1))]
    #[test_case(Point::new(400, 10), None)]
    #[test_case(Point::new(10, 400), None)]
    #[test_case(Point::new(-1, 10), None)]
    fn test_geometry_square_at(point: Point, expected: Option<Square>) {
        assert_eq!(BoardGeometry::default().square_at(point), expected);
    }

    #[test]
    fn test_geometry_centre_round_trips() {
        let geometry = BoardGeometry::default();
        for square in Square::ALL {
            assert_eq!(geometry.square_at(geometry.centre_of(square)), Some(square));
        }
        assert_eq!(geometry.centre_of(Square::C1), Point::new(125, 375));
        assert_eq!(geometry.board_size(), 400);
    }

    #[test_case(1_000_000_000; "beyond the cap")]
    #[test_case(u32::MAX; "u32 max")]
    #[test_case(MAX_SQUARE_SIZE; "at the cap")]
    fn test_geometry_oversized_square_is_capped(square_size: u32) {
        let geometry = BoardGeometry::new(square_size, 24);

        assert_eq!(geometry, BoardGeometry::new(MAX_SQUARE_SIZE, 24));
        assert!(geometry.board_size() <= i32::MAX as u32);
        for square in Square::ALL {
            assert_eq!(geometry.square_at(geometry.centre_of(square)), Some(square));
        }
        assert_eq!(geometry.square_at(Point::new(i32::MAX, 0)), None);
    }

    #[test]
    fn test_drag_near_pixel_limit_saturates() {
        let board = standard();
        let mut ctl = controller();
        ctl.press(&board, Point::new(125, 375));

        let outcome = ctl.drag_to(Point::new(i32::MIN, i32::MIN));

        assert_eq!(outcome, Outcome::Dragged { pointer: Point::new(i32::MIN, i32::MIN) });
    }

    #[test]
    fn test_press_empty_square_stays_idle() {
        let board = standard();
        let mut ctl = controller();

        let outcome = ctl.press(&board, Point::new(175, 175));

        assert_eq!(outcome, Outcome::NothingToPick { square: Some(Square::D5) });
        assert!(outcome.needs_render());
        assert_eq!(ctl.state(), DragState::Idle);
    }

    #[test]
    fn test_press_off_board_stays_idle() {
        let board = standard();
        let mut ctl = controller();

        let outcome = ctl.press(&board, Point::new(500, 20));

        assert_eq!(outcome, Outcome::NothingToPick { square: None });
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_press_opponent_piece_stays_idle() {
        let board = standard();
        let mut ctl = controller();
        let c8 = BoardGeometry::default().centre_of(Square::C8);

        let outcome = ctl.press(&board, c8);

        assert_eq!(
            outcome,
            Outcome::NotYourTurn {
                square: Square::C8,
                side: Color::Black
            }
        );
        assert!(!outcome.needs_render());
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_press_own_piece_starts_drag() {
        let board = standard();
        let mut ctl = controller();
        let point = Point::new(130, 380);

        let outcome = ctl.press(&board, point);

        let id = board.piece_at(Square::C1).unwrap().id();
        assert_eq!(outcome, Outcome::PickedUp { piece: id, origin: Square::C1 });
        assert_eq!(
            ctl.drag(),
            Some(&Drag {
                piece: id,
                origin: Square::C1,
                pointer: point
            })
        );
    }

    #[test]
    fn test_drag_offsets_pointer() {
        let board = standard();
        let mut ctl = controller();
        ctl.press(&board, Point::new(125, 375));

        let outcome = ctl.drag_to(Point::new(100, 300));

        assert_eq!(outcome, Outcome::Dragged { pointer: Point::new(76, 276) });
        assert_eq!(ctl.drag().map(|d| d.pointer), Some(Point::new(76, 276)));
    }

    #[test]
    fn test_events_ignored_while_idle() {
        let mut board = standard();
        let mut ctl = controller();

        assert_eq!(ctl.drag_to(Point::new(10, 10)), Outcome::Ignored);
        assert_eq!(ctl.release(&mut board, Point::new(10, 10)), Outcome::Ignored);
        assert_eq!(board.side_to_move(), Color::White);
    }

    #[test]
    fn test_second_press_while_dragging_ignored() {
        let board = standard();
        let mut ctl = controller();
        let geometry = BoardGeometry::default();
        ctl.press(&board, geometry.centre_of(Square::C1));
        let before = ctl.state();

        let outcome = ctl.press(&board, geometry.centre_of(Square::F1));

        assert_eq!(outcome, Outcome::Ignored);
        assert!(!outcome.needs_render());
        assert_eq!(ctl.state(), before);
    }

    #[test]
    fn test_release_on_legal_square_commits() {
        let mut board = standard();
        let mut ctl = controller();
        let geometry = BoardGeometry::default();
        ctl.press(&board, geometry.centre_of(Square::C1));

        let outcome = ctl.release(&mut board, geometry.centre_of(Square::B2));

        assert!(outcome.is_commit());
        assert_eq!(
            board.piece_at(Square::B2).map(|p| p.kind()),
            Some(PieceKind::Bishop)
        );
        assert!(board.piece_at(Square::C1).is_none());
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(ctl.state(), DragState::Idle);
    }

    #[test_case(Square::C1; "origin")]
    #[test_case(Square::C2; "not diagonal")]
    #[test_case(Square::E1; "own king")]
    fn test_release_on_illegal_square_reverts(target: Square) {
        let mut board = standard();
        let mut ctl = controller();
        let geometry = BoardGeometry::default();
        ctl.press(&board, geometry.centre_of(Square::C1));

        let outcome = ctl.release(&mut board, geometry.centre_of(target));

        assert!(matches!(outcome, Outcome::Reverted { origin: Square::C1, .. }));
        assert!(board.piece_at(Square::C1).is_some());
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(ctl.state(), DragState::Idle);
    }

    #[test]
    fn test_release_off_board_reverts() {
        let mut board = standard();
        let mut ctl = controller();
        ctl.press(&board, Point::new(125, 375));

        let outcome = ctl.release(&mut board, Point::new(640, 480));

        assert!(matches!(outcome, Outcome::Reverted { target: None, .. }));
        assert_eq!(board.occupied().count(), 6);
        assert_eq!(board.side_to_move(), Color::White);
    }

    #[test]
    fn test_capture_drops_opponent() {
        let layout = Layout::new()
            .with(Square::C1, Color::White, PieceKind::Bishop)
            .with(Square::H6, Color::Black, PieceKind::King);
        let mut board = BoardState::with_layout(&layout, &mut NoAssets).unwrap();
        let king = board.piece_at(Square::H6).unwrap().id();
        let mut ctl = controller();
        let geometry = BoardGeometry::default();

        ctl.press(&board, geometry.centre_of(Square::C1));
        let outcome = ctl.release(&mut board, geometry.centre_of(Square::H6));

        assert!(matches!(
            outcome,
            Outcome::Committed {
                to: Square::H6,
                captured: Some((id, PieceKind::King)),
                ..
            } if id == king
        ));
        assert_eq!(board.locate(king), None);
        assert_eq!(board.occupied().count(), 1);
    }
}
