use log::{debug, error, warn};
use shakmaty::{Bitboard, Color, Square};

use crate::board::{BoardState, Piece};
use crate::feedback::{BoardFeedback, FeedbackSource, compute_feedback};
use crate::interaction::{
    BoardGeometry, Drag, InteractionController, Outcome, Point, PointerEvent,
};
use crate::move_gen;
use crate::{BoardDisplay, PointerInput};

/// The piece under the pointer, drawn at `position` instead of on its square.
#[derive(Debug, Clone, Copy)]
pub struct Ghost<'a> {
    pub piece: &'a Piece,
    pub origin: Square,
    pub position: Point,
}

/// Everything the render collaborator needs for one redraw.
#[derive(Debug)]
pub struct Frame<'a> {
    board: &'a BoardState,
    drag: Option<Drag>,
    feedback: BoardFeedback,
}

impl<'a> Frame<'a> {
    pub fn capture(board: &'a BoardState, drag: Option<&Drag>) -> Self {
        let drag = drag.copied();
        let feedback = compute_feedback(&DragView { board, drag });
        Self {
            board,
            drag,
            feedback,
        }
    }

    #[inline]
    pub fn board(&self) -> &'a BoardState {
        self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Origin of the drag in progress, for the highlight border.
    #[inline]
    pub fn origin(&self) -> Option<Square> {
        self.drag.map(|drag| drag.origin)
    }

    pub fn ghost(&self) -> Option<Ghost<'a>> {
        let drag = self.drag?;
        let piece = self.board.piece_at(drag.origin)?;
        Some(Ghost {
            piece,
            origin: drag.origin,
            position: drag.pointer,
        })
    }

    #[inline]
    pub fn feedback(&self) -> &BoardFeedback {
        &self.feedback
    }
}

struct DragView<'a> {
    board: &'a BoardState,
    drag: Option<Drag>,
}

impl FeedbackSource for DragView<'_> {
    fn drag_origin(&self) -> Option<Square> {
        self.drag.map(|drag| drag.origin)
    }

    fn legal_moves(&self, origin: Square) -> Bitboard {
        move_gen::legal_moves(self.board, origin)
    }

    fn opponents(&self) -> Bitboard {
        self.board.by_side(self.board.side_to_move().other())
    }
}

/// A board wired to its interaction controller and display.
///
/// Every event that changes something is followed by a redraw. Display
/// failures are logged; they never reach the board.
#[derive(Debug)]
pub struct Session<D> {
    board: BoardState,
    controller: InteractionController,
    display: D,
}

impl<D: BoardDisplay> Session<D> {
    pub fn new(board: BoardState, geometry: BoardGeometry, display: D) -> Self {
        Self {
            board,
            controller: InteractionController::new(geometry),
            display,
        }
    }

    #[inline]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[inline]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    #[inline]
    pub fn display(&self) -> &D {
        &self.display
    }

    #[inline]
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    #[inline]
    pub fn geometry(&self) -> &BoardGeometry {
        self.controller.geometry()
    }

    /// Snapshot of what should currently be on screen.
    pub fn frame(&self) -> Frame<'_> {
        Frame::capture(&self.board, self.controller.drag())
    }

    /// Swaps in a fresh board and drops any drag in progress.
    pub fn reset(&mut self, board: BoardState) {
        self.board = board;
        self.controller.reset();
        self.refresh();
    }

    pub fn dispatch(&mut self, event: PointerEvent) -> Outcome {
        let outcome = self.controller.handle(&mut self.board, event);
        debug!("{event:?} -> {outcome:?}");
        if outcome.needs_render() {
            self.refresh();
        }
        outcome
    }

    /// Sends the current frame to the display.
    pub fn refresh(&mut self) {
        let frame = Frame::capture(&self.board, self.controller.drag());
        if let Err(err) = self.display.show(&frame) {
            warn!("render failed: {err}");
        }
    }

    /// Feeds events from `input` until it runs dry or fails.
    ///
    /// Returns the number of events dispatched.
    pub fn run(&mut self, input: &mut impl PointerInput) -> usize {
        let mut count = 0;
        loop {
            match input.next_event() {
                Ok(Some(event)) => {
                    self.dispatch(event);
                    count += 1;
                }
                Ok(None) => break,
                Err(err) => {
                    error!("pointer input failed: {err}");
                    break;
                }
            }
        }
        count
    }
}
