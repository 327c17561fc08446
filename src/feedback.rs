use shakmaty::{Bitboard, Square};

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// Legal destination for the held piece
    Destination,
    /// Dropping here captures an opponent piece
    Capture,
    /// Square the held piece was picked up from
    Origin,
}

/// Contains the set of squares and their associated feedback types for the current board state.
///
/// `BoardFeedback` is computed by `compute_feedback()` and consumed by the render collaborator
/// to highlight squares. An empty set means nothing is highlighted, which is the state after
/// every release.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Square, SquareFeedback)>,
}

impl BoardFeedback {
    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Square, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Square) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    /// Check if any feedback exists
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

impl From<Vec<(Square, SquareFeedback)>> for BoardFeedback {
    fn from(squares: Vec<(Square, SquareFeedback)>) -> Self {
        Self { squares }
    }
}

/// Interaction state needed to compute feedback
pub trait FeedbackSource {
    /// Origin square of the piece currently held, if any
    fn drag_origin(&self) -> Option<Square>;

    /// Legal destinations for the piece on `origin`
    fn legal_moves(&self, origin: Square) -> Bitboard;

    /// Squares holding opponent pieces of the side to move
    fn opponents(&self) -> Bitboard;
}

/// Compute visual feedback based on the current drag.
///
/// - Nothing held: no highlights
/// - Piece held: its origin plus every legal destination, captures marked separately
pub fn compute_feedback(source: &impl FeedbackSource) -> BoardFeedback {
    match source.drag_origin() {
        Some(origin) => show_destinations_for(source, origin),
        None => BoardFeedback::default(),
    }
}

/// Show legal destinations when a piece is held
fn show_destinations_for(source: &impl FeedbackSource, origin: Square) -> BoardFeedback {
    let opponents = source.opponents();
    std::iter::once((origin, SquareFeedback::Origin))
        .chain(
            source
                .legal_moves(origin)
                .into_iter()
                .map(|to| classify(to, opponents)),
        )
        .collect::<Vec<_>>()
        .into()
}

/// Classify a destination as either a capture or regular destination
fn classify(to: Square, opponents: Bitboard) -> (Square, SquareFeedback) {
    if opponents.contains(to) {
        (to, SquareFeedback::Capture)
    } else {
        (to, SquareFeedback::Destination)
    }
}
