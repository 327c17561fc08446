pub mod assets;
pub mod board;
pub mod config;
pub mod feedback;
pub mod interaction;
pub mod move_gen;
pub mod session;

pub use interaction::PointerEvent;
pub use session::Frame;

/// Trait for receiving pointer events.
///
/// Abstracts over a real windowing toolkit and scripted/terminal input,
/// providing a uniform interface for [`session::Session`].
pub trait PointerInput {
    /// Error type for input failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Next pending event, or `None` when the stream is exhausted.
    fn next_event(&mut self) -> Result<Option<PointerEvent>, Self::Error>;
}

/// Trait for drawing the board.
///
/// Abstracts over pixel renderers and terminal output, providing a uniform
/// interface for the output side of the event loop. Mirrors [`PointerInput`]
/// on the input side.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Redraw from the given frame.
    ///
    /// Implementations map occupancy, [`feedback::SquareFeedback`] highlights
    /// and the dragged ghost to their own output.
    fn show(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;
}

pub mod mock;
