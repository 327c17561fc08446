use std::collections::VecDeque;
use std::convert::Infallible;

use shakmaty::Square;
use thiserror::Error;

use crate::PointerInput;
use crate::interaction::{BoardGeometry, Point, PointerEvent};

/// Error when parsing a pointer script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown event '{0}': expected v (press), ~ (drag) or ^ (release)")]
    UnknownEvent(String),
    #[error("invalid square notation: '{0}'")]
    InvalidSquare(String),
    #[error("invalid pixel position: '{0}'")]
    InvalidPoint(String),
}

/// A scriptable pointer that replays events on demand.
///
/// Square targets resolve to the pixel centre of that square, so scripts
/// stay valid whatever the square size. New script can be appended at any
/// time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPointer {
    geometry: BoardGeometry,
    pending: VecDeque<PointerEvent>,
}

impl ScriptedPointer {
    pub fn new(geometry: BoardGeometry) -> Self {
        Self {
            geometry,
            pending: VecDeque::new(),
        }
    }

    /// Parse and queue additional script.
    ///
    /// Format: whitespace-separated events, each a marker followed by a target.
    /// - `v` press, `~` drag, `^` release
    /// - target is a square (`c1`) or a pixel position (`@125,375`)
    ///
    /// Examples:
    /// - `"vc1 ~b2 ^b2"` - pick up c1, drag over b2, drop on b2
    /// - `"v@130,380 ^@500,20"` - press near c1, release off the board
    ///
    /// Nothing is queued if any event fails to parse.
    pub fn push_script(&mut self, script: &str) -> Result<(), ScriptError> {
        let events = script
            .split_whitespace()
            .map(|token| parse_event(token, &self.geometry))
            .collect::<Result<Vec<_>, _>>()?;
        self.pending.extend(events);
        Ok(())
    }

    /// Queue a full press, drag and release from `from` to `to`.
    pub fn push_move(&mut self, from: Square, to: Square) {
        let start = self.geometry.centre_of(from);
        let end = self.geometry.centre_of(to);
        self.pending.extend([
            PointerEvent::Press(start),
            PointerEvent::Drag(end),
            PointerEvent::Release(end),
        ]);
    }

    /// Pop the next pending event.
    pub fn tick(&mut self) -> Option<PointerEvent> {
        self.pending.pop_front()
    }

    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Execute all pending events, calling the provided callback for each.
    pub fn drain<F>(&mut self, mut on_event: F)
    where
        F: FnMut(PointerEvent),
    {
        while let Some(event) = self.tick() {
            on_event(event);
        }
    }
}

impl PointerInput for ScriptedPointer {
    type Error = Infallible;

    fn next_event(&mut self) -> Result<Option<PointerEvent>, Self::Error> {
        Ok(self.tick())
    }
}

fn parse_event(token: &str, geometry: &BoardGeometry) -> Result<PointerEvent, ScriptError> {
    let mut chars = token.chars();
    let marker = chars.next();
    let target = chars.as_str();
    let point = parse_target(target, geometry);
    match marker {
        Some('v') => point.map(PointerEvent::Press),
        Some('~') => point.map(PointerEvent::Drag),
        Some('^') => point.map(PointerEvent::Release),
        _ => Err(ScriptError::UnknownEvent(token.to_string())),
    }
}

fn parse_target(target: &str, geometry: &BoardGeometry) -> Result<Point, ScriptError> {
    if let Some(pixels) = target.strip_prefix('@') {
        let invalid = || ScriptError::InvalidPoint(target.to_string());
        let (x, y) = pixels.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse().map_err(|_| invalid())?;
        let y = y.trim().parse().map_err(|_| invalid())?;
        return Ok(Point::new(x, y));
    }

    let square: Square = target
        .parse()
        .map_err(|_| ScriptError::InvalidSquare(target.to_string()))?;
    Ok(geometry.centre_of(square))
}
