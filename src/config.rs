use std::path::PathBuf;

use log::warn;

use crate::interaction::{BoardGeometry, MAX_SQUARE_SIZE};

/// Environment variable overriding [`BoardConfig::asset_dir`].
pub const ASSET_DIR_ENV: &str = "BISHOP_BOARD_ASSETS";

/// Environment variable overriding [`BoardConfig::square_size`].
pub const SQUARE_SIZE_ENV: &str = "BISHOP_BOARD_SQUARE_PX";

/// Host configuration for the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Side length of one square in pixels. The board is 8 squares wide.
    /// At most [`MAX_SQUARE_SIZE`]. Default: 50 (a 400×400 board).
    pub square_size: u32,
    /// Pixels subtracted from the pointer position while dragging, so the
    /// ghost sprite is centred under the cursor. Default: 24.
    pub drag_offset: i32,
    /// Directory holding `<name>.png` piece sprites. Default: `assets`.
    pub asset_dir: PathBuf,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            square_size: 50,
            drag_offset: 24,
            asset_dir: PathBuf::from("assets"),
        }
    }
}

impl BoardConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`. Invalid values are logged and skipped.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ASSET_DIR_ENV) {
            self.asset_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(SQUARE_SIZE_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(size) if (1..=MAX_SQUARE_SIZE).contains(&size) => self.square_size = size,
                _ => warn!(
                    "ignoring {SQUARE_SIZE_ENV}={raw:?}: expected an integer in 1..={MAX_SQUARE_SIZE}"
                ),
            }
        }
        self
    }

    pub fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(self.square_size, self.drag_offset)
    }
}
