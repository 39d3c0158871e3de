use crate::consts;
use ratatui::layout::{Position, Positions, Rect, Size};
use serde::Deserialize;
use thiserror::Error;

/// The dimensions of the playing field.  Cells are addressed from the
/// top-left corner, `(0, 0)`, to `(width - 1, height - 1)`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawBounds")]
pub(crate) struct Bounds {
    width: u16,
    height: u16,
}

impl Bounds {
    pub(crate) fn new(width: u16, height: u16) -> Result<Bounds, BoundsError> {
        if width == 0 || height == 0 {
            Err(BoundsError::Empty { width, height })
        } else if width > consts::MAX_GRID_SIDE || height > consts::MAX_GRID_SIDE {
            Err(BoundsError::TooLarge { width, height })
        } else {
            Ok(Bounds { width, height })
        }
    }

    pub(crate) fn width(self) -> u16 {
        self.width
    }

    pub(crate) fn height(self) -> u16 {
        self.height
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// The cell the snake starts on
    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Iterate over every cell, row by row
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds {
            width: consts::DEFAULT_GRID_WIDTH,
            height: consts::DEFAULT_GRID_HEIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
struct RawBounds {
    width: u16,
    height: u16,
}

impl Default for RawBounds {
    fn default() -> RawBounds {
        RawBounds {
            width: consts::DEFAULT_GRID_WIDTH,
            height: consts::DEFAULT_GRID_HEIGHT,
        }
    }
}

impl TryFrom<RawBounds> for Bounds {
    type Error = BoundsError;

    fn try_from(value: RawBounds) -> Result<Bounds, BoundsError> {
        Bounds::new(value.width, value.height)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum BoundsError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    Empty { width: u16, height: u16 },
    #[error(
        "grid may be at most {max}x{max}, got {width}x{height}",
        max = consts::MAX_GRID_SIDE
    )]
    TooLarge { width: u16, height: u16 },
}
