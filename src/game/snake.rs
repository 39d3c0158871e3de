use super::bounds::Bounds;
use super::direction::Direction;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake: the cells it covers and where it is heading.
///
/// All positions are relative to the top-left corner of the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells occupied by the snake, head first
    pub(super) segments: VecDeque<Position>,

    /// The direction the snake is heading in, or `None` if it has not started
    /// moving yet
    pub(super) direction: Option<Direction>,
}

/// Where the snake's head would go on its next step
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    /// No direction has been chosen yet
    Stationary,
    /// The head would leave the grid
    Wall,
    /// The head would land on one of the snake's own cells
    Body,
    Clear(Position),
}

impl Snake {
    /// Create a motionless one-cell snake at `head`
    pub(super) fn new(head: Position) -> Snake {
        Snake {
            segments: VecDeque::from([head]),
            direction: None,
        }
    }

    pub(crate) fn head(&self) -> Position {
        self.segments[0]
    }

    /// Return the cells occupied by the snake, head first
    #[cfg(test)]
    pub(crate) fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    #[cfg(test)]
    pub(crate) fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Change the snake's direction to `direction` unless that would reverse
    /// it.  Returns whether the direction was accepted.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if self.direction == Some(direction.reverse()) {
            false
        } else {
            self.direction = Some(direction);
            true
        }
    }

    /// Work out where the head would go next without moving.  The tail still
    /// counts as occupied even though a plain move would vacate it.
    pub(super) fn peek(&self, bounds: Bounds) -> Step {
        let Some(direction) = self.direction else {
            return Step::Stationary;
        };
        match direction.advance(self.head(), bounds) {
            None => Step::Wall,
            Some(pos) if self.occupies(pos) => Step::Body,
            Some(pos) => Step::Clear(pos),
        }
    }

    /// Move the head to `head`, keeping the tail when `grow` is true
    pub(super) fn advance(&mut self, head: Position, grow: bool) {
        self.segments.push_front(head);
        if !grow {
            let _ = self.segments.pop_back();
        }
    }
}
