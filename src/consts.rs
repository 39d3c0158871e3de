//! Assorted constants & hard-coded configuration
use std::time::Duration;

/// Grid width used when neither the configuration file nor the command line
/// sets one
pub(crate) const DEFAULT_GRID_WIDTH: u16 = 20;

/// Grid height used when neither the configuration file nor the command line
/// sets one
pub(crate) const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Largest grid width or height accepted from the configuration file or the
/// command line
pub(crate) const MAX_GRID_SIDE: u16 = 200;

/// Points awarded for each food eaten
pub(crate) const FOOD_REWARD: u32 = 10;

/// Longest time the input thread waits for a key before checking whether it
/// should stop
pub(crate) const KEY_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Glyph for the snake's head
pub(crate) const SNAKE_HEAD_SYMBOL: char = 'O';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = 'o';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '*';

/// Glyph drawn on either side of each grid row
pub(crate) const SIDE_WALL_SYMBOL: char = '|';

/// Glyph for the rule drawn under the grid
pub(crate) const FLOOR_SYMBOL: char = '-';

/// Line shown under the score
pub(crate) const CONTROLS_HINT: &str = "Controls: W A S D | Quit: X";

/// Number of lines in a frame besides the grid rows: the floor, the score,
/// and the controls hint
pub(crate) const FRAME_EXTRA_LINES: u16 = 3;

/// Environment variable that overrides the configured log filter
pub(crate) const LOG_ENV_VAR: &str = "TERMSNAKE_LOG";
