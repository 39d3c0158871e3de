mod bounds;
mod direction;
mod snake;
pub(crate) use self::bounds::Bounds;
pub(crate) use self::direction::Direction;
use self::snake::{Snake, Step};
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Text},
    widgets::Widget,
};
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    score: u32,
    snake: Snake,
    food: Option<Position>,
    state: GameState,
    bounds: Bounds,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(bounds: Bounds) -> Self {
        Game::new_with_rng(bounds, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(bounds: Bounds, rng: R) -> Game<R> {
        let mut game = Game {
            rng,
            score: 0,
            snake: Snake::new(bounds.center()),
            food: None,
            state: GameState::Running,
            bounds,
        };
        game.food = game.place_food();
        if game.food.is_none() {
            // A 1x1 grid is already full.
            game.end(EndReason::BoardFilled);
        }
        game
    }

    /// Pick a cell for the next food uniformly at random from the cells the
    /// snake does not occupy.  Returns `None` if the snake fills the grid.
    pub(crate) fn place_food(&mut self) -> Option<Position> {
        let snake = &self.snake;
        self.bounds
            .positions()
            .filter(|&p| !snake.occupies(p))
            .choose(&mut self.rng)
    }

    /// Move the snake one step, eating, growing, or dying as appropriate
    pub(crate) fn advance(&mut self) {
        if !self.running() {
            return;
        }
        match self.snake.peek(self.bounds) {
            Step::Stationary => (),
            Step::Wall => self.end(EndReason::HitWall),
            Step::Body => self.end(EndReason::HitSelf),
            Step::Clear(head) => {
                let eating = self.food == Some(head);
                self.snake.advance(head, eating);
                if eating {
                    self.score += consts::FOOD_REWARD;
                    self.food = self.place_food();
                    tracing::debug!(
                        score = self.score,
                        length = self.snake.len(),
                        food = ?self.food,
                        "Snake ate food"
                    );
                    if self.food.is_none() {
                        self.end(EndReason::BoardFilled);
                    }
                }
            }
        }
    }
}

impl<R> Game<R> {
    /// Turn the snake.  Requests to reverse are ignored, as is everything
    /// once the game is over.
    pub(crate) fn change_direction(&mut self, direction: Direction) {
        if self.running() && self.snake.turn(direction) {
            tracing::trace!(?direction, "Changed direction");
        }
    }

    /// End the game.  Only the first call has any effect.
    pub(crate) fn end(&mut self, reason: EndReason) {
        if self.running() {
            self.state = GameState::Over(reason);
            tracing::info!(
                %reason,
                score = self.score,
                length = self.snake.len(),
                "Game over"
            );
        }
    }

    pub(crate) fn running(&self) -> bool {
        self.state == GameState::Running
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[cfg(test)]
    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    #[cfg(test)]
    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Return the text of the current frame, one line per row
    pub(crate) fn frame_lines(&self) -> Vec<String> {
        let width = usize::from(self.bounds.width());
        let mut lines = Vec::with_capacity(usize::from(self.bounds.height()) + 3);
        for y in 0..self.bounds.height() {
            let mut row = String::with_capacity(width + 2);
            row.push(consts::SIDE_WALL_SYMBOL);
            row.extend((0..self.bounds.width()).map(|x| self.symbol_at(Position::new(x, y))));
            row.push(consts::SIDE_WALL_SYMBOL);
            lines.push(row);
        }
        lines.push(consts::FLOOR_SYMBOL.to_string().repeat(width + 2));
        lines.push(format!("Score: {}", self.score));
        lines.push(String::from(consts::CONTROLS_HINT));
        lines
    }

    fn symbol_at(&self, pos: Position) -> char {
        if pos == self.snake.head() {
            consts::SNAKE_HEAD_SYMBOL
        } else if self.snake.occupies(pos) {
            consts::SNAKE_BODY_SYMBOL
        } else if self.food == Some(pos) {
            consts::FOOD_SYMBOL
        } else {
            ' '
        }
    }
}

#[cfg(test)]
impl<R> Game<R> {
    /// Build a game in an arbitrary mid-play state
    pub(crate) fn from_parts<I: IntoIterator<Item = Position>>(
        bounds: Bounds,
        segments: I,
        direction: Option<Direction>,
        food: Option<Position>,
        rng: R,
    ) -> Game<R> {
        Game {
            rng,
            score: 0,
            snake: Snake {
                segments: segments.into_iter().collect(),
                direction,
            },
            food,
            state: GameState::Running,
            bounds,
        }
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Text::from_iter(self.frame_lines().into_iter().map(Line::from)).render(area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    Running,
    Over(EndReason),
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EndReason {
    HitWall,
    HitSelf,
    /// The snake has filled the grid and there is nowhere left to put food.
    BoardFilled,
    Quit,
    InputFailed,
}

impl EndReason {
    pub(crate) fn message(self) -> &'static str {
        match self {
            EndReason::HitWall => "You hit the wall.",
            EndReason::HitSelf => "You ran into yourself.",
            EndReason::BoardFilled => "You filled the board. You win!",
            EndReason::Quit => "You quit.",
            EndReason::InputFailed => "The keyboard could not be read.",
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EndReason::HitWall => "hit-wall",
            EndReason::HitSelf => "hit-self",
            EndReason::BoardFilled => "board-filled",
            EndReason::Quit => "quit",
            EndReason::InputFailed => "input-failed",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;
    use std::collections::HashSet;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(RNG_SEED)
    }

    fn grid(width: u16, height: u16) -> Bounds {
        Bounds::new(width, height).unwrap()
    }

    fn segments<R>(game: &Game<R>) -> Vec<Position> {
        game.snake().segments().iter().copied().collect()
    }

    #[test]
    fn new_game() {
        let game = Game::new_with_rng(grid(20, 20), rng());
        assert!(game.running());
        assert_eq!(game.score(), 0);
        assert_eq!(segments(&game), [Position::new(10, 10)]);
        assert_eq!(game.snake().direction(), None);
        let food = game.food().unwrap();
        assert!(game.bounds().contains(food));
        assert_ne!(food, Position::new(10, 10));
    }

    #[test]
    fn one_cell_grid_is_already_full() {
        let game = Game::new_with_rng(grid(1, 1), rng());
        assert_eq!(game.food(), None);
        assert_eq!(game.state(), GameState::Over(EndReason::BoardFilled));
    }

    #[test]
    fn stationary_until_first_turn() {
        let mut game = Game::new_with_rng(grid(5, 5), rng());
        for _ in 0..10 {
            game.advance();
        }
        assert!(game.running());
        assert_eq!(segments(&game), [Position::new(2, 2)]);
    }

    #[test]
    fn move_right() {
        let mut game = Game::from_parts(
            grid(5, 5),
            [Position::new(2, 2)],
            Some(Direction::Right),
            Some(Position::new(0, 0)),
            rng(),
        );
        game.advance();
        assert!(game.running());
        assert_eq!(segments(&game), [Position::new(3, 2)]);
        assert_eq!(game.score(), 0);
    }

    #[rstest]
    #[case(Position::new(4, 2), Direction::Right)]
    #[case(Position::new(0, 2), Direction::Left)]
    #[case(Position::new(2, 0), Direction::Up)]
    #[case(Position::new(2, 4), Direction::Down)]
    fn hit_wall(#[case] head: Position, #[case] direction: Direction) {
        let mut game = Game::from_parts(
            grid(5, 5),
            [head],
            Some(direction),
            Some(Position::new(1, 1)),
            rng(),
        );
        game.advance();
        assert_eq!(game.state(), GameState::Over(EndReason::HitWall));
        assert_eq!(segments(&game), [head]);
    }

    #[test]
    fn move_up_along_own_body() {
        let mut game = Game::from_parts(
            grid(5, 5),
            [Position::new(2, 2), Position::new(2, 3), Position::new(2, 4)],
            Some(Direction::Up),
            Some(Position::new(0, 0)),
            rng(),
        );
        game.advance();
        assert!(game.running());
        assert_eq!(
            segments(&game),
            [Position::new(2, 1), Position::new(2, 2), Position::new(2, 3)]
        );
    }

    #[test]
    fn moving_onto_tail_is_collision() {
        let mut game = Game::from_parts(
            grid(5, 5),
            [
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(1, 2),
            ],
            Some(Direction::Down),
            Some(Position::new(4, 4)),
            rng(),
        );
        let before = segments(&game);
        game.advance();
        assert_eq!(game.state(), GameState::Over(EndReason::HitSelf));
        assert_eq!(segments(&game), before);
    }

    #[test]
    fn eat_food() {
        let mut game = Game::from_parts(
            grid(5, 5),
            [Position::new(2, 2), Position::new(1, 2)],
            Some(Direction::Right),
            Some(Position::new(3, 2)),
            rng(),
        );
        game.advance();
        assert!(game.running());
        assert_eq!(game.score(), 10);
        assert_eq!(
            segments(&game),
            [Position::new(3, 2), Position::new(2, 2), Position::new(1, 2)]
        );
        let food = game.food().unwrap();
        assert!(!game.snake().occupies(food));
        assert!(game.bounds().contains(food));
    }

    #[test]
    fn filling_the_board_wins() {
        let mut game = Game::from_parts(
            grid(2, 2),
            [Position::new(0, 1), Position::new(0, 0), Position::new(1, 0)],
            Some(Direction::Right),
            Some(Position::new(1, 1)),
            rng(),
        );
        game.advance();
        assert_eq!(game.state(), GameState::Over(EndReason::BoardFilled));
        assert_eq!(game.score(), 10);
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.food(), None);
    }

    #[test]
    fn reversal_is_ignored() {
        let mut game = Game::new_with_rng(grid(5, 5), rng());
        game.change_direction(Direction::Up);
        game.change_direction(Direction::Down);
        assert_eq!(game.snake().direction(), Some(Direction::Up));
    }

    #[test]
    fn game_over_is_final() {
        let mut game = Game::from_parts(
            grid(5, 5),
            [Position::new(4, 2)],
            Some(Direction::Right),
            Some(Position::new(0, 0)),
            rng(),
        );
        game.advance();
        assert_eq!(game.state(), GameState::Over(EndReason::HitWall));
        game.end(EndReason::Quit);
        game.change_direction(Direction::Up);
        game.advance();
        assert_eq!(game.state(), GameState::Over(EndReason::HitWall));
        assert_eq!(game.snake().direction(), Some(Direction::Right));
        assert_eq!(segments(&game), [Position::new(4, 2)]);
    }

    #[test]
    fn place_food_avoids_snake() {
        let mut game = Game::from_parts(
            grid(3, 3),
            [
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(1, 1),
                Position::new(0, 1),
                Position::new(0, 2),
            ],
            None,
            None,
            rng(),
        );
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let food = game.place_food().unwrap();
            assert!(!game.snake().occupies(food));
            seen.insert(food);
        }
        assert_eq!(
            seen,
            HashSet::from([Position::new(1, 2), Position::new(2, 2)])
        );
    }

    /// Drive a game with a scripted sequence of turns and check the
    /// invariants after every tick.
    #[test]
    fn invariants_hold_during_play() {
        let turns = [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Right,
            Direction::Up,
        ];
        let mut game = Game::new_with_rng(grid(8, 6), rng());
        let mut tick = 0usize;
        while game.running() && tick < 500 {
            if tick % 3 == 0 {
                game.change_direction(turns[(tick / 3) % turns.len()]);
            }
            let len = game.snake().len();
            let score = game.score();
            let food = game.food();
            let next = game.snake().peek(game.bounds());
            game.advance();
            if game.running() {
                let ate = matches!(next, Step::Clear(p) if Some(p) == food);
                if ate {
                    assert_eq!(game.snake().len(), len + 1);
                    assert_eq!(game.score(), score + 10);
                } else {
                    assert_eq!(game.snake().len(), len);
                    assert_eq!(game.score(), score);
                }
                let cells = game.snake().segments().iter().collect::<HashSet<_>>();
                assert_eq!(cells.len(), game.snake().len());
                if let Some(food) = game.food() {
                    assert!(!game.snake().occupies(food));
                }
            }
            tick += 1;
        }
    }

    #[test]
    fn render_frame() {
        let game = Game::from_parts(
            grid(5, 5),
            [Position::new(2, 2), Position::new(2, 3), Position::new(1, 3)],
            Some(Direction::Up),
            Some(Position::new(4, 0)),
            rng(),
        );
        let area = Rect::new(0, 0, 27, 8);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "|    *|                    ",
            "|     |                    ",
            "|  O  |                    ",
            "| oo  |                    ",
            "|     |                    ",
            "-------                    ",
            "Score: 0                   ",
            "Controls: W A S D | Quit: X",
        ]);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn frame_lines_after_eating() {
        let mut game = Game::from_parts(
            grid(3, 1),
            [Position::new(0, 0)],
            Some(Direction::Right),
            Some(Position::new(1, 0)),
            rng(),
        );
        game.advance();
        let lines = game.frame_lines();
        assert_eq!(lines[0], "|oO*|");
        assert_eq!(lines[1], "-----");
        assert_eq!(lines[2], "Score: 10");
    }
}
