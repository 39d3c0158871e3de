use std::fmt;
use std::time::Duration;

/// A named preset for how fast the snake moves
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub(crate) fn iter() -> impl Iterator<Item = Difficulty> {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard].into_iter()
    }

    /// Time between movements of the snake
    pub(crate) fn tick_delay(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(200),
            Difficulty::Medium => Duration::from_millis(100),
            Difficulty::Hard => Duration::from_millis(50),
        }
    }

    /// The menu entry that selects this difficulty
    pub(crate) fn choice(self) -> &'static str {
        match self {
            Difficulty::Easy => "1",
            Difficulty::Medium => "2",
            Difficulty::Hard => "3",
        }
    }

    /// Look up the difficulty for a menu entry.  Surrounding whitespace is
    /// ignored; anything else must match exactly.
    pub(crate) fn from_choice(s: &str) -> Option<Difficulty> {
        let s = s.trim();
        Difficulty::iter().find(|d| d.choice() == s)
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
