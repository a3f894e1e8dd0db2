use rand::Rng;

use crate::config::Config;
use crate::game::{GameKind, MiniGame, Resolution, Transition};
use crate::level::Level;
use crate::scoring::{color_word_hit, COLOR_WORD_MISS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl Hue {
    pub const ALL: [Hue; 5] = [Hue::Red, Hue::Blue, Hue::Green, Hue::Yellow, Hue::Purple];

    pub fn label(self) -> &'static str {
        match self {
            Hue::Red => "RED",
            Hue::Blue => "BLUE",
            Hue::Green => "GREEN",
            Hue::Yellow => "YELLOW",
            Hue::Purple => "PURPLE",
        }
    }
}

/// A color name printed in some ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorWord {
    pub word: Hue,
    pub ink: Hue,
}

impl ColorWord {
    pub fn text(&self) -> &'static str {
        self.word.label()
    }

    pub fn is_matching(&self) -> bool {
        self.text() == self.ink.label()
    }
}

/// Word and ink are drawn independently.
pub fn generate_pair<R: Rng + ?Sized>(rng: &mut R) -> ColorWord {
    let word = Hue::ALL[rng.gen_range(0..Hue::ALL.len())];
    let ink = Hue::ALL[rng.gen_range(0..Hue::ALL.len())];
    ColorWord { word, ink }
}

/// Hemispheric coordination game: judge whether the ink matches the word.
#[derive(Debug, Clone)]
pub struct ColorMatch {
    time_limit_secs: u32,
    streak: u32,
}

impl ColorMatch {
    pub fn new(time_limit_secs: u32) -> Self {
        Self {
            time_limit_secs,
            streak: 0,
        }
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }
}

impl Default for ColorMatch {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ColorMatch {
    fn from(cfg: &Config) -> Self {
        Self::new(cfg.hemispheres_secs)
    }
}

impl MiniGame for ColorMatch {
    type Round = ColorWord;
    /// `true` claims the ink matches the word.
    type Action = bool;

    fn kind(&self) -> GameKind {
        GameKind::Hemispheres
    }

    fn time_limit_secs(&self) -> Option<u32> {
        Some(self.time_limit_secs)
    }

    fn reset(&mut self) {
        self.streak = 0;
    }

    fn generate<R: Rng + ?Sized>(&mut self, _level: Level, rng: &mut R) -> ColorWord {
        generate_pair(rng)
    }

    fn apply(&mut self, pair: &ColorWord, says_match: bool, _level: Level) -> Option<Resolution> {
        let delta = if says_match == pair.is_matching() {
            let points = color_word_hit(self.streak);
            self.streak += 1;
            points
        } else {
            self.streak = 0;
            COLOR_WORD_MISS
        };
        Some(Resolution::then(delta, Transition::Reroll))
    }
}
