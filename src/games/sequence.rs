use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Config;
use crate::game::{GameKind, MiniGame, Resolution, Transition};
use crate::level::Level;
use crate::scoring::{sequence_hit, SEQUENCE_MISS};

/// Highest level of the pattern game; the tenth correct answer ends it.
pub const MAX_LEVEL: u32 = 10;

const OPTION_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Red,
    Blue,
    Yellow,
    Green,
    Purple,
    Star,
    Heart,
    Diamond,
}

impl Token {
    pub const PALETTE: [Token; 8] = [
        Token::Red,
        Token::Blue,
        Token::Yellow,
        Token::Green,
        Token::Purple,
        Token::Star,
        Token::Heart,
        Token::Diamond,
    ];

    pub fn glyph(self) -> &'static str {
        match self {
            Token::Red => "🔴",
            Token::Blue => "🔵",
            Token::Yellow => "🟡",
            Token::Green => "🟢",
            Token::Purple => "🟣",
            Token::Star => "⭐",
            Token::Heart => "❤️",
            Token::Diamond => "🔶",
        }
    }
}

/// A repeating cycle to continue, with shuffled answer options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub shown: Vec<Token>,
    pub palette_size: usize,
    pub answer: Token,
    pub options: Vec<Token>,
}

/// Build a cycle of length `3 + level` over the first `min(3 + level, 8)`
/// palette tokens. The answer is the palette token at
/// `pattern_len % palette_size`; up to two other palette tokens join it as
/// distractors.
pub fn generate_pattern<R: Rng + ?Sized>(level: Level, rng: &mut R) -> Pattern {
    let pattern_len = 3 + level.get() as usize;
    let palette_size = pattern_len.min(Token::PALETTE.len());
    let palette = &Token::PALETTE[..palette_size];

    let shown: Vec<Token> = (0..pattern_len).map(|i| palette[i % palette_size]).collect();
    let answer = palette[pattern_len % palette_size];

    let mut options = vec![answer];
    options.extend(
        palette
            .iter()
            .copied()
            .filter(|&t| t != answer)
            .take(OPTION_COUNT - 1),
    );
    options.shuffle(rng);

    Pattern {
        shown,
        palette_size,
        answer,
        options,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Wrong,
}

/// Logic game: pick the token that continues the cycle.
#[derive(Debug, Clone)]
pub struct PatternGame {
    feedback_delay_ms: u32,
    feedback: Option<Feedback>,
}

impl PatternGame {
    pub fn new(feedback_delay_ms: u32) -> Self {
        Self {
            feedback_delay_ms,
            feedback: None,
        }
    }

    /// Outcome of the last answer; meaningful while input is locked.
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }
}

impl Default for PatternGame {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PatternGame {
    fn from(cfg: &Config) -> Self {
        Self::new(cfg.feedback_delay_ms)
    }
}

impl MiniGame for PatternGame {
    type Round = Pattern;
    type Action = Token;

    fn kind(&self) -> GameKind {
        GameKind::Logic
    }

    fn time_limit_secs(&self) -> Option<u32> {
        None
    }

    fn max_level(&self) -> Option<u32> {
        Some(MAX_LEVEL)
    }

    fn generate<R: Rng + ?Sized>(&mut self, level: Level, rng: &mut R) -> Pattern {
        self.feedback = None;
        generate_pattern(level, rng)
    }

    fn apply(&mut self, pattern: &Pattern, pick: Token, level: Level) -> Option<Resolution> {
        if !pattern.options.contains(&pick) {
            return None;
        }

        if pick == pattern.answer {
            self.feedback = Some(Feedback::Correct);
            Some(Resolution::after(
                sequence_hit(level),
                self.feedback_delay_ms,
                Transition::LevelUp,
            ))
        } else {
            self.feedback = Some(Feedback::Wrong);
            Some(Resolution::after(
                SEQUENCE_MISS,
                self.feedback_delay_ms,
                Transition::Stay,
            ))
        }
    }
}
