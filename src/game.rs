use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::level::Level;

/// The six training categories, one mini-game each.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Attention,
    Memory,
    Hemispheres,
    Reading,
    Logic,
    Thinking,
}

impl GameKind {
    pub const ALL: [GameKind; 6] = [
        GameKind::Attention,
        GameKind::Memory,
        GameKind::Hemispheres,
        GameKind::Reading,
        GameKind::Logic,
        GameKind::Thinking,
    ];

    pub fn title(self) -> &'static str {
        match self {
            GameKind::Attention => "Shape Hunt",
            GameKind::Memory => "Memory Pairs",
            GameKind::Hemispheres => "Color & Word",
            GameKind::Reading => "Schulte Table",
            GameKind::Logic => "Continue the Pattern",
            GameKind::Thinking => "Critical Thinking",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            GameKind::Attention => "Find every shape of the target color. Mistakes cost points!",
            GameKind::Memory => "Find all matching pairs. Fewer moves, more points!",
            GameKind::Hemispheres => "Does the ink color match the written word?",
            GameKind::Reading => "Pick the numbers in order, starting from 1.",
            GameKind::Logic => "Spot the pattern and choose what comes next.",
            GameKind::Thinking => "Answer the reasoning questions.",
        }
    }
}

/// What the session does after an action has been scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep the current round.
    Stay,
    /// Draw a fresh round at the same level.
    Reroll,
    /// Advance one level and draw a fresh round.
    LevelUp,
    /// Ask the game to settle the current round via [`MiniGame::resolve`].
    Resolve,
    /// End the session.
    Finish,
}

/// Outcome of one action: a score delta plus the follow-up transition.
///
/// With a delay the session locks input and runs `then` once the delay
/// has elapsed; without one `then` runs immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub delta: i32,
    pub then: Transition,
    pub delay_ms: Option<u32>,
}

impl Resolution {
    pub fn stay(delta: i32) -> Self {
        Self {
            delta,
            then: Transition::Stay,
            delay_ms: None,
        }
    }

    pub fn then(delta: i32, then: Transition) -> Self {
        Self {
            delta,
            then,
            delay_ms: None,
        }
    }

    pub fn after(delta: i32, delay_ms: u32, then: Transition) -> Self {
        Self {
            delta,
            then,
            delay_ms: Some(delay_ms),
        }
    }
}

/// Capability set shared by all mini-games: generate a round, score an
/// action against it, and report when the session has nothing left to play.
///
/// The round itself is immutable; progress within it (found cells, flipped
/// cards, streaks, move counts) lives in the implementor and is reset by
/// [`MiniGame::generate`] or [`MiniGame::reset`].
pub trait MiniGame {
    type Round;
    type Action;

    fn kind(&self) -> GameKind;

    /// Seconds on the clock, or `None` for untimed games.
    fn time_limit_secs(&self) -> Option<u32>;

    /// Highest playable level. Levelling past it finishes the session.
    fn max_level(&self) -> Option<u32> {
        None
    }

    /// Clear per-session progress before a fresh start.
    fn reset(&mut self) {}

    fn generate<R: Rng + ?Sized>(&mut self, level: Level, rng: &mut R) -> Self::Round;

    /// Score `action`. `None` means the action targets something that is
    /// not selectable right now and has no effect.
    fn apply(&mut self, round: &Self::Round, action: Self::Action, level: Level)
        -> Option<Resolution>;

    /// Settle a round after a [`Transition::Resolve`] delay.
    fn resolve(&mut self, _round: &Self::Round, _level: Level) -> Resolution {
        Resolution::stay(0)
    }

    /// Map the accumulated score to the one reported to the host.
    fn final_score(&self, raw: u32) -> u32 {
        raw
    }
}
