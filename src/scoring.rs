//! Scoring rules for the mini-games.
//!
//! Every rule is a pure function from a round outcome to a signed delta.
//! Deltas are applied to a [`Score`], which never drops below zero.

use crate::level::Level;

/// Accumulated session points, floored at zero after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score(u32);

impl Score {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Apply a delta, clamping at zero. Returns the delta actually applied.
    pub fn apply(&mut self, delta: i32) -> i32 {
        let before = self.0;
        self.0 = if delta >= 0 {
            self.0.saturating_add(delta.unsigned_abs())
        } else {
            self.0.saturating_sub(delta.unsigned_abs())
        };
        self.0 as i32 - before as i32
    }
}

/// Shape hunt: a target shape was found.
pub const SHAPE_FOUND: i32 = 10;
/// Shape hunt: a non-target cell was picked.
pub const SHAPE_MISS: i32 = -5;

/// Color/word: points for a correct judgment given the streak before it.
pub fn color_word_hit(streak: u32) -> i32 {
    10 + (streak / 3) as i32 * 5
}

/// Color/word: wrong judgment. The streak resets as well.
pub const COLOR_WORD_MISS: i32 = -5;

/// Sequence: the correct continuation was picked at `level`.
pub fn sequence_hit(level: Level) -> i32 {
    level.get() as i32 * 15
}

/// Sequence: a distractor was picked.
pub const SEQUENCE_MISS: i32 = -10;

/// Pairs: two flipped cards matched.
pub const PAIR_MATCH: i32 = 20;
/// Pairs: two flipped cards differed.
pub const PAIR_MISS: i32 = -5;
/// Pairs: deducted per move when the session ends.
pub const PAIR_MOVE_PENALTY: u32 = 2;

/// Pairs: final score once the move penalty is taken off.
pub fn pairs_final(raw: u32, moves: u32) -> u32 {
    raw.saturating_sub(moves.saturating_mul(PAIR_MOVE_PENALTY))
}

/// Schulte table: the next number in order was picked.
pub const SCHULTE_HIT: i32 = 5;
/// Schulte table: any other uncleared number was picked.
pub const SCHULTE_MISS: i32 = -2;

/// Question bank: correct answer. Wrong answers cost nothing.
pub const QUIZ_CORRECT: i32 = 25;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_floors_at_zero() {
        let mut score = Score::new();
        assert_eq!(score.apply(-5), 0);
        assert_eq!(score.get(), 0);

        score.apply(8);
        assert_eq!(score.apply(-10), -8);
        assert_eq!(score.get(), 0);
    }

    #[test]
    fn score_reports_applied_delta() {
        let mut score = Score::new();
        assert_eq!(score.apply(30), 30);
        assert_eq!(score.apply(-5), -5);
        assert_eq!(score.get(), 25);
    }

    #[test]
    fn streak_bonus_steps_every_three() {
        assert_eq!(color_word_hit(0), 10);
        assert_eq!(color_word_hit(2), 10);
        assert_eq!(color_word_hit(3), 15);
        assert_eq!(color_word_hit(6), 20);
        assert_eq!(color_word_hit(8), 20);
    }

    #[test]
    fn sequence_scales_with_level() {
        assert_eq!(sequence_hit(Level::FIRST), 15);
        assert_eq!(sequence_hit(Level::new(4).unwrap()), 60);
    }

    #[test]
    fn pairs_penalty_is_floored() {
        assert_eq!(pairs_final(160, 10), 140);
        assert_eq!(pairs_final(10, 20), 0);
        assert_eq!(pairs_final(0, 0), 0);
    }
}
