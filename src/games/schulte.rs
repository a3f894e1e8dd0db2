use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Config;
use crate::game::{GameKind, MiniGame, Resolution, Transition};
use crate::level::Level;
use crate::scoring::{SCHULTE_HIT, SCHULTE_MISS};

/// Side length of the table at `level`: 5x5 first, one larger per clear.
pub fn side_for(level: Level) -> usize {
    4 + level.get() as usize
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchulteGrid {
    pub side: usize,
    pub numbers: Vec<u32>,
}

impl SchulteGrid {
    pub fn last(&self) -> u32 {
        (self.side * self.side) as u32
    }
}

/// The contiguous range `1..=side²`, shuffled.
pub fn generate_table<R: Rng + ?Sized>(level: Level, rng: &mut R) -> SchulteGrid {
    let side = side_for(level);
    let mut numbers: Vec<u32> = (1..=(side * side) as u32).collect();
    numbers.shuffle(rng);
    SchulteGrid { side, numbers }
}

/// Reading-speed game: pick every number in ascending order.
#[derive(Debug, Clone)]
pub struct SchulteTable {
    time_limit_secs: u32,
    regenerate_delay_ms: u32,
    next: u32,
}

impl SchulteTable {
    pub fn new(time_limit_secs: u32, regenerate_delay_ms: u32) -> Self {
        Self {
            time_limit_secs,
            regenerate_delay_ms,
            next: 1,
        }
    }

    /// The number that has to be picked next.
    pub fn target(&self) -> u32 {
        self.next
    }

    pub fn is_cleared(&self, number: u32) -> bool {
        number < self.next
    }
}

impl Default for SchulteTable {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SchulteTable {
    fn from(cfg: &Config) -> Self {
        Self::new(cfg.reading_secs, cfg.regenerate_delay_ms)
    }
}

impl MiniGame for SchulteTable {
    type Round = SchulteGrid;
    /// The number that was picked.
    type Action = u32;

    fn kind(&self) -> GameKind {
        GameKind::Reading
    }

    fn time_limit_secs(&self) -> Option<u32> {
        Some(self.time_limit_secs)
    }

    fn generate<R: Rng + ?Sized>(&mut self, level: Level, rng: &mut R) -> SchulteGrid {
        self.next = 1;
        generate_table(level, rng)
    }

    fn apply(&mut self, grid: &SchulteGrid, number: u32, _level: Level) -> Option<Resolution> {
        if number == 0 || number > grid.last() || self.is_cleared(number) {
            return None;
        }

        if number != self.next {
            return Some(Resolution::stay(SCHULTE_MISS));
        }

        self.next += 1;
        if number == grid.last() {
            Some(Resolution::after(
                SCHULTE_HIT,
                self.regenerate_delay_ms,
                Transition::LevelUp,
            ))
        } else {
            Some(Resolution::stay(SCHULTE_HIT))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn table_is_a_permutation() {
        let grid = generate_table(Level::FIRST, &mut StdRng::seed_from_u64(1));
        assert_eq!(grid.side, 5);
        let mut sorted = grid.numbers.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=25).collect::<Vec<u32>>());
    }

    #[test]
    fn correct_pick_advances_target() {
        let mut game = SchulteTable::default();
        let grid = game.generate(Level::FIRST, &mut StdRng::seed_from_u64(2));

        assert_eq!(game.apply(&grid, 1, Level::FIRST), Some(Resolution::stay(SCHULTE_HIT)));
        assert_eq!(game.target(), 2);
    }

    #[test]
    fn wrong_pick_keeps_target() {
        let mut game = SchulteTable::default();
        let grid = game.generate(Level::FIRST, &mut StdRng::seed_from_u64(3));

        assert_eq!(game.apply(&grid, 7, Level::FIRST), Some(Resolution::stay(SCHULTE_MISS)));
        assert_eq!(game.target(), 1);
    }

    #[test]
    fn cleared_and_out_of_range_numbers_are_rejected() {
        let mut game = SchulteTable::default();
        let grid = game.generate(Level::FIRST, &mut StdRng::seed_from_u64(4));
        game.apply(&grid, 1, Level::FIRST);

        assert_eq!(game.apply(&grid, 1, Level::FIRST), None);
        assert_eq!(game.apply(&grid, 0, Level::FIRST), None);
        assert_eq!(game.apply(&grid, 26, Level::FIRST), None);
    }

    #[test]
    fn clearing_the_table_levels_up() {
        let mut game = SchulteTable::new(45, 500);
        let grid = game.generate(Level::FIRST, &mut StdRng::seed_from_u64(5));
        for n in 1..25 {
            game.apply(&grid, n, Level::FIRST);
        }
        assert_eq!(
            game.apply(&grid, 25, Level::FIRST),
            Some(Resolution::after(SCHULTE_HIT, 500, Transition::LevelUp))
        );

        let bigger = game.generate(Level::new(2).unwrap(), &mut StdRng::seed_from_u64(5));
        assert_eq!(bigger.side, 6);
        assert_eq!(bigger.numbers.len(), 36);
        assert_eq!(game.target(), 1);
    }
}
