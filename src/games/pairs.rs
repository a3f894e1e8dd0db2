use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Config;
use crate::game::{GameKind, MiniGame, Resolution, Transition};
use crate::level::Level;
use crate::scoring::{pairs_final, PAIR_MATCH, PAIR_MISS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fruit {
    Apple,
    Banana,
    Grapes,
    Strawberry,
    Orange,
    Watermelon,
    Peach,
    Kiwi,
}

impl Fruit {
    pub const ALL: [Fruit; 8] = [
        Fruit::Apple,
        Fruit::Banana,
        Fruit::Grapes,
        Fruit::Strawberry,
        Fruit::Orange,
        Fruit::Watermelon,
        Fruit::Peach,
        Fruit::Kiwi,
    ];

    pub fn glyph(self) -> &'static str {
        match self {
            Fruit::Apple => "🍎",
            Fruit::Banana => "🍌",
            Fruit::Grapes => "🍇",
            Fruit::Strawberry => "🍓",
            Fruit::Orange => "🍊",
            Fruit::Watermelon => "🍉",
            Fruit::Peach => "🍑",
            Fruit::Kiwi => "🥝",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Fruit>,
}

/// Two of every fruit, shuffled.
pub fn generate_deck<R: Rng + ?Sized>(rng: &mut R) -> Deck {
    let mut cards: Vec<Fruit> = Fruit::ALL.iter().chain(Fruit::ALL.iter()).copied().collect();
    cards.shuffle(rng);
    Deck { cards }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    FaceDown,
    FaceUp,
    Matched,
}

/// Memory game: flip two cards at a time looking for pairs. Each second
/// flip counts as a move, and every move costs two points at the end.
#[derive(Debug, Clone)]
pub struct MemoryPairs {
    time_limit_secs: u32,
    match_delay_ms: u32,
    miss_delay_ms: u32,
    finish_delay_ms: u32,
    states: Vec<CardState>,
    flipped: Vec<usize>,
    moves: u32,
}

impl MemoryPairs {
    pub fn new(time_limit_secs: u32) -> Self {
        Self::from(&Config {
            memory_secs: time_limit_secs,
            ..Config::default()
        })
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn card_state(&self, card: usize) -> Option<CardState> {
        self.states.get(card).copied()
    }

    pub fn all_matched(&self) -> bool {
        !self.states.is_empty() && self.states.iter().all(|&s| s == CardState::Matched)
    }
}

impl Default for MemoryPairs {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for MemoryPairs {
    fn from(cfg: &Config) -> Self {
        Self {
            time_limit_secs: cfg.memory_secs,
            match_delay_ms: cfg.pair_match_delay_ms,
            miss_delay_ms: cfg.pair_miss_delay_ms,
            finish_delay_ms: cfg.finish_delay_ms,
            states: Vec::new(),
            flipped: Vec::with_capacity(2),
            moves: 0,
        }
    }
}

impl MiniGame for MemoryPairs {
    type Round = Deck;
    /// Index of the card to flip.
    type Action = usize;

    fn kind(&self) -> GameKind {
        GameKind::Memory
    }

    fn time_limit_secs(&self) -> Option<u32> {
        Some(self.time_limit_secs)
    }

    fn reset(&mut self) {
        self.moves = 0;
    }

    fn generate<R: Rng + ?Sized>(&mut self, _level: Level, rng: &mut R) -> Deck {
        let deck = generate_deck(rng);
        self.states = vec![CardState::FaceDown; deck.cards.len()];
        self.flipped.clear();
        deck
    }

    fn apply(&mut self, deck: &Deck, card: usize, _level: Level) -> Option<Resolution> {
        if self.flipped.len() == 2 || self.card_state(card)? != CardState::FaceDown {
            return None;
        }

        self.states[card] = CardState::FaceUp;
        self.flipped.push(card);
        if self.flipped.len() < 2 {
            return Some(Resolution::stay(0));
        }

        self.moves += 1;
        let delay = if self.flipped_match(deck) {
            self.match_delay_ms
        } else {
            self.miss_delay_ms
        };
        Some(Resolution::after(0, delay, Transition::Resolve))
    }

    fn resolve(&mut self, deck: &Deck, _level: Level) -> Resolution {
        if self.flipped.len() != 2 {
            self.flipped.clear();
            return Resolution::stay(0);
        }

        let matched = self.flipped_match(deck);
        let settled = if matched {
            CardState::Matched
        } else {
            CardState::FaceDown
        };
        for card in self.flipped.drain(..) {
            self.states[card] = settled;
        }

        if !matched {
            Resolution::stay(PAIR_MISS)
        } else if self.all_matched() {
            Resolution::after(PAIR_MATCH, self.finish_delay_ms, Transition::Finish)
        } else {
            Resolution::stay(PAIR_MATCH)
        }
    }

    fn final_score(&self, raw: u32) -> u32 {
        pairs_final(raw, self.moves)
    }
}

impl MemoryPairs {
    fn flipped_match(&self, deck: &Deck) -> bool {
        match self.flipped.as_slice() {
            [a, b] => deck.cards.get(*a) == deck.cards.get(*b),
            _ => false,
        }
    }
}
