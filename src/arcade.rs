use crate::config::Config;
use crate::game::{GameKind, MiniGame};
use crate::games::{ColorMatch, MemoryPairs, PatternGame, QuestionBank, SchulteTable, ShapeHunt};
use crate::level::Level;
use crate::session::{Host, Phase, Session};

/// A running session of any of the six games.
pub enum ActiveGame {
    Attention(Session<ShapeHunt>),
    Memory(Session<MemoryPairs>),
    Hemispheres(Session<ColorMatch>),
    Reading(Session<SchulteTable>),
    Logic(Session<PatternGame>),
    Thinking(Session<QuestionBank>),
}

macro_rules! each {
    ($game:expr, $s:ident => $body:expr) => {
        match $game {
            ActiveGame::Attention($s) => $body,
            ActiveGame::Memory($s) => $body,
            ActiveGame::Hemispheres($s) => $body,
            ActiveGame::Reading($s) => $body,
            ActiveGame::Logic($s) => $body,
            ActiveGame::Thinking($s) => $body,
        }
    };
}

fn mount<G: MiniGame>(game: G, cfg: &Config, host: impl Host + 'static) -> Session<G> {
    match cfg.seed {
        Some(seed) => Session::seeded(game, seed, host),
        None => Session::new(game, host),
    }
}

impl ActiveGame {
    /// Build an idle session for `kind` configured from `cfg`.
    pub fn launch(kind: GameKind, cfg: &Config, host: impl Host + 'static) -> Self {
        match kind {
            GameKind::Attention => Self::Attention(mount(ShapeHunt::from(cfg), cfg, host)),
            GameKind::Memory => Self::Memory(mount(MemoryPairs::from(cfg), cfg, host)),
            GameKind::Hemispheres => Self::Hemispheres(mount(ColorMatch::from(cfg), cfg, host)),
            GameKind::Reading => Self::Reading(mount(SchulteTable::from(cfg), cfg, host)),
            GameKind::Logic => Self::Logic(mount(PatternGame::from(cfg), cfg, host)),
            GameKind::Thinking => Self::Thinking(mount(QuestionBank::default(), cfg, host)),
        }
    }

    pub fn kind(&self) -> GameKind {
        each!(self, s => s.kind())
    }

    pub fn phase(&self) -> Phase {
        each!(self, s => s.phase())
    }

    pub fn score(&self) -> u32 {
        each!(self, s => s.score())
    }

    pub fn level(&self) -> Level {
        each!(self, s => s.level())
    }

    pub fn time_remaining(&self) -> Option<u32> {
        each!(self, s => s.time_remaining())
    }

    pub fn input_locked(&self) -> bool {
        each!(self, s => s.input_locked())
    }

    pub fn final_score(&self) -> Option<u32> {
        each!(self, s => s.final_score())
    }

    pub fn start(&mut self) {
        each!(self, s => s.start())
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        each!(self, s => s.advance(elapsed_ms))
    }

    pub fn finish(&mut self) {
        each!(self, s => s.finish())
    }

    pub fn close(self) {
        each!(self, s => s.close())
    }
}
