use std::sync::mpsc::Sender;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::game::{GameKind, MiniGame, Resolution, Transition};
use crate::level::Level;
use crate::scoring::Score;
use crate::timer::{Timers, SECOND_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Finished,
}

/// Why an action had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// The session is idle or already finished.
    NotActive,
    /// Feedback from the previous action is still showing.
    InputLocked,
    /// The action targets something that cannot be selected right now.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The action was scored; `delta` is the change after the zero floor.
    Applied { delta: i32 },
    Ignored(Ignored),
}

/// The page or program hosting a session.
pub trait Host {
    /// Called exactly once per session, with the final score.
    fn on_complete(&mut self, kind: GameKind, score: u32);
    /// Called when the host tears the session down via [`Session::close`].
    fn on_close(&mut self, kind: GameKind);
}

/// Host built from two closures.
pub struct Callbacks<C, X> {
    on_complete: C,
    on_close: X,
}

impl<C, X> Callbacks<C, X>
where
    C: FnMut(u32),
    X: FnMut(),
{
    pub fn new(on_complete: C, on_close: X) -> Self {
        Self {
            on_complete,
            on_close,
        }
    }
}

impl<C, X> Host for Callbacks<C, X>
where
    C: FnMut(u32),
    X: FnMut(),
{
    fn on_complete(&mut self, _kind: GameKind, score: u32) {
        (self.on_complete)(score)
    }

    fn on_close(&mut self, _kind: GameKind) {
        (self.on_close)()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Completed { kind: GameKind, score: u32 },
    Closed(GameKind),
}

impl Host for Sender<HostEvent> {
    fn on_complete(&mut self, kind: GameKind, score: u32) {
        // receiver gone means the host already moved on
        let _ = self.send(HostEvent::Completed { kind, score });
    }

    fn on_close(&mut self, kind: GameKind) {
        let _ = self.send(HostEvent::Closed(kind));
    }
}

/// One play-through of a mini-game: Idle -> Active -> Finished.
///
/// The session owns its round, its timers and its random source. Timers are
/// armed on entering Active and cleared on leaving it, so nothing scheduled
/// can outlive the session.
pub struct Session<G: MiniGame, R: Rng = StdRng> {
    game: G,
    rng: R,
    host: Box<dyn Host>,
    phase: Phase,
    score: Score,
    level: Level,
    round: Option<G::Round>,
    time_remaining: Option<u32>,
    input_locked: bool,
    timers: Timers<Transition>,
    final_score: Option<u32>,
}

impl<G: MiniGame> Session<G, StdRng> {
    pub fn new(game: G, host: impl Host + 'static) -> Self {
        Self::with_rng(game, StdRng::from_entropy(), host)
    }

    pub fn seeded(game: G, seed: u64, host: impl Host + 'static) -> Self {
        Self::with_rng(game, StdRng::seed_from_u64(seed), host)
    }
}

impl<G: MiniGame, R: Rng> Session<G, R> {
    pub fn with_rng(game: G, rng: R, host: impl Host + 'static) -> Self {
        Self {
            game,
            rng,
            host: Box::new(host),
            phase: Phase::Idle,
            score: Score::new(),
            level: Level::FIRST,
            round: None,
            time_remaining: None,
            input_locked: false,
            timers: Timers::new(),
            final_score: None,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.game.kind()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score.get()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    pub fn round(&self) -> Option<&G::Round> {
        self.round.as_ref()
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn input_locked(&self) -> bool {
        self.input_locked
    }

    /// The score reported to the host, once the session has finished.
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            debug!(kind = %self.kind(), phase = ?self.phase, "start ignored");
            return;
        }

        self.game.reset();
        self.score = Score::new();
        self.level = Level::FIRST;
        self.input_locked = false;
        self.round = Some(self.game.generate(self.level, &mut self.rng));
        self.time_remaining = self.game.time_limit_secs();
        self.phase = Phase::Active;
        debug!(kind = %self.kind(), time_limit = ?self.time_remaining, "session started");

        match self.time_remaining {
            Some(0) => self.finish(),
            Some(_) => self.timers.arm_countdown(),
            None => {}
        }
    }

    pub fn submit_action(&mut self, action: G::Action) -> Submission {
        if self.phase != Phase::Active {
            debug!(kind = %self.kind(), phase = ?self.phase, "action dropped");
            return Submission::Ignored(Ignored::NotActive);
        }
        if self.input_locked {
            return Submission::Ignored(Ignored::InputLocked);
        }
        let Some(round) = self.round.as_ref() else {
            return Submission::Ignored(Ignored::NotActive);
        };

        match self.game.apply(round, action, self.level) {
            Some(resolution) => Submission::Applied {
                delta: self.settle(resolution),
            },
            None => Submission::Ignored(Ignored::Rejected),
        }
    }

    /// One second of play time has elapsed. Same as `advance(SECOND_MS)`:
    /// the countdown drops by one and pending feedback delays move on too.
    pub fn tick(&mut self) {
        self.advance(SECOND_MS);
    }

    fn count_down(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        let Some(remaining) = self.time_remaining.as_mut() else {
            return;
        };

        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            debug!(kind = %self.kind(), "time is up");
            self.finish();
        }
    }

    /// Advance the session clock, firing the countdown and any pending
    /// deferred transition in time order.
    pub fn advance(&mut self, elapsed_ms: u32) {
        let mut left = elapsed_ms;
        while left > 0 && self.phase == Phase::Active {
            let step = self.timers.next_due_ms().map_or(left, |due| due.min(left));
            left -= step;

            let due = self.timers.elapse(step);
            if let Some(transition) = due.deferred {
                self.run(transition);
            }
            if due.second {
                self.count_down();
            }
        }
    }

    pub fn finish(&mut self) {
        match self.phase {
            Phase::Idle => {
                debug!(kind = %self.kind(), "finish ignored: session never started");
            }
            Phase::Finished => {}
            Phase::Active => {
                self.phase = Phase::Finished;
                self.timers.cancel_all();
                self.input_locked = false;

                let score = self.game.final_score(self.score.get());
                self.final_score = Some(score);
                info!(kind = %self.kind(), raw = self.score.get(), score, level = %self.level, "session complete");
                self.host.on_complete(self.game.kind(), score);
            }
        }
    }

    /// Tear the session down. Pending timers die with it; completion is
    /// not reported if it had not happened already.
    pub fn close(mut self) {
        self.timers.cancel_all();
        debug!(kind = %self.kind(), phase = ?self.phase, "session closed");
        let kind = self.game.kind();
        self.host.on_close(kind);
    }

    fn settle(&mut self, resolution: Resolution) -> i32 {
        let applied = self.score.apply(resolution.delta);
        match resolution.delay_ms {
            Some(delay) if delay > 0 => {
                self.input_locked = true;
                self.timers.schedule(delay, resolution.then);
            }
            _ => self.run(resolution.then),
        }
        applied
    }

    fn run(&mut self, transition: Transition) {
        if self.phase != Phase::Active {
            return;
        }
        self.input_locked = false;

        match transition {
            Transition::Stay => {}
            Transition::Reroll => self.regenerate(),
            Transition::LevelUp => {
                let next = self.level.next();
                if self.game.max_level().is_some_and(|max| next.get() > max) {
                    debug!(kind = %self.kind(), level = %self.level, "level cap reached");
                    self.finish();
                } else {
                    self.level = next;
                    debug!(kind = %self.kind(), level = %self.level, "level up");
                    self.regenerate();
                }
            }
            Transition::Resolve => {
                if let Some(round) = self.round.as_ref() {
                    let resolution = self.game.resolve(round, self.level);
                    self.settle(resolution);
                }
            }
            Transition::Finish => self.finish(),
        }
    }

    fn regenerate(&mut self) {
        self.round = Some(self.game.generate(self.level, &mut self.rng));
    }
}
