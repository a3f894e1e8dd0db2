//! Timers owned by a single session.
//!
//! There is one per-second countdown and one deferred slot. Both are plain
//! millisecond counters advanced by the owner, so dropping or clearing the
//! owner cancels everything that is still pending.

pub const SECOND_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Countdown {
    until_next_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Deferred<T> {
    remaining_ms: u32,
    payload: T,
}

/// What came due during one call to [`Timers::elapse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Due<T> {
    pub deferred: Option<T>,
    pub second: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timers<T> {
    countdown: Option<Countdown>,
    deferred: Option<Deferred<T>>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self {
            countdown: None,
            deferred: None,
        }
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm_countdown(&mut self) {
        self.countdown = Some(Countdown {
            until_next_ms: SECOND_MS,
        });
    }

    /// Schedule `payload` to fire after `delay_ms`. Replaces any pending
    /// payload, which is handed back.
    pub fn schedule(&mut self, delay_ms: u32, payload: T) -> Option<T> {
        self.deferred
            .replace(Deferred {
                remaining_ms: delay_ms.max(1),
                payload,
            })
            .map(|d| d.payload)
    }

    pub fn has_pending(&self) -> bool {
        self.deferred.is_some()
    }

    pub fn cancel_all(&mut self) {
        self.countdown = None;
        self.deferred = None;
    }

    /// Milliseconds until the next timer fires, if any is armed.
    pub fn next_due_ms(&self) -> Option<u32> {
        let countdown = self.countdown.map(|c| c.until_next_ms);
        let deferred = self.deferred.as_ref().map(|d| d.remaining_ms);
        match (countdown, deferred) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Advance every armed timer by `step_ms`.
    ///
    /// Callers step no further than [`Timers::next_due_ms`] so that events
    /// are observed in time order.
    pub fn elapse(&mut self, step_ms: u32) -> Due<T> {
        let mut second = false;
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.until_next_ms = countdown.until_next_ms.saturating_sub(step_ms);
            if countdown.until_next_ms == 0 {
                countdown.until_next_ms = SECOND_MS;
                second = true;
            }
        }

        let mut fired = None;
        if let Some(deferred) = self.deferred.as_mut() {
            deferred.remaining_ms = deferred.remaining_ms.saturating_sub(step_ms);
            if deferred.remaining_ms == 0 {
                fired = self.deferred.take().map(|d| d.payload);
            }
        }

        Due {
            deferred: fired,
            second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_fires_every_second() {
        let mut timers: Timers<()> = Timers::new();
        timers.arm_countdown();

        assert!(!timers.elapse(400).second);
        assert_eq!(timers.next_due_ms(), Some(600));
        assert!(timers.elapse(600).second);
        assert_eq!(timers.next_due_ms(), Some(SECOND_MS));
    }

    #[test]
    fn deferred_fires_once() {
        let mut timers = Timers::new();
        timers.schedule(500, "unlock");

        assert_eq!(timers.elapse(499).deferred, None);
        assert_eq!(timers.elapse(1).deferred, Some("unlock"));
        assert!(!timers.has_pending());
        assert_eq!(timers.elapse(1000).deferred, None);
    }

    #[test]
    fn next_due_picks_earliest() {
        let mut timers = Timers::new();
        assert_eq!(timers.next_due_ms(), None);

        timers.arm_countdown();
        timers.schedule(300, 1);
        assert_eq!(timers.next_due_ms(), Some(300));

        timers.elapse(300);
        assert_eq!(timers.next_due_ms(), Some(700));
    }

    #[test]
    fn schedule_replaces_pending() {
        let mut timers = Timers::new();
        assert_eq!(timers.schedule(100, 1), None);
        assert_eq!(timers.schedule(100, 2), Some(1));
    }

    #[test]
    fn cancel_all_disarms() {
        let mut timers = Timers::new();
        timers.arm_countdown();
        timers.schedule(10, ());
        timers.cancel_all();

        assert_eq!(timers.next_due_ms(), None);
        let due = timers.elapse(5000);
        assert!(!due.second);
        assert_eq!(due.deferred, None);
    }
}
