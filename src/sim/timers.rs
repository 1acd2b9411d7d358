//! Cooperative timer scheduler
//!
//! Timed sequences (obstacle retirement, the destruction wait, the results
//! fade, the HUD hit flash) are plain records advanced once per tick.
//! Starting a key that is already pending replaces the old record, so a
//! stale completion can never cut a fresh timer short.

use super::arena::SlotId;

/// Which clock drives a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Gameplay time; stops while paused or after game over
    Scaled,
    /// Wall time; keeps running after gameplay freezes
    Unscaled,
}

/// Logical identity of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Remove a hit obstacle from the world
    RetireObstacle(SlotId),
    /// Wait out the craft explosion before reporting the score
    Destruction,
    /// Results panel fade-in
    ResultsFade,
    /// Status panel hit flash
    HitFlash,
}

#[derive(Debug, Clone)]
pub struct Timer {
    pub key: TimerKey,
    pub clock: Clock,
    pub duration: f32,
    pub remaining: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    timers: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self { timers: Vec::new() }
    }

    /// Start (or restart) a timer
    pub fn start(&mut self, key: TimerKey, clock: Clock, duration: f32) {
        self.cancel(key);
        let duration = duration.max(0.0);
        self.timers.push(Timer {
            key,
            clock,
            duration,
            remaining: duration,
        });
    }

    /// Drop a pending timer; returns whether one was pending
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.key != key);
        self.timers.len() != before
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.timers.iter().any(|t| t.key == key)
    }

    /// Fraction elapsed in [0, 1], `None` when not pending
    pub fn progress(&self, key: TimerKey) -> Option<f32> {
        self.timers.iter().find(|t| t.key == key).map(|t| {
            if t.duration <= 0.0 {
                1.0
            } else {
                (1.0 - t.remaining / t.duration).clamp(0.0, 1.0)
            }
        })
    }

    /// Advance every timer on `clock` by `dt`; returns the keys that
    /// completed, in the order they were started.
    pub fn advance(&mut self, clock: Clock, dt: f32) -> Vec<TimerKey> {
        let mut done = Vec::new();
        for timer in self.timers.iter_mut().filter(|t| t.clock == clock) {
            timer.remaining -= dt;
            if timer.remaining <= 0.0 {
                done.push(timer.key);
            }
        }
        if !done.is_empty() {
            self.timers
                .retain(|t| !(t.clock == clock && t.remaining <= 0.0));
        }
        done
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_completes_once() {
        let mut timers = Timers::new();
        timers.start(TimerKey::Destruction, Clock::Scaled, 0.5);
        assert!(timers.advance(Clock::Scaled, 0.3).is_empty());
        assert_eq!(timers.advance(Clock::Scaled, 0.3), vec![TimerKey::Destruction]);
        assert!(timers.advance(Clock::Scaled, 1.0).is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn test_restart_replaces_pending_timer() {
        let mut timers = Timers::new();
        timers.start(TimerKey::HitFlash, Clock::Scaled, 0.15);
        timers.advance(Clock::Scaled, 0.1);
        // Re-trigger: the old record must not complete 0.05s later
        timers.start(TimerKey::HitFlash, Clock::Scaled, 0.15);
        assert!(timers.advance(Clock::Scaled, 0.06).is_empty());
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.advance(Clock::Scaled, 0.1), vec![TimerKey::HitFlash]);
    }

    #[test]
    fn test_clocks_are_independent() {
        let mut timers = Timers::new();
        timers.start(TimerKey::Destruction, Clock::Scaled, 0.2);
        timers.start(TimerKey::ResultsFade, Clock::Unscaled, 0.2);
        assert_eq!(timers.advance(Clock::Unscaled, 0.3), vec![TimerKey::ResultsFade]);
        assert!(timers.is_pending(TimerKey::Destruction));
        assert_eq!(timers.progress(TimerKey::Destruction), Some(0.0));
    }
}
