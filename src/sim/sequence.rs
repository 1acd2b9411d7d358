//! Game-over sequencing
//!
//! Runs once per session: disable the craft, wait out the explosion on the
//! gameplay clock, then report the score frozen at the moment of death and
//! start the results fade on the unscaled clock.

use super::craft::Craft;
use super::state::{EffectKind, GameEvent};
use super::timers::{Clock, TimerKey, Timers};
use crate::tuning::SequenceTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStage {
    Idle,
    /// Explosion playing, waiting on the destruction timer
    Destructing,
    /// Final score handed to the host
    Reported,
}

#[derive(Debug, Clone)]
pub struct GameOverSequencer {
    stage: SequenceStage,
    final_score: Option<u32>,
}

impl Default for GameOverSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameOverSequencer {
    pub fn new() -> Self {
        Self {
            stage: SequenceStage::Idle,
            final_score: None,
        }
    }

    pub fn stage(&self) -> SequenceStage {
        self.stage
    }

    /// Score captured when the craft died
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Start the destruction sequence. No-op after the first call.
    pub fn begin(
        &mut self,
        craft: &mut Craft,
        tuning: &SequenceTuning,
        timers: &mut Timers,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.stage != SequenceStage::Idle {
            return false;
        }

        let score = craft.score();
        self.final_score = Some(score);
        self.stage = SequenceStage::Destructing;

        craft.destroy();
        events.push(GameEvent::PlayEffect {
            effect: EffectKind::Explosion,
            at: craft.position,
        });
        events.push(GameEvent::CraftDisabled);
        events.push(GameEvent::EngineStopped);

        let duration = tuning.destruction_duration();
        timers.start(TimerKey::Destruction, Clock::Scaled, duration);
        log::info!("Craft destroyed at distance {score}, reporting in {duration:.2}s");
        true
    }

    /// Destruction wait elapsed: report the frozen score exactly once.
    pub fn finish(
        &mut self,
        tuning: &SequenceTuning,
        timers: &mut Timers,
        events: &mut Vec<GameEvent>,
    ) -> Option<u32> {
        if self.stage != SequenceStage::Destructing {
            return None;
        }
        self.stage = SequenceStage::Reported;

        let score = self.final_score.unwrap_or(0);
        events.push(GameEvent::SessionOver { score });
        timers.start(TimerKey::ResultsFade, Clock::Unscaled, tuning.results_fade);
        Some(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::CraftTuning;

    #[test]
    fn test_sequence_runs_once() {
        let mut craft = Craft::new(&CraftTuning::default());
        craft.position.z = 42.7;
        let tuning = SequenceTuning::default();
        let mut timers = Timers::new();
        let mut events = Vec::new();
        let mut seq = GameOverSequencer::new();

        assert!(seq.begin(&mut craft, &tuning, &mut timers, &mut events));
        assert!(!seq.begin(&mut craft, &tuning, &mut timers, &mut events));
        assert!(!craft.is_active());
        assert_eq!(seq.final_score(), Some(42));
        assert!(events.contains(&GameEvent::CraftDisabled));
        assert!(events.contains(&GameEvent::EngineStopped));

        // Moving the craft afterwards must not change the reported score
        craft.position.z = 500.0;
        assert_eq!(seq.finish(&tuning, &mut timers, &mut events), Some(42));
        assert_eq!(seq.finish(&tuning, &mut timers, &mut events), None);
        assert!(timers.is_pending(TimerKey::ResultsFade));
        let reports = events
            .iter()
            .filter(|e| matches!(e, GameEvent::SessionOver { .. }))
            .count();
        assert_eq!(reports, 1);
    }

    #[test]
    fn test_finish_requires_begin() {
        let mut seq = GameOverSequencer::new();
        let mut timers = Timers::new();
        let mut events = Vec::new();
        assert_eq!(seq.finish(&SequenceTuning::default(), &mut timers, &mut events), None);
        assert_eq!(seq.stage(), SequenceStage::Idle);
    }
}
