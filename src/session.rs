//! Session host
//!
//! Owns the world between menu and game over: runs the fixed-step
//! accumulator, routes world events to the HUD, and keeps the best
//! distance in sync with its store.

use crate::best_score::BestScore;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::hud::{ResultsPanel, StatusHud};
use crate::persistence::ScoreStore;
use crate::sim::{GameEvent, GameState, SessionPhase, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session {
    tuning: Tuning,
    game: Option<GameState>,
    best: BestScore,
    store: Box<dyn ScoreStore>,
    pub hud: StatusHud,
    pub results: ResultsPanel,
    accumulator: f32,
    /// Pause pressed on a frame too short to run a substep
    pending_pause: bool,
}

impl Session {
    /// Build a host sitting at the menu. Reads the stored best distance.
    /// Tuning that fails validation is replaced by the defaults.
    pub fn new(tuning: Tuning, store: Box<dyn ScoreStore>) -> Self {
        let tuning = tuning.validated_or_default();
        let best = BestScore::load(store.as_ref());
        let hud = StatusHud::new(&tuning.hud);
        Self {
            tuning,
            game: None,
            best,
            store,
            hud,
            results: ResultsPanel::default(),
            accumulator: 0.0,
            pending_pause: false,
        }
    }

    pub fn best(&self) -> BestScore {
        self.best
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut GameState> {
        self.game.as_mut()
    }

    pub fn is_in_game(&self) -> bool {
        self.game.is_some()
    }

    pub fn is_game_over(&self) -> bool {
        self.game.as_ref().is_some_and(GameState::is_game_over)
    }

    /// Begin a fresh run
    pub fn start(&mut self, seed: u64) {
        log::info!("Session starting with seed {seed}");
        self.game = Some(GameState::new(seed, self.tuning.clone()));
        self.hud = StatusHud::new(&self.tuning.hud);
        self.results.hide();
        self.accumulator = 0.0;
        self.pending_pause = false;
    }

    /// Reset every entity and timer and resume the clock
    pub fn restart(&mut self, seed: u64) {
        self.start(seed);
    }

    /// Tear the run down and go back to the menu
    pub fn return_to_menu(&mut self) {
        if self.game.take().is_some() {
            log::info!("Returning to menu");
        }
        self.results.hide();
        self.accumulator = 0.0;
        self.pending_pause = false;
    }

    /// Advance by one rendered frame. Returns the collaborator requests the
    /// world raised, in order, for the presentation layer to act on.
    pub fn update(&mut self, frame_dt: f32, input: &TickInput) -> Vec<GameEvent> {
        let mut out = Vec::new();
        if self.game.is_none() {
            return out;
        }

        // NaN would stick in the accumulator and stall every later frame
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;
        let mut input = input.clone();
        input.pause |= std::mem::take(&mut self.pending_pause);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let Some(state) = self.game.as_mut() else {
                break;
            };
            tick(state, &input, SIM_DT);
            let playing = state.phase == SessionPhase::Playing;
            let events = state.drain_events();

            if playing {
                self.hud.advance(SIM_DT);
            }
            for event in &events {
                self.route(event);
            }
            out.extend(events);

            self.accumulator -= SIM_DT;
            substeps += 1;
            // One-shot inputs apply to the first substep only
            input.pause = false;
        }

        if substeps == 0 {
            self.pending_pause = input.pause;
        } else if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            // Drop the backlog rather than spiral
            self.accumulator = 0.0;
        }

        if let Some(state) = self.game.as_ref() {
            self.hud.set_distance(state.score());
        }
        out
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.game.as_ref().map(Snapshot::capture)
    }

    fn route(&mut self, event: &GameEvent) {
        self.hud.on_event(event);
        if let GameEvent::SessionOver { score } = *event {
            self.finish_run(score);
        }
    }

    fn finish_run(&mut self, score: u32) {
        let new_best = self.best.submit(score);
        if new_best {
            if let Err(err) = self.best.save(self.store.as_mut()) {
                log::warn!("Could not save best distance {score}: {err}");
            }
        }
        self.results
            .show(score, self.best.best_distance, new_best);
    }
}
