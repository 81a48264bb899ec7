//! Scene: one playable screen
//!
//! Owns the run state and wires it to its collaborators: the high-score
//! store, the feedback sink (via the outbox) and the physics stand-in.
//! Frame time is converted into fixed ticks here.

use crate::consts::MAX_SUBSTEPS;
use crate::error::SceneError;
use crate::feedback::{self, ButtonState, FeedbackSink};
use crate::highscores::HighScore;
use crate::layout::{ObstacleTemplate, SceneLayout, TemplateLibrary};
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::state::{Contact, GamePhase, GameState};
use crate::sim::{TickInput, autopilot, physics, tick};
use crate::tuning::Tuning;

/// Longest frame we will try to catch up on (seconds)
const MAX_FRAME_DT: f32 = 0.25;

pub struct Scene {
    layout: SceneLayout,
    template: ObstacleTemplate,
    tuning: Tuning,
    settings: Settings,
    store: Box<dyn KeyValueStore>,
    state: GameState,
    accumulator: f32,
    /// Touch waiting for the next tick
    pending_touch: bool,
    autopilot: bool,
    seed: u64,
    runs: u32,
}

impl Scene {
    /// Build a scene. Fails fast on any layout, template or tuning problem.
    pub fn new(
        layout: SceneLayout,
        library: &TemplateLibrary,
        tuning: Tuning,
        settings: Settings,
        store: Box<dyn KeyValueStore>,
        seed: u64,
    ) -> Result<Self, SceneError> {
        layout.validate()?;
        tuning.validate()?;
        let template = library.instantiate(&layout.obstacle_template)?;

        let high_score = HighScore::load(&*store);
        let state = GameState::from_layout(
            &layout,
            template.clone(),
            tuning.clone(),
            high_score,
            seed,
        );
        log::info!("Scene ready (seed {seed})");

        Ok(Self {
            layout,
            template,
            tuning,
            settings,
            store,
            state,
            accumulator: 0.0,
            pending_touch: false,
            autopilot: false,
            seed,
            runs: 1,
        })
    }

    /// Stock layout and templates
    pub fn with_defaults(store: Box<dyn KeyValueStore>, seed: u64) -> Result<Self, SceneError> {
        Self::new(
            SceneLayout::default(),
            &TemplateLibrary::default(),
            Tuning::default(),
            Settings::default(),
            store,
            seed,
        )
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Score label
    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// High score label
    pub fn displayed_high_score(&self) -> u32 {
        self.state.high_score.displayed()
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        &*self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Let the game play itself
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {enabled}");
    }

    /// Number of runs started in this scene, including the current one
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Touch began; applied on the next tick
    pub fn touch(&mut self) {
        self.pending_touch = true;
    }

    /// Contact-begin event from an external physics engine
    pub fn push_contact(&mut self, contact: Contact) {
        self.state.push_contact(contact);
    }

    /// Run exactly one fixed tick followed by one physics step
    pub fn step(&mut self, input: &TickInput) {
        let dt = self.tuning.fixed_dt;
        tick(&mut self.state, input, &mut *self.store, dt);
        physics::integrate(&mut self.state, dt);
        physics::detect_contacts(&mut self.state);
    }

    /// Advance by a frame's worth of wall time. Returns ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let dt = self.tuning.fixed_dt;
        if !frame_dt.is_finite() {
            log::warn!("Ignoring non-finite frame time {frame_dt}");
            return 0;
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= dt && substeps < MAX_SUBSTEPS {
            let input = if self.autopilot {
                autopilot::decide(&self.state)
            } else {
                TickInput {
                    touch: self.pending_touch,
                }
            };
            self.step(&input);
            self.accumulator -= dt;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending_touch = false;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= dt {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Restart control selected. Only works while the control is shown.
    pub fn select_restart(&mut self) -> bool {
        if self.state.restart_button != ButtonState::Active {
            return false;
        }
        self.restart();
        true
    }

    /// Throw the run away and build a fresh one from the same layout
    pub fn restart(&mut self) {
        let seed = self.seed.wrapping_add(u64::from(self.runs));
        self.runs += 1;

        let high_score = HighScore::load(&*self.store);
        self.state = GameState::from_layout(
            &self.layout,
            self.template.clone(),
            self.tuning.clone(),
            high_score,
            seed,
        );
        self.accumulator = 0.0;
        self.pending_touch = false;
        log::info!("Game restarted with seed: {seed}");
    }

    /// Hand queued effects to the host, filtered by settings
    pub fn dispatch_feedback(&mut self, sink: &mut dyn FeedbackSink) {
        let effects = self.state.drain_effects();
        feedback::dispatch(effects, &self.settings, sink);
    }
}
