//! The session a driver owns
//!
//! Bundles the simulation state with its collaborators (key state and
//! clock). There are no globals: the driver constructs one `Session` and
//! calls [`Session::update`] then renders, once per display refresh.

use crate::platform::{Clock, InputState, Key, ManualClock, MonotonicClock};
use crate::sim::{GameEvent, GamePhase, GameState, Renderer, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session<C: Clock = MonotonicClock> {
    state: GameState,
    input: InputState,
    clock: C,
    /// Single-shot fire press waiting for the next update
    fire_queued: bool,
}

impl Session<MonotonicClock> {
    /// Default tuning on the wall clock
    pub fn new(seed: u64) -> Self {
        Self::with_clock(seed, Tuning::default(), MonotonicClock::new())
    }
}

impl Session<ManualClock> {
    /// Session whose clock only moves when advanced (tests, headless runs)
    pub fn manual(seed: u64, tuning: Tuning) -> Self {
        Self::with_clock(seed, tuning, ManualClock::default())
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(seed: u64, tuning: Tuning, clock: C) -> Self {
        let state = GameState::with_tuning(seed, tuning);
        log::info!(
            "Session started (seed {}, {} enemies, {} barrier cells)",
            seed,
            state.enemies.len(),
            state.barriers.len()
        );
        Self {
            state,
            input: InputState::new(),
            clock,
            fire_queued: false,
        }
    }

    /// Forward a key press from the environment
    pub fn key_down(&mut self, id: &str) {
        let edge = !self.input.is_pressed(id);
        self.input.key_down(id);

        match Key::from_identifier(id) {
            Some(Key::Fire) if edge && !self.state.tuning.auto_fire && !self.state.is_terminal() => {
                self.fire_queued = true;
            }
            Some(Key::Restart) if self.state.is_terminal() => self.restart(),
            _ => {}
        }
    }

    /// Forward a key release from the environment
    pub fn key_up(&mut self, id: &str) {
        self.input.key_up(id);
    }

    /// Run one simulation frame. `dt` is elapsed milliseconds.
    pub fn update(&mut self, dt: f32) {
        let mut input = TickInput::from_keys(&self.input);
        input.fire_pressed = self.fire_queued;
        tick(&mut self.state, &input, dt, self.clock.now_ms());
        // One-shot input is consumed whether or not the frame ran
        self.fire_queued = false;
    }

    /// One update followed by one render pass
    pub fn run_frame<R: Renderer + ?Sized>(&mut self, dt: f32, renderer: &mut R) {
        self.update(dt);
        renderer.render(&self.snapshot());
    }

    /// Full reset to the opening layout
    pub fn restart(&mut self) {
        self.state.restart();
        self.fire_queued = false;
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for drivers and tests that stage scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.state.events
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }
}
