//! Galaxy Star Collector world state
//!
//! A ball hangs near the top of the screen. Once released it sinks toward
//! the floor while stars rain down; sweep the pointer across every star
//! before the ball lands.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::collector::*;
use crate::consts::{LEVEL_COMPLETE_DELAY, MAX_LEVEL};
use crate::sim::effects::{Backdrop, BurstKind, Explosion};
use crate::sim::levels::collector_star_quota;
use crate::sim::state::{GameEvent, GamePhase, Star};
use crate::ui::{Button, overlay_buttons};

/// The ball the player drops
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per frame once released
    pub speed: f32,
    /// Clicked and falling
    pub released: bool,
    /// Hit the floor; no longer drawn
    pub landed: bool,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            radius: BALL_RADIUS,
            speed: BALL_SPEED,
            released: false,
            landed: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollectorState {
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    pub stars_collected: u32,
    pub stars_missed: u32,
    /// Stars dropped this level, all of which must be collected
    pub stars_required: u32,
    pub ball: Ball,
    pub stars: Vec<Star>,
    pub bursts: Vec<Explosion>,
    pub backdrop: Backdrop,
    /// Buttons on the current overlay
    pub buttons: Vec<Button>,
    /// Last known pointer position in canvas coordinates
    pub pointer: Option<Vec2>,
    /// Frames left on the level complete screen
    pub level_complete_ticks: u32,
    /// Events from the latest tick
    pub events: Vec<GameEvent>,
}

impl CollectorState {
    /// Fresh game sitting on the title screen with level 1 prepared
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let backdrop = Backdrop::new(&mut rng, WIDTH, HEIGHT);
        let mut state = Self {
            rng,
            phase: GamePhase::Menu,
            level: 1,
            score: 0,
            stars_collected: 0,
            stars_missed: 0,
            stars_required: 0,
            ball: Ball::default(),
            stars: Vec::new(),
            bursts: Vec::new(),
            backdrop,
            buttons: Vec::new(),
            pointer: None,
            level_complete_ticks: 0,
            events: Vec::new(),
        };
        state.setup_level(1);
        state.buttons = overlay_buttons(GamePhase::Menu, WIDTH, HEIGHT, true);
        state
    }

    /// Switch phase and rebuild the overlay buttons
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!(
                "collector: {} -> {} (level {})",
                self.phase.as_str(),
                phase.as_str(),
                self.level
            );
        }
        self.phase = phase;
        self.buttons = overlay_buttons(phase, WIDTH, HEIGHT, true);
    }

    /// Reset per-level counters, the ball and the star field for `level`
    pub fn setup_level(&mut self, level: u32) {
        self.level = level;
        self.stars_collected = 0;
        self.stars_missed = 0;
        self.stars_required = collector_star_quota(level);
        self.ball = Ball::default();
        self.level_complete_ticks = 0;
        self.bursts.clear();

        let rng = &mut self.rng;
        self.stars = (0..self.stars_required)
            .map(|_| Star::spawn_above(rng, WIDTH, 50.0))
            .collect();
    }

    /// Start level 1 from scratch
    pub fn start_run(&mut self) {
        self.score = 0;
        self.setup_level(1);
        self.set_phase(GamePhase::Playing);
        self.events.push(GameEvent::LevelStarted { level: 1 });
    }

    /// Move to the next level, or finish the run after the last one
    pub fn advance_level(&mut self) {
        if self.level >= MAX_LEVEL {
            self.win_run();
            return;
        }
        let next = self.level + 1;
        self.setup_level(next);
        self.set_phase(GamePhase::Playing);
        self.events.push(GameEvent::LevelStarted { level: next });
    }

    /// Clearing the last level wins outright; earlier ones wait on the
    /// level complete screen
    pub(crate) fn complete_level(&mut self) {
        self.events.push(GameEvent::LevelCleared { level: self.level });
        if self.level >= MAX_LEVEL {
            self.win_run();
            return;
        }
        self.level_complete_ticks = LEVEL_COMPLETE_DELAY;
        self.set_phase(GamePhase::LevelComplete);
    }

    fn win_run(&mut self) {
        self.set_phase(GamePhase::Won);
        self.events.push(GameEvent::RunEnded {
            score: self.score,
            level: self.level,
            won: true,
        });
    }

    pub(crate) fn end_run(&mut self) {
        self.set_phase(GamePhase::GameOver);
        self.events.push(GameEvent::RunEnded {
            score: self.score,
            level: self.level,
            won: false,
        });
    }

    pub(crate) fn burst(&mut self, pos: Vec2, kind: BurstKind, count: usize) {
        let explosion = Explosion::new(&mut self.rng, pos, kind, count);
        self.bursts.push(explosion);
    }

    /// Collected and required star counts for the progress bar
    pub fn progress(&self) -> (u32, u32) {
        (self.stars_collected, self.stars_required)
    }
}
