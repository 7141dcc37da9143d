//! Frame driver
//!
//! Owns the running game and everything around it that is not simulation:
//! the fixed-step clock, latched input, FPS measurement, the session
//! leaderboard and the autopilot used by the headless build. Platform code
//! in `main.rs` only feeds events in and pulls frames out.

use glam::Vec2;

use crate::consts::{MAX_SUBSTEPS, SIM_DT, shooter};
use crate::highscores::HighScores;
use crate::renderer::{FontAtlas, FontError, HudInfo, Vertex, build_frame};
use crate::settings::{Settings, Variant};
use crate::sim::{CollectorState, GameEvent, GamePhase, ShooterState, TickInput};
use crate::sim::{collector, shooter as shooter_sim};

/// One of the two games
#[derive(Debug, Clone)]
pub enum Game {
    Collector(CollectorState),
    Shooter(ShooterState),
}

impl Game {
    pub fn new(variant: Variant, seed: u64) -> Self {
        match variant {
            Variant::Collector => Game::Collector(CollectorState::new(seed)),
            Variant::Shooter => Game::Shooter(ShooterState::new(seed)),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Game::Collector(_) => Variant::Collector,
            Game::Shooter(_) => Variant::Shooter,
        }
    }

    /// Advance one simulation frame
    pub fn tick(&mut self, input: &TickInput) {
        match self {
            Game::Collector(state) => collector::tick(state, input),
            Game::Shooter(state) => shooter_sim::tick(state, input),
        }
    }

    /// Events raised by the latest tick
    pub fn events(&self) -> &[GameEvent] {
        match self {
            Game::Collector(state) => &state.events,
            Game::Shooter(state) => &state.events,
        }
    }

    pub fn phase(&self) -> GamePhase {
        match self {
            Game::Collector(state) => state.phase,
            Game::Shooter(state) => state.phase,
        }
    }

    pub fn score(&self) -> u64 {
        match self {
            Game::Collector(state) => state.score,
            Game::Shooter(state) => state.score,
        }
    }

    pub fn level(&self) -> u32 {
        match self {
            Game::Collector(state) => state.level,
            Game::Shooter(state) => state.level,
        }
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        self.variant().canvas_size()
    }
}

/// Fixed-timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_time: Option<f64>,
}

impl FrameClock {
    /// Add `dt` seconds and return how many simulation steps to run.
    /// Long stalls are capped so a hidden tab does not fast-forward.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            // Drop whatever is still owed
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// Same as [`advance`](Self::advance), from an absolute timestamp in ms
    pub fn advance_to(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(time_ms);
        self.advance(dt)
    }
}

/// Rolling FPS over the last 60 presented frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.index] = time_ms;
        self.index = (self.index + 1) % self.frame_times.len();

        let oldest = self.frame_times[self.index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (59_000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Keys the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Pause,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            " " | "Spacebar" => Some(Key::Fire),
            "p" | "P" | "Escape" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Input latched between frames.
///
/// Held keys persist until released; a pointer press or pause request is
/// delivered to exactly one simulation step.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: TickInput,
}

impl InputState {
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.held.left = true,
            Key::Right => self.held.right = true,
            Key::Up => self.held.up = true,
            Key::Down => self.held.down = true,
            Key::Fire => self.held.fire = true,
            Key::Pause => self.held.pause = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.held.left = false,
            Key::Right => self.held.right = false,
            Key::Up => self.held.up = false,
            Key::Down => self.held.down = false,
            Key::Fire => self.held.fire = false,
            Key::Pause => {}
        }
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.held.pointer = Some(pos);
    }

    pub fn pointer_left(&mut self) {
        self.held.pointer = None;
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.held.pointer = Some(pos);
        self.held.pointer_pressed = true;
    }

    /// Release every held key (used when the window loses focus)
    pub fn release_all(&mut self) {
        let pointer = self.held.pointer;
        self.held = TickInput {
            pointer,
            ..Default::default()
        };
    }

    /// Input for the next step; one-shot flags are cleared afterwards
    pub fn take(&mut self) -> TickInput {
        let input = self.held.clone();
        self.held.pointer_pressed = false;
        self.held.pause = false;
        input
    }
}

/// Everything a running frontend owns
pub struct Session {
    pub game: Game,
    pub input: InputState,
    pub clock: FrameClock,
    pub fps: FpsCounter,
    pub high_scores: HighScores,
    pub settings: Settings,
    pub font: FontAtlas,
    /// Simulation steps run so far
    pub steps: u64,
}

impl Session {
    /// `fallback_seed` is used unless the settings pin one
    pub fn new(settings: Settings, fallback_seed: u64) -> Result<Self, FontError> {
        let font = FontAtlas::embedded()?;
        let seed = settings.seed.unwrap_or(fallback_seed);
        log::info!(
            "Starting {} with seed {} ({} quality)",
            settings.variant.as_str(),
            seed,
            settings.quality.as_str()
        );
        Ok(Self {
            game: Game::new(settings.variant, seed),
            input: InputState::default(),
            clock: FrameClock::default(),
            fps: FpsCounter::default(),
            high_scores: HighScores::new(),
            settings,
            font,
            steps: 0,
        })
    }

    /// Run one simulation step with explicit input
    pub fn step(&mut self, input: &TickInput) {
        self.game.tick(input);
        self.steps += 1;
        self.handle_events();
    }

    /// Called once per presented frame with a timestamp in ms.
    /// Returns the number of simulation steps taken.
    pub fn advance(&mut self, time_ms: f64) -> u32 {
        let steps = self.clock.advance_to(time_ms);
        for _ in 0..steps {
            let input = self.input.take();
            self.step(&input);
        }
        self.fps.record(time_ms);
        steps
    }

    /// Vertices for the current frame in canvas coordinates
    pub fn frame(&self) -> Vec<Vertex> {
        build_frame(&self.game, &self.settings, &self.hud(), &self.font)
    }

    pub fn hud(&self) -> HudInfo {
        HudInfo {
            best_score: self.high_scores.top_score(),
            fps: self.settings.show_fps.then(|| self.fps.fps()),
        }
    }

    fn handle_events(&mut self) {
        for event in self.game.events() {
            match *event {
                GameEvent::RunEnded { score, level, won } => {
                    let rank = self.high_scores.add_score(score, level);
                    log::info!(
                        "Run {} on level {} with score {}{}",
                        if won { "won" } else { "lost" },
                        level,
                        score,
                        rank.map(|r| format!(" (rank {})", r)).unwrap_or_default()
                    );
                }
                GameEvent::LevelStarted { level } => log::debug!("Level {} started", level),
                GameEvent::LevelCleared { level } => log::debug!("Level {} cleared", level),
                other => log::trace!("{:?}", other),
            }
        }
    }
}

/// Input for a simple bot: presses whatever button is showing, then chases
/// the lowest visible star.
pub fn autopilot_input(game: &Game) -> TickInput {
    let buttons = match game {
        Game::Collector(state) => &state.buttons,
        Game::Shooter(state) => &state.buttons,
    };
    if let Some(button) = buttons.first() {
        return TickInput {
            pointer: Some(button.rect.center()),
            pointer_pressed: true,
            ..Default::default()
        };
    }

    match game {
        Game::Collector(state) => {
            if state.phase != GamePhase::Playing {
                return TickInput::default();
            }
            if !state.ball.released {
                return TickInput {
                    pointer: Some(state.ball.pos),
                    pointer_pressed: true,
                    ..Default::default()
                };
            }
            let target = state
                .stars
                .iter()
                .filter(|s| s.pos.y > 0.0)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
            TickInput {
                // Where the star will be after this frame's fall
                pointer: target.map(|s| s.pos + Vec2::new(0.0, s.speed)),
                ..Default::default()
            }
        }
        Game::Shooter(state) => {
            let ship = state.player.pos;
            let goal = state
                .stars
                .iter()
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|s| Vec2::new(s.pos.x, s.pos.y.max(shooter::HEIGHT * 0.55)))
                .unwrap_or(Vec2::new(shooter::WIDTH / 2.0, shooter::PLAYER_START_Y));
            let dead_zone = state.player.speed;
            TickInput {
                left: goal.x < ship.x - dead_zone,
                right: goal.x > ship.x + dead_zone,
                up: goal.y < ship.y - dead_zone,
                down: goal.y > ship.y + dead_zone,
                fire: true,
                ..Default::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(variant: Variant, seed: u64) -> Session {
        let settings = Settings {
            variant,
            seed: Some(seed),
            ..Default::default()
        };
        Session::new(settings, 0).unwrap()
    }

    #[test]
    fn test_clock_runs_one_step_per_frame() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance_to(0.0), 1);
        let mut total = 0;
        for i in 1..=60 {
            total += clock.advance_to(i as f64 * 1000.0 / 60.0);
        }
        assert!((59..=61).contains(&total), "{total}");
    }

    #[test]
    fn test_clock_caps_catch_up() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(5.0), MAX_SUBSTEPS);
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom(" "), Some(Key::Fire));
        assert_eq!(Key::from_dom("Escape"), Some(Key::Pause));
        assert_eq!(Key::from_dom("P"), Some(Key::Pause));
        assert_eq!(Key::from_dom("q"), None);
    }

    #[test]
    fn test_one_shot_inputs_clear() {
        let mut input = InputState::default();
        input.key_down(Key::Right);
        input.key_down(Key::Pause);
        input.pointer_down(Vec2::new(10.0, 20.0));

        let first = input.take();
        assert!(first.right && first.pause && first.pointer_pressed);

        let second = input.take();
        assert!(second.right);
        assert!(!second.pause && !second.pointer_pressed);
        assert_eq!(second.pointer, Some(Vec2::new(10.0, 20.0)));

        input.key_up(Key::Right);
        assert!(!input.take().right);
    }

    #[test]
    fn test_autopilot_clears_collector_level() {
        let mut s = session(Variant::Collector, 17);
        for _ in 0..600 {
            let input = autopilot_input(&s.game);
            s.step(&input);
            if s.game.level() >= 2 {
                break;
            }
        }
        assert!(s.game.level() >= 2);
        assert_eq!(s.game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_run_end_records_high_score() {
        let mut s = session(Variant::Collector, 3);
        s.step(&autopilot_input(&s.game));
        if let Game::Collector(state) = &mut s.game {
            state.score = 70;
            state.ball.released = true;
            state.ball.pos.y = crate::consts::collector::BALL_FLOOR_Y;
            for star in &mut state.stars {
                star.pos.y = -10_000.0;
            }
        }
        s.step(&TickInput::default());
        assert_eq!(s.game.phase(), GamePhase::GameOver);
        assert_eq!(s.high_scores.top_score(), Some(70));
        assert_eq!(s.hud().best_score, Some(70));
    }

    #[test]
    fn test_shooter_autopilot_is_deterministic() {
        let mut a = session(Variant::Shooter, 21);
        let mut b = session(Variant::Shooter, 21);
        for _ in 0..1500 {
            let ia = autopilot_input(&a.game);
            let ib = autopilot_input(&b.game);
            a.step(&ia);
            b.step(&ib);
        }
        assert_eq!(a.game.score(), b.game.score());
        assert_eq!(a.game.level(), b.game.level());
        assert_eq!(a.game.phase(), b.game.phase());
        assert_eq!(a.high_scores.entries, b.high_scores.entries);
    }

    #[test]
    fn test_frame_is_not_empty() {
        let s = session(Variant::Shooter, 5);
        assert!(!s.frame().is_empty());
    }
}
