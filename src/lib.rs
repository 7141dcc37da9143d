//! Star Collector - two small space arcade games sharing one engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, level flow)
//! - `renderer`: Pure world-to-vertices render step plus the WebGPU pipeline
//! - `ui`: Rectangle hit-test buttons that report commands
//! - `driver`: Fixed-rate frame driver, input latching and the autopilot
//! - `settings`: Runtime settings (variant, quality)
//! - `highscores`: Session leaderboard

pub mod driver;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings, SettingsError, Variant};

/// Game configuration constants
pub mod consts {
    /// Frames per second the simulation is tuned for
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep (one frame)
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum catch-up steps per presented frame
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Number of levels in a run
    pub const MAX_LEVEL: u32 = 10;
    /// Frames spent on the level complete screen before the next level starts
    pub const LEVEL_COMPLETE_DELAY: u32 = 120;

    /// Particle lifetime in frames
    pub const PARTICLE_LIFE: u32 = 30;
    /// Background stars in the starfield
    pub const BACKGROUND_STAR_COUNT: usize = 200;
    /// Nebula clouds behind the starfield
    pub const NEBULA_COUNT: usize = 5;
    /// Positions kept per falling star for its trail
    pub const STAR_TRAIL_LENGTH: usize = 6;

    /// Galaxy Star Collector (drop variant)
    pub mod collector {
        pub const WIDTH: f32 = 800.0;
        pub const HEIGHT: f32 = 600.0;

        pub const BALL_RADIUS: f32 = 30.0;
        pub const BALL_START_X: f32 = WIDTH / 2.0;
        pub const BALL_START_Y: f32 = 100.0;
        /// Pixels per frame once released
        pub const BALL_SPEED: f32 = 1.0;
        /// Ball lands once its center passes this line
        pub const BALL_FLOOR_Y: f32 = HEIGHT - BALL_RADIUS + 10.0;

        /// Stars on level 1, plus this many per later level
        pub const BASE_STARS: u32 = 4;
        pub const STARS_PER_LEVEL: u32 = 3;

        pub const STAR_SCORE: u64 = 10;
    }

    /// Galactic Star Collector (scrolling shooter variant)
    pub mod shooter {
        pub const WIDTH: f32 = 1000.0;
        pub const HEIGHT: f32 = 700.0;

        pub const PLAYER_WIDTH: f32 = 50.0;
        pub const PLAYER_HEIGHT: f32 = 40.0;
        pub const PLAYER_SPEED: f32 = 6.0;
        pub const PLAYER_START_Y: f32 = HEIGHT - 80.0;
        /// Frames between player shots
        pub const FIRE_COOLDOWN: u32 = 15;
        pub const PLAYER_BULLET_SPEED: f32 = 10.0;

        pub const ENEMY_WIDTH: f32 = 40.0;
        pub const ENEMY_HEIGHT: f32 = 30.0;
        /// Fall speed before the level's speed factor is applied
        pub const ENEMY_BASE_SPEED: f32 = 1.5;
        pub const ENEMY_BULLET_SPEED: f32 = 5.0;
        /// Per-frame chance of replacing a missing enemy
        pub const ENEMY_RESPAWN_CHANCE: f32 = 0.02;
        /// Shoot cooldown range in frames at speed factor 1.0
        pub const ENEMY_SHOOT_COOLDOWN_MIN: u32 = 60;
        pub const ENEMY_SHOOT_COOLDOWN_MAX: u32 = 150;

        pub const BULLET_WIDTH: f32 = 4.0;
        pub const BULLET_HEIGHT: f32 = 12.0;

        pub const STAR_SCORE: u64 = 10;
        pub const ENEMY_SCORE: u64 = 50;
    }
}

