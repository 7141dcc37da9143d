//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only (one tick is one 60 Hz frame)
//! - Seeded RNG only, one `Pcg32` per game state
//! - Stable iteration order (entity lists are `Vec`s pruned with `retain`)
//! - No rendering or platform dependencies

pub mod collector;
pub mod collision;
pub mod effects;
pub mod levels;
pub mod shooter;
pub mod state;

pub use collector::CollectorState;
pub use collision::{Aabb, clamp_to_canvas, is_off_canvas, point_in_circle};
pub use effects::{Backdrop, BurstKind, Explosion, Particle};
pub use levels::{LEVELS, LevelConfig, clamped_level_config, collector_star_quota, level_config};
pub use shooter::ShooterState;
pub use state::{GameEvent, GamePhase, Star, TickInput};
