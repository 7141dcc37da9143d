//! Galactic Star Collector: ship, enemies and grouped star waves

pub mod state;
pub mod tick;

pub use state::{Bullet, BulletOwner, Enemy, Player, ShooterState};
pub use tick::tick;
