//! Galaxy Star Collector: drop the ball, sweep up the stars

pub mod state;
pub mod tick;

pub use state::{Ball, CollectorState};
pub use tick::tick;
