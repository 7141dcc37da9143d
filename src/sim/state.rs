//! Types shared by both games: phases, events, per-tick input and stars

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::STAR_TRAIL_LENGTH;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for START
    Menu,
    /// Active gameplay
    Playing,
    /// Gameplay frozen until resumed
    Paused,
    /// Level cleared, next level starts after a short delay
    LevelComplete,
    /// Run ended by a miss or a hit
    GameOver,
    /// Final level cleared
    Won,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::LevelComplete => "level_complete",
            GamePhase::GameOver => "game_over",
            GamePhase::Won => "won",
        }
    }
}

/// Notable things that happened during a tick, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    BallReleased,
    StarCollected { pos: Vec2 },
    StarMissed { pos: Vec2 },
    EnemyDestroyed { pos: Vec2 },
    PlayerHit { pos: Vec2 },
    BallLanded,
    LevelCleared { level: u32 },
    RunEnded { score: u64, level: u32, won: bool },
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in canvas coordinates, if it is over the canvas
    pub pointer: Option<Vec2>,
    /// Primary pointer button went down this tick
    pub pointer_pressed: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire held
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Movement direction from the arrow keys, each axis in -1..=1
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// A falling star waiting to be collected
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    /// Outer point radius
    pub size: f32,
    /// Pixels per frame
    pub speed: f32,
    pub collected: bool,
    /// Spin angle, also drives the glow pulse
    pub angle: f32,
    /// Glow intensity 0-1
    pub glow: f32,
    /// Recent positions, oldest first
    pub trail: Vec<Vec2>,
}

impl Star {
    /// Random star above the top edge, between `margin` and `width - margin`
    pub fn spawn_above(rng: &mut Pcg32, width: f32, margin: f32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(margin..width - margin),
                rng.random_range(-200.0..-50.0),
            ),
            size: rng.random_range(15.0..25.0),
            speed: rng.random_range(1.5..2.5),
            collected: false,
            angle: rng.random_range(0.0..std::f32::consts::TAU),
            glow: 0.0,
            trail: Vec::with_capacity(STAR_TRAIL_LENGTH),
        }
    }

    /// Fall one frame and advance the spin/glow animation
    pub fn advance(&mut self) {
        if self.trail.len() == STAR_TRAIL_LENGTH {
            self.trail.remove(0);
        }
        self.trail.push(self.pos);

        self.pos.y += self.speed;
        self.angle += 0.05;
        self.glow = 0.5 + 0.5 * (self.angle * 3.0).sin();
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    /// Entirely below the bottom edge
    pub fn has_fallen_past(&self, height: f32) -> bool {
        self.pos.y - self.size > height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_direction_cancels_opposites() {
        let input = TickInput {
            left: true,
            right: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_star_spawns_above_screen() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let star = Star::spawn_above(&mut rng, 800.0, 50.0);
            assert!(star.pos.y < 0.0);
            assert!(star.pos.x >= 50.0 && star.pos.x < 750.0);
            assert!(!star.collected);
        }
    }

    #[test]
    fn test_star_trail_is_capped() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut star = Star::spawn_above(&mut rng, 800.0, 50.0);
        let start_y = star.pos.y;
        for _ in 0..20 {
            star.advance();
        }
        assert_eq!(star.trail.len(), 6);
        // Positions before each of the last six falls
        let newest = start_y + 19.0 * star.speed;
        let oldest = start_y + 14.0 * star.speed;
        assert!((star.trail[5].y - newest).abs() < 0.01);
        assert!((star.trail[0].y - oldest).abs() < 0.01);
        assert!((star.pos.y - (start_y + 20.0 * star.speed)).abs() < 0.01);
        assert!((0.0..=1.0).contains(&star.glow));
    }
}
