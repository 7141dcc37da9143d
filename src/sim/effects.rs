//! Visual-only entities: particle bursts and the scrolling space backdrop
//!
//! None of this affects gameplay, but it is simulated here so the renderer
//! stays a pure read of state.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{BACKGROUND_STAR_COUNT, NEBULA_COUNT, PARTICLE_LIFE};

/// A single spark
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Frames left
    pub life: u32,
}

impl Particle {
    /// Remaining life as 0-1, for fading
    pub fn life_ratio(&self) -> f32 {
        self.life as f32 / PARTICLE_LIFE as f32
    }
}

/// What blew up, for color lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    Ball,
    Star,
    Enemy,
    Player,
}

/// A burst of particles from one origin, gone once every particle expires
#[derive(Debug, Clone)]
pub struct Explosion {
    pub kind: BurstKind,
    pub particles: Vec<Particle>,
}

impl Explosion {
    pub fn new(rng: &mut Pcg32, origin: Vec2, kind: BurstKind, count: usize) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                pos: origin,
                vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)),
                size: rng.random_range(2.0..6.0),
                life: PARTICLE_LIFE,
            })
            .collect();
        Self {
            kind,
            particles,
        }
    }

    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn is_finished(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Advance every explosion and drop the finished ones
pub fn update_explosions(explosions: &mut Vec<Explosion>) {
    for e in explosions.iter_mut() {
        e.update();
    }
    explosions.retain(|e| !e.is_finished());
}

/// Distant star in the parallax field
#[derive(Debug, Clone)]
pub struct BackgroundStar {
    pub pos: Vec2,
    pub size: f32,
    /// 0-1 grey level
    pub brightness: f32,
    pub speed: f32,
}

/// Soft colored cloud
#[derive(Debug, Clone)]
pub struct Nebula {
    pub pos: Vec2,
    pub radius: f32,
    /// Index into the nebula palette
    pub tint: usize,
    /// 0-1 opacity
    pub alpha: f32,
}

/// Nebula palette size (purple, pink, blue)
pub const NEBULA_TINTS: usize = 3;
/// Planet palette size
pub const PLANET_TINTS: usize = 4;

/// Slow-moving planet, wraps back to the top after leaving the bottom
#[derive(Debug, Clone)]
pub struct Planet {
    pub pos: Vec2,
    pub radius: f32,
    pub tint: usize,
    pub speed: f32,
    pub ringed: bool,
}

impl Planet {
    fn random(rng: &mut Pcg32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height)),
            radius: rng.random_range(20.0..60.0),
            tint: rng.random_range(0..PLANET_TINTS),
            speed: rng.random_range(0.05..0.2),
            ringed: rng.random_bool(0.3),
        }
    }
}

/// Everything drawn behind the gameplay layer
#[derive(Debug, Clone)]
pub struct Backdrop {
    pub width: f32,
    pub height: f32,
    pub stars: Vec<BackgroundStar>,
    pub nebulas: Vec<Nebula>,
    pub planets: Vec<Planet>,
}

impl Backdrop {
    pub fn new(rng: &mut Pcg32, width: f32, height: f32) -> Self {
        let stars = (0..BACKGROUND_STAR_COUNT)
            .map(|_| BackgroundStar {
                pos: Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height)),
                size: rng.random_range(0.5..2.0),
                brightness: rng.random_range(0.3..1.0),
                speed: rng.random_range(0.1..0.3),
            })
            .collect();
        let nebulas = (0..NEBULA_COUNT)
            .map(|_| Nebula {
                pos: Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height)),
                radius: rng.random_range(100.0..300.0),
                tint: rng.random_range(0..NEBULA_TINTS),
                alpha: rng.random_range(10.0..40.0) / 255.0,
            })
            .collect();
        Self {
            width,
            height,
            stars,
            nebulas,
            planets: Vec::new(),
        }
    }

    /// Replace the planets (once per level)
    pub fn set_planets(&mut self, rng: &mut Pcg32, count: u32) {
        self.planets = (0..count)
            .map(|_| Planet::random(rng, self.width, self.height))
            .collect();
    }

    /// Scroll everything down; `scroll` scales star drift
    pub fn drift(&mut self, rng: &mut Pcg32, scroll: f32) {
        for star in &mut self.stars {
            star.pos.y += star.speed * scroll;
            if star.pos.y > self.height {
                star.pos.y = 0.0;
                star.pos.x = rng.random_range(0.0..self.width);
            }
        }
        for planet in &mut self.planets {
            planet.pos.y += planet.speed;
            if planet.pos.y - planet.radius > self.height {
                planet.pos.y = -planet.radius;
                planet.pos.x = rng.random_range(0.0..self.width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_explosion_expires() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut list = vec![Explosion::new(&mut rng, Vec2::ZERO, BurstKind::Star, 10)];
        for _ in 0..PARTICLE_LIFE - 1 {
            update_explosions(&mut list);
        }
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].particles.len(), 10);
        update_explosions(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_backdrop_stars_wrap() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut backdrop = Backdrop::new(&mut rng, 800.0, 600.0);
        assert_eq!(backdrop.stars.len(), BACKGROUND_STAR_COUNT);
        backdrop.stars[0].pos.y = 599.99;
        backdrop.stars[0].speed = 0.3;
        backdrop.drift(&mut rng, 1.0);
        assert_eq!(backdrop.stars[0].pos.y, 0.0);
        for star in &backdrop.stars {
            assert!(star.pos.y >= 0.0 && star.pos.y <= 600.0);
        }
    }

    #[test]
    fn test_set_planets() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut backdrop = Backdrop::new(&mut rng, 1000.0, 700.0);
        backdrop.set_planets(&mut rng, 3);
        assert_eq!(backdrop.planets.len(), 3);
        backdrop.set_planets(&mut rng, 1);
        assert_eq!(backdrop.planets.len(), 1);
    }
}
