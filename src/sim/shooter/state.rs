//! Galactic Star Collector world state
//!
//! A ship at the bottom of a scrolling starfield collects falling stars
//! while enemies drift down and shoot at it. Every star counts: letting
//! one slip past the bottom edge ends the run, as does any hit.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::shooter::*;
use crate::consts::LEVEL_COMPLETE_DELAY;
use crate::sim::collision::{Aabb, clamp_to_canvas};
use crate::sim::effects::{Backdrop, BurstKind, Explosion};
use crate::sim::levels::{LevelConfig, clamped_level_config, level_config};
use crate::sim::state::{GameEvent, GamePhase, Star};
use crate::ui::{Button, overlay_buttons};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT) * 0.5)
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Half extents of the bounding box
    pub half: Vec2,
    pub speed: f32,
    /// Frames until the next shot is allowed
    pub fire_cooldown: u32,
    pub bullets: Vec<Bullet>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(WIDTH / 2.0, PLAYER_START_Y),
            half: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT) * 0.5,
            speed: PLAYER_SPEED,
            fire_cooldown: 0,
            bullets: Vec::new(),
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half)
    }

    /// Move along `dir` (each axis -1..=1) and stay on screen
    pub fn move_by(&mut self, dir: Vec2) {
        self.pos = clamp_to_canvas(self.pos + dir * self.speed, self.half, WIDTH, HEIGHT);
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub half: Vec2,
    /// Fall speed in pixels per frame
    pub speed: f32,
    /// Cleared when shot or once past the bottom edge; pruned the same tick
    pub alive: bool,
    /// Frames until the next shot
    pub shoot_cooldown: u32,
    /// Phase of the side-to-side sway
    pub sway_phase: f32,
    pub bullets: Vec<Bullet>,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half)
    }
}

/// Frames between enemy shots; faster levels shoot more often
pub(crate) fn enemy_cooldown(rng: &mut Pcg32, speed_factor: f32) -> u32 {
    let frames = rng.random_range(ENEMY_SHOOT_COOLDOWN_MIN..=ENEMY_SHOOT_COOLDOWN_MAX);
    ((frames as f32 / speed_factor) as u32).max(1)
}

#[derive(Debug, Clone)]
pub struct ShooterState {
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub config: LevelConfig,
    pub score: u64,
    pub stars_collected: u32,
    pub stars_missed: u32,
    /// Stars generated so far this level, never more than `config.stars_required`
    pub stars_spawned: u32,
    pub player: Player,
    pub stars: Vec<Star>,
    pub enemies: Vec<Enemy>,
    /// Bullets still in flight from enemies that are gone
    pub stray_bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    pub backdrop: Backdrop,
    pub buttons: Vec<Button>,
    pub pointer: Option<Vec2>,
    pub level_complete_ticks: u32,
    pub events: Vec<GameEvent>,
}

impl ShooterState {
    /// Fresh game on the title screen with level 1 prepared
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let backdrop = Backdrop::new(&mut rng, WIDTH, HEIGHT);
        let mut state = Self {
            rng,
            phase: GamePhase::Menu,
            level: 1,
            config: *clamped_level_config(1),
            score: 0,
            stars_collected: 0,
            stars_missed: 0,
            stars_spawned: 0,
            player: Player::default(),
            stars: Vec::new(),
            enemies: Vec::new(),
            stray_bullets: Vec::new(),
            explosions: Vec::new(),
            backdrop,
            buttons: Vec::new(),
            pointer: None,
            level_complete_ticks: 0,
            events: Vec::new(),
        };
        state.setup_level(1);
        state.buttons = overlay_buttons(GamePhase::Menu, WIDTH, HEIGHT, false);
        state
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!(
                "shooter: {} -> {} (level {}, score {})",
                self.phase.as_str(),
                phase.as_str(),
                self.level,
                self.score
            );
        }
        self.phase = phase;
        self.buttons = overlay_buttons(phase, WIDTH, HEIGHT, false);
    }

    /// Regenerate every entity list from the level's configuration
    pub fn setup_level(&mut self, level: u32) {
        self.level = level;
        self.config = *clamped_level_config(level);
        self.stars_collected = 0;
        self.stars_missed = 0;
        self.stars_spawned = 0;
        self.level_complete_ticks = 0;
        self.player = Player::default();
        self.stars.clear();
        self.enemies.clear();
        self.stray_bullets.clear();
        self.explosions.clear();

        for _ in 0..self.config.enemy_count {
            let y = self.rng.random_range(-300.0..-40.0);
            self.spawn_enemy(y);
        }
        self.backdrop
            .set_planets(&mut self.rng, self.config.planet_count);
        self.spawn_star_group();
    }

    pub fn start_run(&mut self) {
        self.score = 0;
        self.setup_level(1);
        self.set_phase(GamePhase::Playing);
        self.events.push(GameEvent::LevelStarted { level: 1 });
    }

    /// Move to the next level, or finish the run after the last one
    pub fn advance_level(&mut self) {
        let next = self.level + 1;
        if level_config(next).is_none() {
            self.win_run();
            return;
        }
        self.setup_level(next);
        self.set_phase(GamePhase::Playing);
        self.events.push(GameEvent::LevelStarted { level: next });
    }

    pub(crate) fn complete_level(&mut self) {
        self.events.push(GameEvent::LevelCleared { level: self.level });
        if level_config(self.level + 1).is_none() {
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

    /// Drop a group of stars sized by the level range, capped by what is left
    pub(crate) fn spawn_star_group(&mut self) {
        let remaining = self.config.stars_required.saturating_sub(self.stars_spawned);
        if remaining == 0 {
            return;
        }
        let size = self
            .rng
            .random_range(self.config.group_min..=self.config.group_max)
            .min(remaining);
        for _ in 0..size {
            let star = Star::spawn_above(&mut self.rng, WIDTH, 50.0);
            self.stars.push(star);
        }
        self.stars_spawned += size;
        log::trace!(
            "shooter: spawned {} star(s), {}/{}",
            size,
            self.stars_spawned,
            self.config.stars_required
        );
    }

    pub(crate) fn spawn_enemy(&mut self, y: f32) {
        let half = Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT) * 0.5;
        let factor = self.config.enemy_speed_factor;
        let enemy = Enemy {
            pos: Vec2::new(self.rng.random_range(half.x..WIDTH - half.x), y),
            half,
            speed: ENEMY_BASE_SPEED * factor,
            alive: true,
            shoot_cooldown: enemy_cooldown(&mut self.rng, factor),
            sway_phase: self.rng.random_range(0.0..std::f32::consts::TAU),
            bullets: Vec::new(),
        };
        self.enemies.push(enemy);
    }

    pub(crate) fn explode(&mut self, pos: Vec2, kind: BurstKind, count: usize) {
        let explosion = Explosion::new(&mut self.rng, pos, kind, count);
        self.explosions.push(explosion);
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    /// Collected and required star counts for the progress bar
    pub fn progress(&self) -> (u32, u32) {
        (self.stars_collected, self.config.stars_required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_prepares_level_one() {
        let state = ShooterState::new(5);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.config.stars_required, 8);
        assert_eq!(state.enemies.len(), 2);
        assert!(state.stars_spawned >= 1 && state.stars_spawned <= 2);
        assert_eq!(state.stars.len() as u32, state.stars_spawned);
        assert_eq!(state.backdrop.planets.len(), 1);
    }

    #[test]
    fn test_star_groups_respect_quota() {
        let mut state = ShooterState::new(8);
        for _ in 0..50 {
            state.spawn_star_group();
        }
        assert_eq!(state.stars_spawned, state.config.stars_required);
        assert_eq!(state.stars.len() as u32, state.config.stars_required);
    }

    #[test]
    fn test_player_move_is_clamped() {
        let mut player = Player::default();
        for _ in 0..500 {
            player.move_by(Vec2::new(-1.0, -1.0));
        }
        assert_eq!(player.pos, player.half);
        for _ in 0..500 {
            player.move_by(Vec2::new(1.0, 1.0));
        }
        assert_eq!(player.pos, Vec2::new(WIDTH, HEIGHT) - player.half);
    }

    #[test]
    fn test_enemy_cooldown_scales_with_speed() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..100 {
            let slow = enemy_cooldown(&mut rng, 1.0);
            assert!((ENEMY_SHOOT_COOLDOWN_MIN..=ENEMY_SHOOT_COOLDOWN_MAX).contains(&slow));
            let fast = enemy_cooldown(&mut rng, 2.0);
            assert!(fast <= ENEMY_SHOOT_COOLDOWN_MAX / 2);
        }
    }

    #[test]
    fn test_final_level_wins() {
        let mut state = ShooterState::new(3);
        state.setup_level(crate::consts::MAX_LEVEL);
        state.advance_level();
        assert_eq!(state.phase, GamePhase::Won);
    }
}
