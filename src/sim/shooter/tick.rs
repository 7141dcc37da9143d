//! Fixed-step update for Galactic Star Collector

use glam::Vec2;
use rand::Rng;

use crate::consts::shooter::*;
use crate::sim::collision::is_off_canvas;
use crate::sim::effects::{BurstKind, update_explosions};
use crate::sim::state::{GameEvent, GamePhase, TickInput};
use crate::ui::{UiCommand, handle_pointer};

use super::state::{Bullet, BulletOwner, ShooterState, enemy_cooldown};

/// Advance the game by one frame
pub fn tick(state: &mut ShooterState, input: &TickInput) {
    state.events.clear();

    if input.pointer.is_some() {
        state.pointer = input.pointer;
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => state.set_phase(GamePhase::Paused),
            GamePhase::Paused => state.set_phase(GamePhase::Playing),
            _ => {}
        }
    }

    let command = handle_pointer(&mut state.buttons, state.pointer, input.pointer_pressed);
    if let Some(command) = command {
        match command {
            UiCommand::Start | UiCommand::Retry => state.start_run(),
            UiCommand::NextLevel => state.advance_level(),
            UiCommand::Resume => state.set_phase(GamePhase::Playing),
        }
        update_effects(state);
        return;
    }

    match state.phase {
        GamePhase::Playing => update_playing(state, input),
        GamePhase::LevelComplete => {
            state.level_complete_ticks = state.level_complete_ticks.saturating_sub(1);
            if state.level_complete_ticks == 0 {
                state.advance_level();
            }
        }
        _ => {}
    }

    update_effects(state);
}

fn update_effects(state: &mut ShooterState) {
    if state.phase != GamePhase::Paused {
        update_explosions(&mut state.explosions);
        state.backdrop.drift(&mut state.rng, 1.0);
    }
}

fn update_playing(state: &mut ShooterState, input: &TickInput) {
    update_player(state, input);
    spawn(state);

    let missed = update_stars(state);
    update_enemies(state);
    resolve_player_shots(state);
    release_dead_enemies(state);
    let hit = player_is_hit(state);

    if hit {
        let pos = state.player.pos;
        state.explode(pos, BurstKind::Player, 40);
        state.events.push(GameEvent::PlayerHit { pos });
        state.end_run();
    } else if missed > 0 {
        log::debug!("shooter: {} star(s) missed", missed);
        state.end_run();
    } else if state.stars_collected >= state.config.stars_required {
        state.complete_level();
    }
}

fn update_player(state: &mut ShooterState, input: &TickInput) {
    let player = &mut state.player;
    player.move_by(input.direction());
    player.fire_cooldown = player.fire_cooldown.saturating_sub(1);

    if input.fire && player.fire_cooldown == 0 {
        let muzzle = player.pos - Vec2::new(0.0, player.half.y);
        player.bullets.push(Bullet {
            pos: muzzle,
            vel: Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            owner: BulletOwner::Player,
        });
        player.fire_cooldown = FIRE_COOLDOWN;
    }

    for bullet in &mut player.bullets {
        bullet.pos += bullet.vel;
    }
    player
        .bullets
        .retain(|b| !is_off_canvas(&b.bounds(), WIDTH, HEIGHT));
}

fn spawn(state: &mut ShooterState) {
    if state.stars_spawned < state.config.stars_required {
        let roll: f32 = state.rng.random();
        if state.stars.is_empty() || roll < state.config.spawn_chance {
            state.spawn_star_group();
        }
    }

    if state.alive_enemies() < state.config.enemy_count as usize {
        let roll: f32 = state.rng.random();
        if roll < ENEMY_RESPAWN_CHANCE {
            state.spawn_enemy(-ENEMY_HEIGHT);
        }
    }
}

/// Move stars, collect the ones touching the ship; returns how many fell past
fn update_stars(state: &mut ShooterState) -> u32 {
    let ship = state.player.bounds();
    let mut collected = Vec::new();
    let mut missed = Vec::new();
    for star in &mut state.stars {
        star.advance();
        if star.bounds().intersects(&ship) {
            star.collected = true;
            collected.push(star.pos);
        } else if star.has_fallen_past(HEIGHT) {
            missed.push(star.pos);
        }
    }
    state
        .stars
        .retain(|s| !s.collected && !s.has_fallen_past(HEIGHT));

    for pos in collected {
        state.stars_collected += 1;
        state.score += STAR_SCORE;
        state.explode(pos, BurstKind::Star, 15);
        state.events.push(GameEvent::StarCollected { pos });
    }
    for &pos in &missed {
        state.stars_missed += 1;
        state.events.push(GameEvent::StarMissed { pos });
    }
    missed.len() as u32
}

fn update_enemies(state: &mut ShooterState) {
    let target = state.player.pos;
    let factor = state.config.enemy_speed_factor;
    let rng = &mut state.rng;

    for enemy in &mut state.enemies {
        if enemy.alive {
            enemy.pos.y += enemy.speed;
            enemy.pos.x += enemy.sway_phase.sin() * 1.5;
            enemy.sway_phase += 0.05;
            enemy.pos.x = enemy.pos.x.clamp(enemy.half.x, WIDTH - enemy.half.x);

            enemy.shoot_cooldown = enemy.shoot_cooldown.saturating_sub(1);
            if enemy.shoot_cooldown == 0 {
                // Only fire once visible
                if enemy.pos.y > 0.0 {
                    let aim = (target - enemy.pos).normalize_or(Vec2::Y);
                    enemy.bullets.push(Bullet {
                        pos: enemy.pos + Vec2::new(0.0, enemy.half.y),
                        vel: aim * ENEMY_BULLET_SPEED,
                        owner: BulletOwner::Enemy,
                    });
                }
                enemy.shoot_cooldown = enemy_cooldown(rng, factor);
            }

            if enemy.pos.y - enemy.half.y > HEIGHT {
                enemy.alive = false;
            }
        }

        for bullet in &mut enemy.bullets {
            bullet.pos += bullet.vel;
        }
        enemy
            .bullets
            .retain(|b| !is_off_canvas(&b.bounds(), WIDTH, HEIGHT));
    }

    for bullet in &mut state.stray_bullets {
        bullet.pos += bullet.vel;
    }
    state
        .stray_bullets
        .retain(|b| !is_off_canvas(&b.bounds(), WIDTH, HEIGHT));
}

/// Drop dead enemies, keeping their bullets in flight
fn release_dead_enemies(state: &mut ShooterState) {
    for enemy in state.enemies.iter_mut().filter(|e| !e.alive) {
        state.stray_bullets.append(&mut enemy.bullets);
    }
    state.enemies.retain(|e| e.alive);
}

/// Player bullets against live enemies; each bullet kills at most one
fn resolve_player_shots(state: &mut ShooterState) {
    let mut destroyed = Vec::new();
    let enemies = &mut state.enemies;
    state.player.bullets.retain(|bullet| {
        let bounds = bullet.bounds();
        match enemies
            .iter_mut()
            .find(|e| e.alive && e.bounds().intersects(&bounds))
        {
            Some(enemy) => {
                enemy.alive = false;
                destroyed.push(enemy.pos);
                false
            }
            None => true,
        }
    });

    for pos in destroyed {
        state.score += ENEMY_SCORE;
        state.explode(pos, BurstKind::Enemy, 25);
        state.events.push(GameEvent::EnemyDestroyed { pos });
    }
}

fn player_is_hit(state: &ShooterState) -> bool {
    let ship = state.player.bounds();
    let touched = state.enemies.iter().any(|enemy| {
        enemy.bounds().intersects(&ship)
            || enemy.bullets.iter().any(|b| b.bounds().intersects(&ship))
    });
    touched || state.stray_bullets.iter().any(|b| b.bounds().intersects(&ship))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LEVEL_COMPLETE_DELAY, MAX_LEVEL};

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn started(seed: u64) -> ShooterState {
        let mut state = ShooterState::new(seed);
        let start = state.buttons[0].rect.center();
        let input = TickInput {
            pointer: Some(start),
            pointer_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        // Keep the pointer off the (now empty) overlay
        state.pointer = None;
        state
    }

    /// Push every enemy far above the screen so it never reaches the ship
    fn park_enemies(state: &mut ShooterState) {
        for enemy in &mut state.enemies {
            enemy.pos.y = -10_000.0;
            enemy.shoot_cooldown = u32::MAX;
        }
    }

    #[test]
    fn test_collecting_quota_clears_level() {
        let mut state = started(1);
        let required = state.config.stars_required;

        for _ in 0..required {
            park_enemies(&mut state);
            // Make sure a star exists, then drop it onto the ship
            if state.stars.is_empty() {
                state.spawn_star_group();
            }
            let target = state.player.pos;
            let speed = state.stars[0].speed;
            state.stars[0].pos = target - Vec2::new(0.0, speed);
            for star in state.stars.iter_mut().skip(1) {
                star.pos.y = -500.0;
            }
            tick(&mut state, &idle());
        }

        assert_eq!(state.stars_collected, required);
        assert_eq!(state.score, STAR_SCORE * required as u64);
        assert_eq!(state.phase, GamePhase::LevelComplete);

        for _ in 0..LEVEL_COMPLETE_DELAY - 1 {
            tick(&mut state, &idle());
            assert_eq!(state.phase, GamePhase::LevelComplete);
        }
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 2);
        assert_eq!(state.stars_collected, 0);
        assert_eq!(state.stars_missed, 0);
        assert_eq!(state.enemies.len(), 3);
    }

    #[test]
    fn test_clearing_last_level_wins_without_next_level() {
        let mut state = started(13);
        state.setup_level(MAX_LEVEL);
        park_enemies(&mut state);
        state.stars.truncate(1);
        state.stars_collected = state.config.stars_required - 1;
        let speed = state.stars[0].speed;
        state.stars[0].pos = state.player.pos - Vec2::new(0.0, speed);
        tick(&mut state, &idle());

        assert_eq!(state.phase, GamePhase::Won);
        let labels: Vec<&str> = state.buttons.iter().map(|b| b.label).collect();
        assert_eq!(labels, ["PLAY AGAIN"]);
        assert!(state.events.contains(&GameEvent::LevelCleared { level: MAX_LEVEL }));
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::RunEnded { won: true, .. })
        ));

        for _ in 0..LEVEL_COMPLETE_DELAY {
            tick(&mut state, &idle());
            assert_eq!(state.phase, GamePhase::Won);
        }
        assert_eq!(state.level, MAX_LEVEL);
    }

    #[test]
    fn test_enemy_bullet_ends_run() {
        let mut state = started(2);
        park_enemies(&mut state);
        let ship = state.player.pos;
        state.enemies[0].bullets.push(Bullet {
            pos: ship - Vec2::new(0.0, 30.0),
            vel: Vec2::new(0.0, ENEMY_BULLET_SPEED),
            owner: BulletOwner::Enemy,
        });
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::PlayerHit { .. })));
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::RunEnded { won: false, .. })
        ));
    }

    #[test]
    fn test_enemy_collision_ends_run() {
        let mut state = started(3);
        park_enemies(&mut state);
        let ship = state.player.pos;
        state.enemies[0].pos = ship;
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_missed_star_counted_once() {
        let mut state = started(4);
        park_enemies(&mut state);
        let size = state.stars[0].size;
        state.stars[0].pos = Vec2::new(50.0, HEIGHT + size - 0.1);
        tick(&mut state, &idle());
        assert_eq!(state.stars_missed, 1);
        assert_eq!(state.phase, GamePhase::GameOver);
        tick(&mut state, &idle());
        assert_eq!(state.stars_missed, 1);
    }

    #[test]
    fn test_retry_resets_to_level_one() {
        let mut state = started(5);
        state.score = 900;
        state.setup_level(6);
        state.end_run();
        let retry = state.buttons[0].rect.center();
        let input = TickInput {
            pointer: Some(retry),
            pointer_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.stars.len() as u32, state.stars_spawned);
        assert!(state.stars_spawned <= 2);
        assert!(state.player.bullets.is_empty());
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut state = started(6);
        park_enemies(&mut state);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        assert_eq!(state.player.bullets.len(), 1);
        for _ in 1..FIRE_COOLDOWN {
            tick(&mut state, &fire);
        }
        assert_eq!(state.player.bullets.len(), 1);
        tick(&mut state, &fire);
        assert_eq!(state.player.bullets.len(), 2);
    }

    #[test]
    fn test_bullet_destroys_enemy() {
        let mut state = started(7);
        park_enemies(&mut state);
        state.enemies[0].pos = Vec2::new(300.0, 200.0);
        state.enemies[0].sway_phase = 0.0;
        state.player.bullets.push(Bullet {
            pos: Vec2::new(300.0, 230.0),
            vel: Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            owner: BulletOwner::Player,
        });
        tick(&mut state, &idle());
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::EnemyDestroyed { .. })));
        assert_eq!(state.score, ENEMY_SCORE);
        assert!(state.player.bullets.is_empty());
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_dead_enemy_bullets_keep_flying() {
        let mut state = started(12);
        park_enemies(&mut state);
        let before = state.enemies.len();
        state.enemies[0].pos = Vec2::new(300.0, 200.0);
        state.enemies[0].sway_phase = 0.0;
        state.enemies[0].bullets.push(Bullet {
            pos: Vec2::new(100.0, 300.0),
            vel: Vec2::new(0.0, ENEMY_BULLET_SPEED),
            owner: BulletOwner::Enemy,
        });
        state.player.bullets.push(Bullet {
            pos: Vec2::new(300.0, 230.0),
            vel: Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            owner: BulletOwner::Player,
        });
        tick(&mut state, &idle());
        assert!(state.enemies.iter().all(|e| e.alive));
        assert_eq!(state.enemies.len(), before - 1);
        assert_eq!(state.stray_bullets.len(), 1);
        assert_eq!(state.stray_bullets[0].pos, Vec2::new(100.0, 305.0));
    }

    #[test]
    fn test_enemy_fires_at_player() {
        let mut state = started(8);
        park_enemies(&mut state);
        state.enemies[0].pos = Vec2::new(100.0, 100.0);
        state.enemies[0].shoot_cooldown = 1;
        tick(&mut state, &idle());
        let bullet = &state.enemies[0].bullets[0];
        assert_eq!(bullet.owner, BulletOwner::Enemy);
        // Aimed down and to the right, toward the ship
        assert!(bullet.vel.x > 0.0 && bullet.vel.y > 0.0);
        assert!((bullet.vel.length() - ENEMY_BULLET_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut state = started(10);
        let y = state.stars[0].pos.y;
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        for _ in 0..10 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.stars[0].pos.y, y);
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(32))]

        #[test]
        fn prop_active_stars_never_exceed_quota(seed in 0u64..10_000) {
            let mut state = started(seed);
            for _ in 0..600 {
                park_enemies(&mut state);
                tick(&mut state, &idle());
                proptest::prop_assert!(state.stars.len() as u32 <= state.config.stars_required);
                proptest::prop_assert!(state.stars_spawned <= state.config.stars_required);
                if state.phase != GamePhase::Playing {
                    break;
                }
            }
        }

        #[test]
        fn prop_player_stays_on_screen(moves in proptest::collection::vec(0u8..9, 1..200)) {
            let mut state = started(11);
            for m in moves {
                park_enemies(&mut state);
                state.stars.clear();
                state.stars_spawned = state.config.stars_required;
                let input = TickInput {
                    left: m % 3 == 0,
                    right: m % 3 == 1,
                    up: m / 3 == 0,
                    down: m / 3 == 1,
                    ..Default::default()
                };
                tick(&mut state, &input);
                let b = state.player.bounds();
                proptest::prop_assert!(b.min.x >= 0.0 && b.max.x <= WIDTH);
                proptest::prop_assert!(b.min.y >= 0.0 && b.max.y <= HEIGHT);
            }
        }
    }
}
