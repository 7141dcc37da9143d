//! Fixed-step update for Galaxy Star Collector

use glam::Vec2;

use crate::consts::collector::*;
use crate::sim::collision::point_in_circle;
use crate::sim::effects::{BurstKind, update_explosions};
use crate::sim::state::{GameEvent, GamePhase, TickInput};
use crate::ui::{UiCommand, handle_pointer};

use super::state::CollectorState;

/// Advance the game by one frame
pub fn tick(state: &mut CollectorState, input: &TickInput) {
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

    let pointer = state.pointer;
    let pressed = input.pointer_pressed;
    let command = handle_pointer(&mut state.buttons, pointer, pressed);
    match command {
        Some(UiCommand::Start | UiCommand::Retry) => state.start_run(),
        Some(UiCommand::NextLevel) => state.advance_level(),
        Some(UiCommand::Resume) => state.set_phase(GamePhase::Playing),
        None => {
            // A press that missed every button may be aimed at the ball
            if pressed && state.phase == GamePhase::Playing && !state.ball.released {
                if let Some(p) = pointer {
                    if point_in_circle(p, state.ball.pos, state.ball.radius) {
                        state.ball.released = true;
                        let pos = state.ball.pos;
                        state.burst(pos, BurstKind::Ball, 20);
                        state.events.push(GameEvent::BallReleased);
                    }
                }
            }
        }
    }

    // The frame a button is pressed only applies the command
    if command.is_some() {
        update_effects(state);
        return;
    }

    match state.phase {
        GamePhase::Playing if state.ball.released => update_playing(state),
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

fn update_effects(state: &mut CollectorState) {
    if state.phase != GamePhase::Paused {
        update_explosions(&mut state.bursts);
        state.backdrop.drift(&mut state.rng, 0.1);
    }
}

fn update_playing(state: &mut CollectorState) {
    state.ball.pos.y += state.ball.speed;

    let pointer = state.pointer;
    let mut collected = Vec::new();
    let mut missed = Vec::new();
    for star in state.stars.iter_mut().filter(|s| !s.collected) {
        star.advance();
        if pointer.is_some_and(|p| star.bounds().contains_point(p)) {
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
        state.burst(pos, BurstKind::Star, 15);
        state.events.push(GameEvent::StarCollected { pos });
    }
    for pos in &missed {
        state.stars_missed += 1;
        state.events.push(GameEvent::StarMissed { pos: *pos });
    }

    if state.stars_collected >= state.stars_required {
        state.complete_level();
        return;
    }

    // A missed star leaves the level unwinnable
    if !missed.is_empty() {
        log::debug!("collector: {} star(s) missed", missed.len());
        state.end_run();
        return;
    }

    if state.ball.pos.y > BALL_FLOOR_Y {
        state.ball.landed = true;
        let x = state.ball.pos.x;
        state.burst(Vec2::new(x, HEIGHT - 20.0), BurstKind::Ball, 30);
        state.events.push(GameEvent::BallLanded);
        state.end_run();
    }
}
