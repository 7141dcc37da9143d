//! Scene composition
//!
//! Turns a game state into a vertex list in canvas coordinates, back to
//! front: backdrop, stars, hostiles, projectiles, particles, the player,
//! the HUD panel, then whatever overlay the phase calls for. Reads state
//! only; building the same frame twice yields the same vertices.

use glam::Vec2;

use super::font::FontAtlas;
use super::shapes;
use super::vertex::{Vertex, colors, colors::with_alpha};
use crate::consts::{MAX_LEVEL, collector, shooter};
use crate::driver::Game;
use crate::settings::Settings;
use crate::sim::effects::{Backdrop, BurstKind, Explosion};
use crate::sim::{Aabb, CollectorState, GamePhase, ShooterState, Star};
use crate::ui::{Button, Rect};

/// HUD values that live outside the game state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HudInfo {
    pub best_score: Option<u64>,
    /// Shown only when set
    pub fps: Option<u32>,
}

/// Font sizes in canvas pixels
const TITLE_SIZE: f32 = 44.0;
const BODY_SIZE: f32 = 18.0;
const BUTTON_SIZE: f32 = 22.0;
const FPS_SIZE: f32 = 14.0;

/// Fill ratio for the progress bar; zero when nothing is required
pub fn progress_fraction(collected: u32, required: u32) -> f32 {
    if required == 0 {
        0.0
    } else {
        (collected as f32 / required as f32).min(1.0)
    }
}

pub fn build_frame(
    game: &Game,
    settings: &Settings,
    hud: &HudInfo,
    font: &FontAtlas,
) -> Vec<Vertex> {
    match game {
        Game::Collector(state) => collector_frame(state, settings, hud, font),
        Game::Shooter(state) => shooter_frame(state, settings, hud, font),
    }
}

pub fn collector_frame(
    state: &CollectorState,
    settings: &Settings,
    hud: &HudInfo,
    font: &FontAtlas,
) -> Vec<Vertex> {
    use collector::{HEIGHT, WIDTH};

    let mut out = Vec::with_capacity(16_384);
    backdrop(&mut out, &state.backdrop, settings);
    falling_stars(&mut out, &state.stars, settings);
    explosions(&mut out, &state.bursts, settings);

    let ball = &state.ball;
    if !ball.landed {
        shapes::glow(&mut out, ball.pos, ball.radius * 2.0, with_alpha(colors::BALL, 0.4));
        shapes::circle(&mut out, ball.pos, ball.radius, colors::BALL);
        shapes::circle(&mut out, ball.pos, ball.radius - 5.0, colors::BALL_CORE);
        shapes::circle(
            &mut out,
            ball.pos - Vec2::splat(ball.radius / 3.0),
            ball.radius / 4.0,
            colors::SHINE,
        );
    }

    let (collected, required) = state.progress();
    hud_panel(
        &mut out,
        font,
        WIDTH,
        &[
            format!("STARS: {}/{}", collected, required),
            format!("LEVEL: {}/{}", state.level, MAX_LEVEL),
            format!("SCORE: {}", state.score),
        ],
        progress_fraction(collected, required),
        hud,
    );

    let center_x = WIDTH / 2.0;
    match state.phase {
        GamePhase::Menu => {
            font.text_centered(
                &mut out,
                "GALAXY STAR COLLECTOR",
                center_x,
                100.0,
                TITLE_SIZE,
                colors::TITLE,
            );
            font.text_centered(
                &mut out,
                "CLICK THE BALL TO START COLLECTING STARS!",
                center_x,
                170.0,
                BODY_SIZE,
                colors::TEXT,
            );
        }
        GamePhase::Playing if !ball.released => {
            font.text_centered(
                &mut out,
                "CLICK THE BALL TO DROP IT",
                center_x,
                HEIGHT - 100.0,
                BODY_SIZE,
                colors::WARNING,
            );
        }
        GamePhase::LevelComplete => {
            let next = format!("GET READY FOR LEVEL {}!", state.level + 1);
            banner(
                &mut out,
                font,
                WIDTH,
                HEIGHT,
                "LEVEL COMPLETE!",
                colors::SUCCESS,
                &next,
                false,
            );
        }
        GamePhase::Paused => {
            banner(
                &mut out,
                font,
                WIDTH,
                HEIGHT,
                "PAUSED",
                colors::TEXT,
                "PRESS P TO RESUME",
                true,
            );
        }
        GamePhase::GameOver => banner(
            &mut out,
            font,
            WIDTH,
            HEIGHT,
            "GAME OVER",
            colors::WARNING,
            "YOU LOSE, BUT YOU CAN TRY AGAIN!",
            true,
        ),
        GamePhase::Won => banner(
            &mut out,
            font,
            WIDTH,
            HEIGHT,
            "YOU WIN!",
            colors::SUCCESS,
            "CONGRATULATIONS! YOU COLLECTED ALL STARS!",
            false,
        ),
        GamePhase::Playing => {}
    }

    buttons(&mut out, font, &state.buttons);

    if let Some(p) = state.pointer {
        shapes::ring(&mut out, p, 5.0, 8.0, colors::TEXT);
        shapes::circle(&mut out, p, 5.0, colors::STAR);
    }
    out
}

pub fn shooter_frame(
    state: &ShooterState,
    settings: &Settings,
    hud: &HudInfo,
    font: &FontAtlas,
) -> Vec<Vertex> {
    use shooter::{HEIGHT, WIDTH};

    let mut out = Vec::with_capacity(16_384);
    backdrop(&mut out, &state.backdrop, settings);
    falling_stars(&mut out, &state.stars, settings);

    for enemy in &state.enemies {
        shapes::saucer(&mut out, enemy.pos, enemy.half, colors::ENEMY, colors::ENEMY_EYE);
    }
    let enemy_bullets = state
        .enemies
        .iter()
        .flat_map(|e| e.bullets.iter())
        .chain(&state.stray_bullets);
    for bullet in enemy_bullets {
        shapes::rect(&mut out, aabb_rect(&bullet.bounds()), colors::ENEMY_BULLET);
    }
    for bullet in &state.player.bullets {
        shapes::rect(&mut out, aabb_rect(&bullet.bounds()), colors::PLAYER_BULLET);
    }

    explosions(&mut out, &state.explosions, settings);

    if state.phase != GamePhase::GameOver {
        let p = &state.player;
        shapes::ship(&mut out, p.pos, p.half, colors::PLAYER, colors::PLAYER_COCKPIT);
    }

    let (collected, required) = state.progress();
    hud_panel(
        &mut out,
        font,
        WIDTH,
        &[
            format!("STARS: {}/{}", collected, required),
            format!("LEVEL: {}/{}", state.level, MAX_LEVEL),
            format!("SCORE: {}", state.score),
        ],
        progress_fraction(collected, required),
        hud,
    );

    let center_x = WIDTH / 2.0;
    match state.phase {
        GamePhase::Menu => {
            font.text_centered(
                &mut out,
                "GALACTIC STAR COLLECTOR",
                center_x,
                120.0,
                TITLE_SIZE,
                colors::TITLE,
            );
            font.text_centered(
                &mut out,
                "ARROWS TO MOVE, SPACE TO FIRE, P TO PAUSE",
                center_x,
                195.0,
                BODY_SIZE,
                colors::TEXT,
            );
            font.text_centered(
                &mut out,
                "COLLECT EVERY STAR. DON'T GET HIT!",
                center_x,
                225.0,
                BODY_SIZE,
                colors::TEXT,
            );
        }
        GamePhase::LevelComplete => {
            let next = format!("GET READY FOR LEVEL {}!", state.level + 1);
            banner(
                &mut out,
                font,
                WIDTH,
                HEIGHT,
                "LEVEL COMPLETE!",
                colors::SUCCESS,
                &next,
                false,
            );
        }
        GamePhase::Paused => {
            banner(
                &mut out,
                font,
                WIDTH,
                HEIGHT,
                "PAUSED",
                colors::TEXT,
                "PRESS P TO RESUME",
                true,
            );
        }
        GamePhase::GameOver => {
            let message = format!("FINAL SCORE: {}", state.score);
            banner(
                &mut out,
                font,
                WIDTH,
                HEIGHT,
                "GAME OVER",
                colors::WARNING,
                &message,
                true,
            );
        }
        GamePhase::Won => {
            let message = format!("ALL {} LEVELS CLEARED! SCORE: {}", MAX_LEVEL, state.score);
            banner(
                &mut out,
                font,
                WIDTH,
                HEIGHT,
                "YOU WIN!",
                colors::SUCCESS,
                &message,
                false,
            );
        }
        GamePhase::Playing => {}
    }

    buttons(&mut out, font, &state.buttons);
    if !state.buttons.is_empty() {
        if let Some(p) = state.pointer {
            shapes::ring(&mut out, p, 4.0, 7.0, colors::TEXT);
        }
    }
    out
}

fn aabb_rect(b: &Aabb) -> Rect {
    let size = b.max - b.min;
    Rect::new(b.min.x, b.min.y, size.x, size.y)
}

fn backdrop(out: &mut Vec<Vertex>, backdrop: &Backdrop, settings: &Settings) {
    let quality = settings.quality;
    if quality.nebula_enabled() {
        for nebula in &backdrop.nebulas {
            let tint = colors::NEBULAS[nebula.tint % colors::NEBULAS.len()];
            shapes::glow(out, nebula.pos, nebula.radius, with_alpha(tint, nebula.alpha));
        }
    }

    let shown = (backdrop.stars.len() as f32 * quality.starfield_fraction()) as usize;
    for star in backdrop.stars.iter().take(shown) {
        let b = star.brightness;
        shapes::circle(out, star.pos, star.size, [b, b, b, 1.0]);
    }

    for planet in &backdrop.planets {
        let tint = colors::PLANETS[planet.tint % colors::PLANETS.len()];
        shapes::circle(out, planet.pos, planet.radius, tint);
        if planet.ringed {
            let radii = Vec2::new(planet.radius * 1.6, planet.radius * 0.35);
            shapes::ellipse_band(out, planet.pos, radii, 4.0, with_alpha(tint, 0.6));
        }
    }
}

fn falling_stars(out: &mut Vec<Vertex>, stars: &[Star], settings: &Settings) {
    if settings.draw_trails() {
        for star in stars {
            shapes::trail(out, &star.trail, star.size * 0.4, colors::STAR);
        }
    }
    for star in stars {
        if star.glow > 0.0 {
            shapes::glow(out, star.pos, star.size * 2.0, with_alpha(colors::STAR, star.glow * 0.2));
        }
        shapes::star(out, star.pos, star.size, star.angle, colors::STAR);
    }
}

fn burst_color(kind: BurstKind) -> [f32; 4] {
    match kind {
        BurstKind::Ball => colors::BALL,
        BurstKind::Star => colors::STAR,
        BurstKind::Enemy => colors::ENEMY_BULLET,
        BurstKind::Player => colors::PLAYER,
    }
}

fn explosions(out: &mut Vec<Vertex>, explosions: &[Explosion], settings: &Settings) {
    let particles = explosions
        .iter()
        .flat_map(|e| e.particles.iter().map(move |p| (e.kind, p)))
        .take(settings.max_particles());
    for (kind, p) in particles {
        let color = with_alpha(burst_color(kind), p.life_ratio());
        shapes::circle(out, p.pos, p.size, color);
    }
}

/// Rounded info panel in the top-right corner
fn hud_panel(
    out: &mut Vec<Vertex>,
    font: &FontAtlas,
    width: f32,
    lines: &[String],
    progress: f32,
    hud: &HudInfo,
) {
    let panel = Rect::new(width - 270.0, 20.0, 250.0, 120.0);
    shapes::rounded_rect(out, panel, 15.0, colors::UI_BG);

    let left = panel.x + 20.0;
    let mut y = panel.y + 12.0;
    for line in lines {
        font.text(out, line, Vec2::new(left, y), BODY_SIZE, colors::TEXT);
        y += 22.0;
    }
    if let Some(best) = hud.best_score {
        let best = format!("BEST: {}", best);
        font.text(out, &best, Vec2::new(left, y), BODY_SIZE, colors::TITLE);
    }

    let track = Rect::new(left, panel.bottom() - 16.0, 210.0, 8.0);
    shapes::rect(out, track, colors::PROGRESS_TRACK);
    if progress > 0.0 {
        let fill = Rect::new(track.x, track.y, track.w * progress, track.h);
        shapes::rect(out, fill, colors::STAR);
    }

    if let Some(fps) = hud.fps {
        let fps = format!("FPS: {}", fps);
        font.text(out, &fps, Vec2::new(10.0, 10.0), FPS_SIZE, colors::TEXT);
    }
}

/// Modal title plus one line of text, optionally over a dimmed screen
fn banner(
    out: &mut Vec<Vertex>,
    font: &FontAtlas,
    width: f32,
    height: f32,
    title: &str,
    title_color: [f32; 4],
    message: &str,
    dim: bool,
) {
    if dim {
        shapes::rect(out, Rect::new(0.0, 0.0, width, height), colors::OVERLAY);
    }
    let cx = width / 2.0;
    font.text_centered(out, title, cx, height / 2.0 - 100.0, TITLE_SIZE * 1.2, title_color);
    font.text_centered(out, message, cx, height / 2.0 - 20.0, BODY_SIZE, colors::TEXT);
}

fn buttons(out: &mut Vec<Vertex>, font: &FontAtlas, buttons: &[Button]) {
    for button in buttons {
        let fill = if button.hovered {
            colors::BUTTON_HOVER
        } else {
            colors::BUTTON
        };
        shapes::rounded_rect(out, button.rect, 10.0, fill);
        let center = button.rect.center();
        let label_y = center.y - font.cap_height(BUTTON_SIZE) * 0.5;
        font.text_centered(out, button.label, center.x, label_y, BUTTON_SIZE, colors::TEXT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;

    #[test]
    fn test_progress_fraction_guards_zero() {
        assert_eq!(progress_fraction(0, 0), 0.0);
        assert_eq!(progress_fraction(3, 0), 0.0);
        assert_eq!(progress_fraction(2, 8), 0.25);
        assert_eq!(progress_fraction(9, 8), 1.0);
    }

    #[test]
    fn test_frame_is_pure() {
        let font = FontAtlas::embedded().unwrap();
        let state = CollectorState::new(4);
        let settings = Settings::default();
        let hud = HudInfo::default();
        let a = collector_frame(&state, &settings, &hud, &font);
        let b = collector_frame(&state, &settings, &hud, &font);
        assert_eq!(a, b);
        assert_eq!(a.len() % 3, 0);
    }

    #[test]
    fn test_every_phase_renders() {
        let font = FontAtlas::embedded().unwrap();
        let settings = Settings::default();
        let hud = HudInfo {
            best_score: Some(120),
            fps: Some(60),
        };
        for phase in [
            GamePhase::Menu,
            GamePhase::Playing,
            GamePhase::Paused,
            GamePhase::LevelComplete,
            GamePhase::GameOver,
            GamePhase::Won,
        ] {
            let mut c = CollectorState::new(1);
            c.set_phase(phase);
            assert!(!collector_frame(&c, &settings, &hud, &font).is_empty());

            let mut s = ShooterState::new(1);
            s.set_phase(phase);
            assert!(!shooter_frame(&s, &settings, &hud, &font).is_empty());
        }
    }

    #[test]
    fn test_low_quality_draws_less() {
        let font = FontAtlas::embedded().unwrap();
        let state = ShooterState::new(2);
        let hud = HudInfo::default();
        let low = Settings {
            quality: QualityPreset::Low,
            ..Default::default()
        };
        let high = Settings {
            quality: QualityPreset::High,
            ..Default::default()
        };
        let low = shooter_frame(&state, &low, &hud, &font);
        let high = shooter_frame(&state, &high, &hud, &font);
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_hover_changes_button_color() {
        let font = FontAtlas::embedded().unwrap();
        let mut state = CollectorState::new(3);
        let hud = HudInfo::default();
        let settings = Settings::default();
        let plain = collector_frame(&state, &settings, &hud, &font);
        state.buttons[0].hovered = true;
        let hovered = collector_frame(&state, &settings, &hud, &font);
        assert!(hovered.iter().any(|v| v.color == colors::BUTTON_HOVER));
        assert!(!plain.iter().any(|v| v.color == colors::BUTTON_HOVER));
    }

    #[test]
    fn test_button_label_sits_inside_button() {
        let font = FontAtlas::embedded().unwrap();
        let state = CollectorState::new(6);
        let mut out = Vec::new();
        buttons(&mut out, &font, &state.buttons);
        let rect = state.buttons[0].rect;
        let label: Vec<&Vertex> = out
            .iter()
            .filter(|v| v.color[..3] == colors::TEXT[..3])
            .collect();
        assert!(!label.is_empty());
        for v in label {
            let p = Vec2::new(v.position[0], v.position[1]);
            assert!(rect.contains(p), "{p:?} outside {rect:?}");
        }
    }
}
