//! Overlay buttons
//!
//! Buttons keep only a hover flag between frames. Pressing one returns a
//! [`UiCommand`] for the update step to interpret.

use glam::Vec2;

use crate::sim::GamePhase;

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// What a button asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Start,
    Retry,
    NextLevel,
    Resume,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
    pub command: UiCommand,
    pub hovered: bool,
}

impl Button {
    pub fn new(rect: Rect, label: &'static str, command: UiCommand) -> Self {
        Self {
            rect,
            label,
            command,
            hovered: false,
        }
    }

    pub fn update_hover(&mut self, pointer: Option<Vec2>) {
        self.hovered = pointer.is_some_and(|p| self.rect.contains(p));
    }

    /// Command for a press at `pointer`, if it lands on the button
    pub fn press(&self, pointer: Vec2) -> Option<UiCommand> {
        self.rect.contains(pointer).then_some(self.command)
    }
}

/// Update hover flags and resolve a press against every visible button
pub fn handle_pointer(
    buttons: &mut [Button],
    pointer: Option<Vec2>,
    pressed: bool,
) -> Option<UiCommand> {
    for b in buttons.iter_mut() {
        b.update_hover(pointer);
    }
    let p = pointer.filter(|_| pressed)?;
    buttons.iter().find_map(|b| b.press(p))
}

/// Buttons shown on the overlay for a phase, centered below the message
pub fn overlay_buttons(
    phase: GamePhase,
    width: f32,
    height: f32,
    manual_advance: bool,
) -> Vec<Button> {
    let rect = Rect::new(width / 2.0 - 100.0, height / 2.0 + 50.0, 200.0, 50.0);
    let button = |label, command| vec![Button::new(rect, label, command)];
    match phase {
        GamePhase::Menu => button("START GAME", UiCommand::Start),
        GamePhase::Paused => button("RESUME", UiCommand::Resume),
        GamePhase::LevelComplete if manual_advance => button("NEXT LEVEL", UiCommand::NextLevel),
        GamePhase::GameOver => button("TRY AGAIN", UiCommand::Retry),
        GamePhase::Won => button("PLAY AGAIN", UiCommand::Retry),
        GamePhase::Playing | GamePhase::LevelComplete => Vec::new(),
    }
}
