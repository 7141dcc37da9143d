//! Letterboxed mapping between the fixed logical canvas and the surface

use glam::Vec2;

/// Where the logical canvas sits inside the physical surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical canvas size (800x600 or 1000x700)
    pub canvas: Vec2,
    /// Surface size in physical pixels
    pub surface: Vec2,
    /// Physical pixels per canvas unit
    pub scale: f32,
    /// Top-left of the canvas on the surface, in physical pixels
    pub offset: Vec2,
}

impl Viewport {
    /// Largest uniform scale that fits the canvas, centered with bars
    pub fn fit(canvas: Vec2, surface: Vec2) -> Self {
        let surface = surface.max(Vec2::ONE);
        let scale = (surface.x / canvas.x).min(surface.y / canvas.y);
        let offset = (surface - canvas * scale) * 0.5;
        Self {
            canvas,
            surface,
            scale,
            offset,
        }
    }

    /// Canvas coordinates (y down) to normalized device coordinates (y up)
    pub fn to_ndc(&self, p: Vec2) -> Vec2 {
        let px = self.offset + p * self.scale;
        Vec2::new(px.x / self.surface.x * 2.0 - 1.0, 1.0 - px.y / self.surface.y * 2.0)
    }

    /// Surface pixel (e.g. a mouse event offset) to canvas coordinates.
    /// `None` when the point falls in the letterbox bars.
    pub fn surface_to_canvas(&self, p: Vec2) -> Option<Vec2> {
        let c = (p - self.offset) / self.scale;
        let inside = c.x >= 0.0 && c.y >= 0.0 && c.x <= self.canvas.x && c.y <= self.canvas.y;
        inside.then_some(c)
    }
}
