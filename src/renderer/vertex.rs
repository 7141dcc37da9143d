//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        rgba(r, g, b, 255)
    }

    /// Same color at a different opacity
    pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
    }

    pub const BACKGROUND: [f32; 4] = rgb(5, 5, 15);
    pub const BALL: [f32; 4] = rgb(255, 105, 180);
    pub const BALL_CORE: [f32; 4] = rgb(255, 200, 230);
    pub const SHINE: [f32; 4] = rgba(255, 255, 255, 150);
    pub const STAR: [f32; 4] = rgb(255, 255, 100);
    pub const TEXT: [f32; 4] = rgb(230, 230, 250);
    pub const UI_BG: [f32; 4] = rgba(30, 30, 60, 200);
    pub const OVERLAY: [f32; 4] = rgba(0, 0, 0, 180);
    pub const BUTTON: [f32; 4] = rgb(70, 130, 180);
    pub const BUTTON_HOVER: [f32; 4] = rgb(100, 160, 210);
    pub const TITLE: [f32; 4] = rgb(255, 215, 0);
    pub const WARNING: [f32; 4] = rgb(255, 100, 100);
    pub const SUCCESS: [f32; 4] = rgb(100, 255, 100);
    pub const PROGRESS_TRACK: [f32; 4] = rgba(60, 60, 100, 220);

    pub const PLAYER: [f32; 4] = rgb(80, 200, 255);
    pub const PLAYER_COCKPIT: [f32; 4] = rgb(200, 240, 255);
    pub const PLAYER_BULLET: [f32; 4] = rgb(120, 255, 200);
    pub const ENEMY: [f32; 4] = rgb(220, 60, 80);
    pub const ENEMY_EYE: [f32; 4] = rgb(255, 200, 60);
    pub const ENEMY_BULLET: [f32; 4] = rgb(255, 140, 60);

    pub const NEBULAS: [[f32; 4]; 3] = [rgb(100, 60, 180), rgb(180, 60, 100), rgb(60, 100, 180)];
    pub const PLANETS: [[f32; 4]; 4] = [
        rgb(180, 120, 80),
        rgb(90, 150, 200),
        rgb(150, 190, 120),
        rgb(200, 170, 220),
    ];
}
