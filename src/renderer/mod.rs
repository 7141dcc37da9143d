//! Rendering module
//!
//! `scene` builds a frame as plain vertices in canvas coordinates with no
//! GPU involvement; `pipeline` maps them through the letterbox viewport and
//! draws them with WebGPU.

pub mod font;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use font::{FontAtlas, FontError};
pub use pipeline::RenderState;
pub use scene::{HudInfo, build_frame, progress_fraction};
pub use vertex::Vertex;
pub use viewport::Viewport;
